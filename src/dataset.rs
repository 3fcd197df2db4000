//! Plain `id,x,y` client files.
//!
//! Reading is lenient: rows with fewer than three fields or unparsable coordinates, a header
//! row included, are skipped.

use crate::models::Client;
use std::io::{self, BufRead, Write};
use tracing::instrument;

fn parse_row(line: &str) -> Option<Client> {
    let mut fields = line.split(',').map(str::trim);
    let id = fields.next()?;
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    Some(Client::new(id, x, y))
}

#[instrument(level = "debug", skip(reader))]
pub fn read_clients<R: BufRead>(reader: R) -> io::Result<Vec<Client>> {
    let mut clients = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(&line) {
            Some(client) => clients.push(client),
            None => skipped += 1,
        }
    }

    tracing::debug!(loaded = clients.len(), skipped, "Clients read");
    Ok(clients)
}

/// Writes a header row followed by one row per client.
pub fn write_clients<W: Write>(mut writer: W, clients: &[Client]) -> io::Result<()> {
    writeln!(writer, "id,x,y")?;
    for client in clients {
        writeln!(writer, "{},{},{}", client.id, client.x, client.y)?;
    }
    writer.flush()
}
