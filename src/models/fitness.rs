use super::{Client, Position};

/// Number of distinct clients covered by a placement.
///
/// Bounded by the client count, which is checked against `Fitness::MAX` before a run starts.
pub type Fitness = u32;

/// Counts the clients within `radius` of at least one antenna.
///
/// The boundary is inclusive and each client is counted at most once.
pub fn count_covered(antennas: &[Position], radius: f64, clients: &[Client]) -> Fitness {
    let radius_squared = radius * radius;

    clients
        .iter()
        .filter(|client| {
            let position = client.position();
            antennas
                .iter()
                .any(|antenna| antenna.distance_squared(&position) <= radius_squared)
        })
        .count() as Fitness
}
