use anyhow::{Context, Result, bail};
use antenna_ga::dataset::{read_clients, write_clients};
use antenna_ga::generator::{ClusterLayout, generate_clients};
use antenna_ga::models::{Bounds, Client, Configuration, Schedule};
use antenna_ga::report::Report;
use antenna_ga::{GenerationCompletedEvent, Observer};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "antenna-ga")]
#[command(about = "Place antennas to cover as many clients as possible with a genetic algorithm")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Optimize antenna positions for a client file
    Run(RunArgs),
    /// Write a synthetic clustered client file
    Generate {
        #[arg(long, default_value_t = 62_500)]
        count: usize,
        #[arg(long, default_value_t = 4)]
        clusters: usize,
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        #[arg(long, default_value_t = 1000.0)]
        height: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "clients.csv")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// CSV file with `id,x,y` rows
    #[arg(long, default_value = "clients.csv")]
    clients: PathBuf,
    /// JSON configuration, missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    antennas: Option<u32>,
    #[arg(long)]
    radius: Option<f64>,
    /// Map size as `WIDTHxHEIGHT`, anchored at the origin
    #[arg(long, value_parser = parse_map_size)]
    map: Option<(f64, f64)>,
    #[arg(long)]
    bits: Option<u32>,
    #[arg(long)]
    population: Option<u32>,
    #[arg(long)]
    generations: Option<u32>,
    #[arg(long)]
    elitism: Option<u32>,
    #[arg(long)]
    crossover_rate: Option<f64>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    stagnation: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Write the text report here
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write the full result as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
    /// Disable the progress bar
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn parse_map_size(value: &str) -> Result<(f64, f64), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let width = width.trim().parse().map_err(|e| format!("width: {e}"))?;
    let height = height.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok((width, height))
}

impl RunArgs {
    fn configuration(&self) -> Result<Configuration> {
        let mut configuration = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => Configuration::default(),
        };

        if let Some(antennas) = self.antennas {
            configuration.antenna_count = antennas;
        }
        if let Some(radius) = self.radius {
            configuration.antenna_radius = radius;
        }
        if let Some((width, height)) = self.map {
            configuration.bounds = Bounds::from_size(width, height);
        }
        if let Some(bits) = self.bits {
            configuration.bits_per_coordinate = bits;
        }
        if let Some(population) = self.population {
            configuration.population_size = population;
        }
        if let Some(generations) = self.generations {
            configuration.max_generations = generations;
        }
        if let Some(elitism) = self.elitism {
            configuration.elitism_count = elitism;
        }
        if let Some(rate) = self.crossover_rate {
            configuration.crossover_rate = rate;
        }
        if let Some(rate) = self.mutation_rate {
            configuration.mutation_rate = rate;
        }
        if let Some(stagnation) = self.stagnation {
            configuration.max_stagnant_generations = stagnation;
        }
        if self.seed.is_some() {
            configuration.seed = self.seed;
        }

        Ok(configuration)
    }
}

// ============================================================
// Progress
// ============================================================

const BAR_WIDTH: usize = 30;

struct ProgressBar {
    schedule: Schedule,
}

impl Observer for ProgressBar {
    fn on_generation(&mut self, event: &GenerationCompletedEvent) {
        let ratio = self.schedule.progress(event.generation);
        let filled = (ratio * BAR_WIDTH as f64).round() as usize;

        let mut stderr = io::stderr().lock();
        // progress output is best effort
        let _ = write!(
            stderr,
            "\r[{}{}] {:3.0}% generation {}/{} | best {} | stagnation {}/{}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            ratio * 100.0,
            event.generation,
            self.schedule.max_generations,
            event.best_fitness,
            event.stagnation,
            self.schedule.max_stagnant_generations,
        );
        let _ = stderr.flush();
    }
}

fn load_clients(path: &Path) -> Result<Vec<Client>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open client file {}", path.display()))?;
    let clients = read_clients(BufReader::new(file))?;
    if clients.is_empty() {
        bail!("no clients loaded from {}", path.display());
    }
    Ok(clients)
}

fn run(args: RunArgs) -> Result<()> {
    let configuration = args.configuration()?;
    let clients = load_clients(&args.clients)?;
    tracing::info!(clients = clients.len(), path = %args.clients.display(), "Clients loaded");

    let result = if args.quiet {
        antenna_ga::run(&clients, &configuration)?
    } else {
        let mut progress = ProgressBar {
            schedule: configuration.schedule(),
        };
        let result = antenna_ga::run_with_observer(&clients, &configuration, &mut progress)?;
        eprintln!();
        result
    };

    let report = Report::new(&result, &configuration).to_string();
    println!("{report}");

    if let Some(path) = &args.report {
        fs::write(path, format!("{report}\n"))
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!(path = %path.display(), "Report written");
    }
    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result)?;
        tracing::info!(path = %path.display(), "Result written");
    }

    Ok(())
}

fn generate(layout: ClusterLayout, seed: Option<u64>, output: &Path) -> Result<()> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let clients = generate_clients(&mut rng, &layout)?;
    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_clients(BufWriter::new(file), &clients)?;

    tracing::info!(
        clients = clients.len(),
        clusters = layout.clusters,
        seed,
        path = %output.display(),
        "Clients generated"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Generate {
            count,
            clusters,
            width,
            height,
            seed,
            output,
        } => generate(
            ClusterLayout {
                count,
                clusters,
                width,
                height,
            },
            seed,
            &output,
        ),
    }
}
