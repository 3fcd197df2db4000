//! Antenna placement for the maximal covering location problem, solved with a binary genetic
//! algorithm.
//!
//! ```rust,no_run
//! use antenna_ga::models::{Client, Configuration};
//!
//! let clients = vec![Client::new("C001", 120.0, 80.0), Client::new("C002", 130.0, 95.0)];
//! let result = antenna_ga::run(&clients, &Configuration::default())?;
//! println!("covered {} of {}", result.best_fitness, result.client_count);
//! # Ok::<(), antenna_ga::Error>(())
//! ```

mod builder;

pub mod dataset;
pub mod generator;
pub mod models;
pub mod report;
pub mod services;

pub use services::optimization::{
    Error, Evolution, GenerationCompletedEvent, Observer, RunResult, RunWarning, Service,
};

use models::{Client, Configuration};

/// Runs one optimization over `clients` with `configuration`.
pub fn run(clients: &[Client], configuration: &Configuration) -> Result<RunResult, Error> {
    build_service(clients, configuration)?.run()
}

/// Like [`run`], reporting every generation to `observer`.
pub fn run_with_observer<O: Observer + ?Sized>(
    clients: &[Client],
    configuration: &Configuration,
    observer: &mut O,
) -> Result<RunResult, Error> {
    build_service(clients, configuration)?.run_with_observer(observer)
}

fn build_service(clients: &[Client], configuration: &Configuration) -> Result<Service, Error> {
    Service::builder()
        .with_clients(clients.to_vec())
        .with_configuration(configuration.clone())
        .build()
}
