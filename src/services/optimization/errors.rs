use crate::models::{ConfigurationError, Fitness, SelectionError};

/// Errors that can occur while preparing or running an optimization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("SelectionError: {0}")]
    SelectionError(#[from] SelectionError),
    #[error("TooManyClients: client_count={client_count}, max={max}")]
    TooManyClients { client_count: usize, max: Fitness },
}
