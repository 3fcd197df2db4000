mod errors;
mod events;
mod models;
mod service;
mod service_builder;

pub use errors::Error;
pub use events::{GenerationCompletedEvent, NoopObserver, Observer};
pub use models::{RunResult, RunWarning};
pub use service::{Evolution, Service};
pub use service_builder::ServiceBuilder;
