use super::{Error, Service};
use crate::builder::{Set, Unset};
use crate::models::{Client, Configuration, Fitness};
use tracing::instrument;

pub struct ServiceBuilder<C, K> {
    pub(super) clients: C,
    pub(super) configuration: K,
}

impl<K> ServiceBuilder<Unset<Vec<Client>>, K> {
    pub fn with_clients(
        self,
        clients: impl Into<Vec<Client>>,
    ) -> ServiceBuilder<Set<Vec<Client>>, K> {
        ServiceBuilder {
            clients: Set::new(clients.into()),
            configuration: self.configuration,
        }
    }
}

impl<C> ServiceBuilder<C, Unset<Configuration>> {
    pub fn with_configuration(
        self,
        configuration: Configuration,
    ) -> ServiceBuilder<C, Set<Configuration>> {
        ServiceBuilder {
            clients: self.clients,
            configuration: Set::new(configuration),
        }
    }
}

impl ServiceBuilder<Set<Vec<Client>>, Set<Configuration>> {
    /// Validates the configuration and prepares the operators it describes.
    #[instrument(level = "debug", skip(self), fields(clients = self.clients.as_ref_inner().len()))]
    pub fn build(self) -> Result<Service, Error> {
        let clients = self.clients.into_inner();
        let configuration = self.configuration.into_inner();

        configuration.validate()?;

        if Fitness::try_from(clients.len()).is_err() {
            return Err(Error::TooManyClients {
                client_count: clients.len(),
                max: Fitness::MAX,
            });
        }

        Ok(Service {
            morphology: configuration.morphology()?,
            crossover: configuration.crossover()?,
            mutagen: configuration.mutagen()?,
            schedule: configuration.schedule(),
            clients,
            configuration,
        })
    }
}
