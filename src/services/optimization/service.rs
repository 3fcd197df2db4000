use super::events::{GenerationCompletedEvent, NoopObserver, Observer};
use super::models::{RunResult, RunWarning};
use super::{Error, ServiceBuilder};
use crate::builder::Unset;
use crate::models::{
    Breeder, Client, Configuration, CoverageEvaluator, Crossover, Fitness, Individual, Morphology,
    Mutagen, Population, Schedule, ScheduleDecision, SelectionError, StopReason,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// A validated optimization problem: clients, configuration and the operators derived from it.
///
/// Built through [`Service::builder`]. Each call to [`Service::run`] is an independent run.
pub struct Service {
    pub(super) clients: Vec<Client>,
    pub(super) configuration: Configuration,
    pub(super) morphology: Morphology,
    pub(super) crossover: Crossover,
    pub(super) mutagen: Mutagen,
    pub(super) schedule: Schedule,
}

impl Service {
    pub fn builder() -> ServiceBuilder<Unset<Vec<Client>>, Unset<Configuration>> {
        ServiceBuilder {
            clients: Unset::new(),
            configuration: Unset::new(),
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Starts a run: draws and scores the initial population.
    ///
    /// Without a configured seed one is drawn from the thread generator and reported in the
    /// result.
    #[instrument(level = "debug", skip(self), fields(population_size = self.configuration.population_size))]
    pub fn evolve(&self) -> Result<Evolution<'_>, Error> {
        let seed = self
            .configuration
            .seed
            .unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        let evaluator = CoverageEvaluator::new(
            &self.morphology,
            self.configuration.antenna_radius,
            &self.clients,
        );

        let mut population = Population::random(
            self.configuration.population_size as usize,
            &self.morphology,
            &mut rng,
        );
        population.evaluate(&evaluator);

        let best = population
            .best()
            .cloned()
            .ok_or(SelectionError::NoValidParents)?;
        let best_fitness = best.fitness().unwrap_or(0);

        Ok(Evolution {
            service: self,
            evaluator,
            breeder: Breeder::new(&self.crossover, &self.mutagen),
            rng,
            seed,
            population,
            best,
            generation: 0,
            stagnation: 0,
            fitness_history: vec![best_fitness],
        })
    }

    /// Runs to completion.
    pub fn run(&self) -> Result<RunResult, Error> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Runs to completion, reporting every generation, the initial one included, to `observer`.
    #[instrument(level = "info", skip(self, observer), fields(clients = self.clients.len(), antenna_count = self.configuration.antenna_count, population_size = self.configuration.population_size, max_generations = self.configuration.max_generations))]
    pub fn run_with_observer<O: Observer + ?Sized>(
        &self,
        observer: &mut O,
    ) -> Result<RunResult, Error> {
        let mut warnings = Vec::new();
        if self.clients.is_empty() {
            tracing::warn!("No clients supplied, every placement will cover 0 clients");
            warnings.push(RunWarning::EmptyInput);
        }

        let mut evolution = self.evolve()?;
        observer.on_generation(&evolution.event());

        let stopped_reason = loop {
            if let Some(reason) = evolution.step()? {
                break reason;
            }
            observer.on_generation(&evolution.event());
        };

        tracing::info!(
            stopped_reason = %stopped_reason,
            generations_run = evolution.generation(),
            best_fitness = evolution.best_fitness(),
            "Optimization finished"
        );

        Ok(evolution.into_result(stopped_reason, warnings))
    }
}

/// The state of a run between generations.
///
/// Every generation is scored before it becomes visible, and all randomness comes from one
/// generator owned by the run, so a seed fully determines the sequence of populations.
pub struct Evolution<'a> {
    service: &'a Service,
    evaluator: CoverageEvaluator<'a>,
    breeder: Breeder<'a>,
    rng: StdRng,
    seed: u64,
    population: Population,
    best: Individual,
    generation: u32,
    stagnation: u32,
    fitness_history: Vec<Fitness>,
}

impl Evolution<'_> {
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best individual seen in any generation so far.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    pub fn best_fitness(&self) -> Fitness {
        self.best.fitness().unwrap_or(0)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }

    pub fn event(&self) -> GenerationCompletedEvent {
        GenerationCompletedEvent::new(self.generation, self.best_fitness(), self.stagnation)
    }

    /// Breeds and scores the next generation, or returns why the run is over.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation, stagnation = self.stagnation))]
    pub fn step(&mut self) -> Result<Option<StopReason>, Error> {
        if let ScheduleDecision::Terminate(reason) = self
            .service
            .schedule
            .decide(self.generation, self.stagnation)
        {
            return Ok(Some(reason));
        }

        let population_size = self.service.configuration.population_size as usize;
        let elitism_count = self.service.configuration.elitism_count as usize;

        let mut next = self.population.elites(elitism_count);
        next.extend(self.breeder.breed_batch(
            &self.population,
            population_size - elitism_count,
            &mut self.rng,
        )?);

        let mut population = Population::new(next);
        population.evaluate(&self.evaluator);
        self.population = population;
        self.generation += 1;

        let current = self
            .population
            .best()
            .ok_or(SelectionError::NoValidParents)?;
        let current_fitness = current.fitness().unwrap_or(0);

        if current_fitness > self.best_fitness() {
            self.best = current.clone();
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }
        self.fitness_history.push(self.best_fitness());

        tracing::debug!(
            generation = self.generation,
            generation_best = current_fitness,
            best_fitness = self.best_fitness(),
            stagnation = self.stagnation,
            "Generation completed"
        );

        Ok(None)
    }

    pub(super) fn into_result(
        self,
        stopped_reason: StopReason,
        warnings: Vec<RunWarning>,
    ) -> RunResult {
        let best_fitness = self.best_fitness();
        let antenna_positions = self.service.morphology.decode(self.best.chromosome());

        RunResult {
            best_chromosome: self.best.into_chromosome(),
            best_fitness,
            antenna_positions,
            generations_run: self.generation,
            stopped_reason,
            client_count: self.service.clients.len(),
            seed: self.seed,
            fitness_history: self.fitness_history,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bounds;

    fn clustered_clients() -> Vec<Client> {
        (0..10)
            .map(|i| Client::new(format!("C{:03}", i + 1), (i % 2) as f64, (i / 5) as f64))
            .collect()
    }

    fn test_configuration() -> Configuration {
        Configuration {
            antenna_count: 1,
            antenna_radius: 5.0,
            bounds: Bounds::from_size(10.0, 10.0),
            bits_per_coordinate: 8,
            population_size: 20,
            max_generations: 50,
            elitism_count: 2,
            max_stagnant_generations: 50,
            seed: Some(42),
            ..Configuration::default()
        }
    }

    fn build_service(clients: Vec<Client>, configuration: Configuration) -> Service {
        Service::builder()
            .with_clients(clients)
            .with_configuration(configuration)
            .build()
            .unwrap()
    }

    #[test]
    fn it_rejects_invalid_configurations_before_running() {
        let result = Service::builder()
            .with_configuration(Configuration {
                population_size: 1,
                elitism_count: 0,
                ..test_configuration()
            })
            .with_clients(clustered_clients())
            .build();

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn it_starts_with_a_scored_population() {
        let service = build_service(clustered_clients(), test_configuration());

        let evolution = service.evolve().unwrap();

        assert_eq!(evolution.generation(), 0);
        assert_eq!(evolution.population().len(), 20);
        assert!(
            evolution
                .population()
                .individuals()
                .iter()
                .all(Individual::is_evaluated)
        );
        assert_eq!(
            Some(evolution.best_fitness()),
            evolution.population().best().and_then(Individual::fitness)
        );
    }

    #[test]
    fn it_keeps_population_size_across_generations() {
        let service = build_service(
            clustered_clients(),
            Configuration {
                population_size: 7,
                elitism_count: 2,
                ..test_configuration()
            },
        );
        let mut evolution = service.evolve().unwrap();

        for _ in 0..10 {
            assert_eq!(evolution.step().unwrap(), None);
            assert_eq!(evolution.population().len(), 7);
        }
        assert_eq!(evolution.generation(), 10);
    }

    #[test]
    fn it_reports_every_generation_to_the_observer() {
        let service = build_service(clustered_clients(), test_configuration());
        let mut events = Vec::new();

        let result = service
            .run_with_observer(&mut |event: &GenerationCompletedEvent| events.push(*event))
            .unwrap();

        assert_eq!(events.len() as u32, result.generations_run + 1);
        assert_eq!(events[0].generation, 0);
        assert_eq!(events.last().unwrap().best_fitness, result.best_fitness);
    }

    #[test]
    fn it_records_the_seed_it_used() {
        let service = build_service(
            clustered_clients(),
            Configuration {
                seed: None,
                max_generations: 3,
                ..test_configuration()
            },
        );

        let first = service.run().unwrap();
        let replay = build_service(
            clustered_clients(),
            Configuration {
                seed: Some(first.seed),
                max_generations: 3,
                ..test_configuration()
            },
        )
        .run()
        .unwrap();

        assert_eq!(first.best_chromosome, replay.best_chromosome);
        assert_eq!(first.fitness_history, replay.fitness_history);
    }
}
