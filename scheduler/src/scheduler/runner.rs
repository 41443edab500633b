use super::{display::Report, Algorithm, Schedule};
use crate::{config::SimulationConfig, error::ConfigurationError};
use std::{io, panic, thread};

#[derive(Debug, Clone)]
pub struct Run {
    pub algorithm: Algorithm,
    pub name: String,
    pub schedule: Schedule,
}

pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn run_one(&self, algorithm: Algorithm) -> Result<Run, ConfigurationError> {
        let scheduler = algorithm.scheduler()?;
        let name = scheduler.name();
        log::info!("running {name} over {} instants", self.config.horizon);

        let schedule = scheduler.schedule(&self.config.processes, self.config.horizon);
        for index in schedule.incomplete() {
            log::warn!(
                "{name}: {} did not complete within the horizon",
                self.config.processes[index].name()
            );
        }

        Ok(Run {
            algorithm,
            name,
            schedule,
        })
    }

    /// Runs every configured algorithm in order, each on its own schedule.
    pub fn run(&self) -> Result<Vec<Run>, ConfigurationError> {
        self.config
            .algorithms
            .iter()
            .map(|&algorithm| self.run_one(algorithm))
            .collect()
    }

    /// Same result as [`Simulation::run`], with one thread per algorithm.
    pub fn run_parallel(&self) -> Result<Vec<Run>, ConfigurationError> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .config
                .algorithms
                .iter()
                .map(|&algorithm| scope.spawn(move || self.run_one(algorithm)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| panic::resume_unwind(panic)))
                .collect()
        })
    }

    pub fn report<R: Report>(&self, runs: &[Run], report: &mut R) -> Result<(), io::Error> {
        for run in runs {
            report.report(&self.config, run)?;
        }
        Ok(())
    }
}
