use crate::{
    error::ConfigurationError,
    scheduler::{Algorithm, Operation, Process},
};
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_HORIZON: u32 = 20;

/// Largest horizon a run may allocate a grid for.
pub const MAX_HORIZON: u32 = 100_000;

/// Everything a simulation needs. Read-only once a run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub operation: Operation,
    pub algorithms: Vec<Algorithm>,
    pub horizon: u32,
    pub processes: Vec<Process>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            operation: Operation::Trace,
            algorithms: vec![
                Algorithm::Fcfs,
                Algorithm::RoundRobin { quantum: 2 },
                Algorithm::Spn,
                Algorithm::Hrrn,
            ],
            horizon: DEFAULT_HORIZON,
            processes: vec![
                Process::new("P1", 0, 4),
                Process::new("P2", 1, 3),
                Process::new("P3", 2, 2),
            ],
        }
    }
}

/// Process entry as written in a config file. Signed so bad values can be reported by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessEntry {
    pub name: String,
    pub arrival: i64,
    pub service: i64,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl ProcessEntry {
    pub fn into_process(self, index: usize) -> Result<Process, ConfigurationError> {
        Process::checked(index, &self.name, self.arrival, self.service, self.priority)
    }
}

/// `NAME,ARRIVAL,SERVICE[,PRIORITY]`
impl std::str::FromStr for ProcessEntry {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidProcess(s.to_owned());
        let fields: Vec<_> = s.split(',').map(str::trim).collect();

        let (name, arrival, service, priority) = match fields.as_slice() {
            [name, arrival, service] => (name, arrival, service, None),
            [name, arrival, service, priority] => (name, arrival, service, Some(priority)),
            _ => return Err(invalid()),
        };
        if name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            name: (*name).to_owned(),
            arrival: arrival.parse().map_err(|_| invalid())?,
            service: service.parse().map_err(|_| invalid())?,
            priority: priority
                .map(|priority| priority.parse())
                .transpose()
                .map_err(|_| invalid())?,
        })
    }
}

/// Optional overrides read from a JSON file. Missing fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub operation: Option<Operation>,
    pub algorithms: Option<Vec<Algorithm>>,
    pub horizon: Option<i64>,
    pub processes: Option<Vec<ProcessEntry>>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(contents)?)
    }
}

impl SimulationConfig {
    pub fn set_horizon(&mut self, horizon: i64) -> Result<(), ConfigurationError> {
        self.horizon = u32::try_from(horizon)
            .ok()
            .filter(|horizon| (1..=MAX_HORIZON).contains(horizon))
            .ok_or(ConfigurationError::InvalidHorizon(horizon))?;
        Ok(())
    }

    pub fn set_processes(&mut self, entries: Vec<ProcessEntry>) -> Result<(), ConfigurationError> {
        self.processes = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_process(index))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    pub fn apply(&mut self, file: ConfigFile) -> Result<(), ConfigurationError> {
        if let Some(operation) = file.operation {
            self.operation = operation;
        }
        if let Some(algorithms) = file.algorithms {
            self.algorithms = algorithms;
        }
        if let Some(horizon) = file.horizon {
            self.set_horizon(horizon)?;
        }
        if let Some(processes) = file.processes {
            self.set_processes(processes)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.processes.is_empty() {
            return Err(ConfigurationError::EmptyProcessList);
        }
        if self.algorithms.is_empty() {
            return Err(ConfigurationError::EmptyAlgorithmList);
        }
        if !(1..=MAX_HORIZON).contains(&self.horizon) {
            return Err(ConfigurationError::InvalidHorizon(i64::from(self.horizon)));
        }
        for algorithm in &self.algorithms {
            algorithm.validate()?;
        }
        for (index, process) in self.processes.iter().enumerate() {
            process.validate(index)?;
        }

        let sorted = self
            .processes
            .windows(2)
            .all(|pair| pair[0].arrival_time() <= pair[1].arrival_time());
        if !sorted {
            log::warn!("processes are not sorted by arrival time, FCFS will serve them in list order");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_process_entries() {
        let entry: ProcessEntry = "A, 3, 5".parse().unwrap();
        assert_eq!(entry.into_process(0).unwrap(), Process::new("A", 3, 5));

        let entry: ProcessEntry = "B,0,2,7".parse().unwrap();
        assert_eq!(entry.priority, Some(7));

        assert!("B,0".parse::<ProcessEntry>().is_err());
        assert!(",0,1".parse::<ProcessEntry>().is_err());
        assert!("B,x,1".parse::<ProcessEntry>().is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = ConfigFile::parse(
            r#"{
                "operation": "stats",
                "algorithms": ["1", "rr-3", "srt"],
                "processes": [
                    { "name": "A", "arrival": 0, "service": 3 },
                    { "name": "B", "arrival": 2, "service": 6, "priority": 1 }
                ]
            }"#,
        )
        .unwrap();

        let mut config = SimulationConfig::default();
        config.apply(file).unwrap();

        assert_eq!(config.operation, Operation::Stats);
        assert_eq!(config.horizon, DEFAULT_HORIZON);
        assert_eq!(
            config.algorithms,
            vec![
                Algorithm::Fcfs,
                Algorithm::RoundRobin { quantum: 3 },
                Algorithm::Srt
            ]
        );
        assert_eq!(config.processes[1], Process::with_priority("B", 2, 6, 1));
    }

    #[test]
    fn file_errors_name_the_process() {
        let file = ConfigFile::parse(
            r#"{ "processes": [
                { "name": "A", "arrival": 0, "service": 3 },
                { "name": "B", "arrival": -2, "service": 6 }
            ] }"#,
        )
        .unwrap();

        let err = SimulationConfig::default().apply(file).unwrap_err();
        assert_eq!(err.to_string(), "process 1 (B) has negative arrival time -2");
    }

    #[test]
    fn rejects_bad_horizon_and_algorithms() {
        let mut config = SimulationConfig::default();
        assert!(matches!(
            config.set_horizon(-1),
            Err(ConfigurationError::InvalidHorizon(-1))
        ));
        assert!(matches!(
            config.set_horizon(0),
            Err(ConfigurationError::InvalidHorizon(0))
        ));
        assert!(matches!(
            config.set_horizon(4_000_000_000),
            Err(ConfigurationError::InvalidHorizon(4_000_000_000))
        ));
        assert!(config.set_horizon(i64::from(MAX_HORIZON)).is_ok());

        config.horizon = MAX_HORIZON + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidHorizon(_))
        ));
        config.horizon = DEFAULT_HORIZON;

        assert!(matches!(
            ConfigFile::parse(r#"{ "algorithms": ["7"] }"#),
            Err(ConfigurationError::Json(_))
        ));

        config.algorithms.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::EmptyAlgorithmList)
        ));
    }
}
