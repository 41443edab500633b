mod display;
mod fcfs;
mod hrrn;
mod process;
mod round_robin;
mod runner;
mod spn;
mod srt;
mod timeline;

use crate::error::ConfigurationError;
use serde::Deserialize;
use std::{fmt, str::FromStr};

pub use display::{DisplayTerminal, Report, TextReport};
pub use fcfs::FcfsScheduler;
pub use hrrn::HrrnScheduler;
pub use process::Process;
pub use round_robin::RoundRobinScheduler;
pub use runner::{Run, Simulation};
pub use spn::SpnScheduler;
pub use srt::SrtScheduler;
pub use timeline::{Cell, Completion, Schedule, Stats, Timeline};

pub trait Scheduler {
    fn name(&self) -> String;

    /// Simulates `processes` over `[0, horizon)`. Every call starts from a blank schedule.
    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule;
}

/// Runs whichever process `select` picks to completion, idling one instant when nothing is ready.
/// `select` sees the clock and the arrived, unfinished processes in list order.
fn run_non_preemptive<F>(processes: &[Process], horizon: u32, select: F) -> Schedule
where
    F: Fn(u32, &mut dyn Iterator<Item = (usize, &Process)>) -> Option<usize>,
{
    let mut schedule = Schedule::new(horizon, processes.len());
    let mut done = vec![false; processes.len()];
    let mut time = 0;

    while time < horizon {
        let mut ready = processes
            .iter()
            .enumerate()
            .filter(|&(index, process)| !done[index] && process.has_arrived(time));

        let Some(selected) = select(time, &mut ready) else {
            log::trace!("idle at {time}");
            time += 1;
            continue;
        };

        let process = &processes[selected];
        log::debug!("{} selected at {time}", process.name());

        let end = time.saturating_add(process.service_time());
        schedule.timeline.mark_range(time, end, selected, Cell::Running);
        time = end.min(horizon);
        schedule.finish(selected, process, end);
        done[selected] = true;
    }
    schedule
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    RoundRobin { quantum: u32 },
    Spn,
    Srt,
    Hrrn,
}

impl Algorithm {
    pub fn scheduler(&self) -> Result<Box<dyn Scheduler + Send>, ConfigurationError> {
        let scheduler: Box<dyn Scheduler + Send> = match *self {
            Algorithm::Fcfs => Box::new(FcfsScheduler),
            Algorithm::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum)?),
            Algorithm::Spn => Box::new(SpnScheduler),
            Algorithm::Srt => Box::new(SrtScheduler),
            Algorithm::Hrrn => Box::new(HrrnScheduler),
        };
        Ok(scheduler)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.scheduler().map(drop)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Fcfs => write!(f, "FCFS"),
            Algorithm::RoundRobin { quantum } => write!(f, "RR-{quantum}"),
            Algorithm::Spn => write!(f, "SPN"),
            Algorithm::Srt => write!(f, "SRT"),
            Algorithm::Hrrn => write!(f, "HRRN"),
        }
    }
}

/// Accepts the selector codes `1`, `2-<quantum>`, `3`, `4`, `5` or the
/// names `fcfs`, `rr-<quantum>`, `spn`, `srt`, `hrrn`.
impl FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (kind, quantum) = match s.split_once('-') {
            Some((kind, quantum)) => (kind, Some(quantum)),
            None => (s.as_str(), None),
        };

        let unknown = || ConfigurationError::UnknownAlgorithm(s.clone());
        let algorithm = match (kind, quantum) {
            ("1" | "fcfs", None) => Algorithm::Fcfs,
            ("2" | "rr", Some(quantum)) => Algorithm::RoundRobin {
                quantum: quantum.parse().map_err(|_| unknown())?,
            },
            ("3" | "spn", None) => Algorithm::Spn,
            ("4" | "srt", None) => Algorithm::Srt,
            ("5" | "hrrn", None) => Algorithm::Hrrn,
            _ => return Err(unknown()),
        };
        algorithm.validate()?;
        Ok(algorithm)
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Trace,
    Stats,
}

impl Operation {
    pub fn toggled(self) -> Self {
        match self {
            Operation::Trace => Operation::Stats,
            Operation::Stats => Operation::Trace,
        }
    }
}

impl FromStr for Operation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Operation::Trace),
            "stats" => Ok(Operation::Stats),
            other => Err(ConfigurationError::UnknownOperation(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_codes() {
        assert_eq!("1".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!(
            "2-4".parse::<Algorithm>().unwrap(),
            Algorithm::RoundRobin { quantum: 4 }
        );
        assert_eq!("3".parse::<Algorithm>().unwrap(), Algorithm::Spn);
        assert_eq!("SRT".parse::<Algorithm>().unwrap(), Algorithm::Srt);
        assert_eq!(" hrrn ".parse::<Algorithm>().unwrap(), Algorithm::Hrrn);
        assert_eq!(
            "rr-1".parse::<Algorithm>().unwrap(),
            Algorithm::RoundRobin { quantum: 1 }
        );
    }

    #[test]
    fn rejects_bad_selectors() {
        assert!(matches!(
            "2".parse::<Algorithm>(),
            Err(ConfigurationError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            "2-0".parse::<Algorithm>(),
            Err(ConfigurationError::ZeroQuantum)
        ));
        assert!(matches!(
            "6".parse::<Algorithm>(),
            Err(ConfigurationError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            "1-2".parse::<Algorithm>(),
            Err(ConfigurationError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for algorithm in [
            Algorithm::Fcfs,
            Algorithm::RoundRobin { quantum: 3 },
            Algorithm::Spn,
            Algorithm::Srt,
            Algorithm::Hrrn,
        ] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }
}
