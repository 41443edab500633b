use crate::config::MAX_HORIZON;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no processes to schedule")]
    EmptyProcessList,

    #[error("no algorithms configured")]
    EmptyAlgorithmList,

    #[error("process {index} ({name}) has a service time of 0")]
    ZeroServiceTime { index: usize, name: String },

    #[error("process {index} ({name}) has negative arrival time {arrival}")]
    NegativeArrivalTime {
        index: usize,
        name: String,
        arrival: i64,
    },

    #[error("process {index} ({name}) has negative service time {service}")]
    NegativeServiceTime {
        index: usize,
        name: String,
        service: i64,
    },

    #[error("round robin needs a quantum of at least 1")]
    ZeroQuantum,

    #[error("horizon must be between 1 and {}, got {0}", MAX_HORIZON)]
    InvalidHorizon(i64),

    #[error("unknown algorithm \"{0}\"")]
    UnknownAlgorithm(String),

    #[error("unknown operation \"{0}\", expected trace or stats")]
    UnknownOperation(String),

    #[error("invalid process \"{0}\"")]
    InvalidProcess(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
