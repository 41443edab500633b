use clap::Parser;
use cpu_scheduler::{
    config::{ConfigFile, ProcessEntry, SimulationConfig},
    scheduler::{Algorithm, DisplayTerminal, Operation, Simulation, TextReport},
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use std::{error::Error, io, path::PathBuf};

/// Simulate CPU scheduling policies over a fixed set of processes.
#[derive(Parser, Debug)]
#[command(name = "cpu-scheduler")]
struct Cli {
    /// JSON file with `operation`, `algorithms`, `horizon` and `processes`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the per-instant trace or the completion statistics.
    #[arg(long)]
    mode: Option<Operation>,

    /// Comma separated algorithms, e.g. `1,2-4,3,4,5` or `fcfs,rr-2,spn`.
    #[arg(long, value_delimiter = ',')]
    algorithms: Option<Vec<Algorithm>>,

    /// Number of instants to simulate.
    #[arg(long, allow_hyphen_values = true)]
    horizon: Option<i64>,

    /// `NAME,ARRIVAL,SERVICE[,PRIORITY]`, in arrival order. Repeat for each process.
    #[arg(long = "process", allow_hyphen_values = true)]
    processes: Vec<ProcessEntry>,

    /// Browse the runs in a full-screen terminal view.
    #[arg(long)]
    interactive: bool,

    /// Run every algorithm on its own thread.
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn into_config(self) -> Result<SimulationConfig, Box<dyn Error>> {
        let mut config = SimulationConfig::default();

        if let Some(path) = &self.config {
            config.apply(ConfigFile::load(path)?)?;
        }
        if let Some(operation) = self.mode {
            config.operation = operation;
        }
        if let Some(algorithms) = self.algorithms {
            config.algorithms = algorithms;
        }
        if let Some(horizon) = self.horizon {
            config.set_horizon(horizon)?;
        }
        if !self.processes.is_empty() {
            config.set_processes(self.processes)?;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let interactive = cli.interactive;
    let parallel = cli.parallel;

    let simulation = Simulation::new(cli.into_config()?)?;
    let runs = if parallel {
        simulation.run_parallel()?
    } else {
        simulation.run()?
    };

    if interactive {
        execute!(io::stdout(), Clear(ClearType::All))?;
        {
            let mut terminal = DisplayTerminal::new()?;
            terminal.show(simulation.config(), &runs)?;
        }
        execute!(io::stdout(), Clear(ClearType::All))?;
    } else {
        let mut report = TextReport::new(io::stdout().lock(), simulation.config().operation);
        simulation.report(&runs, &mut report)?;
    }
    Ok(())
}
