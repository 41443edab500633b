use super::Process;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Idle,
    Running,
    Waiting,
}

impl Cell {
    pub fn as_char(self) -> char {
        match self {
            Cell::Idle => ' ',
            Cell::Running => '*',
            Cell::Waiting => '.',
        }
    }
}

/// Occupancy of every process at every instant in `[0, horizon)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    horizon: u32,
    cells: Vec<Vec<Cell>>,
}

impl Timeline {
    pub fn new(horizon: u32, process_count: usize) -> Self {
        Self {
            horizon,
            cells: vec![vec![Cell::Idle; process_count]; horizon as usize],
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn get(&self, instant: u32, process: usize) -> Cell {
        self.cells
            .get(instant as usize)
            .and_then(|row| row.get(process))
            .copied()
            .unwrap_or(Cell::Idle)
    }

    /// Marks one cell. Instants at or past the horizon are dropped.
    pub fn mark(&mut self, instant: u32, process: usize, cell: Cell) {
        if let Some(slot) = self
            .cells
            .get_mut(instant as usize)
            .and_then(|row| row.get_mut(process))
        {
            *slot = cell;
        }
    }

    /// Marks `[start, end)` clipped to the horizon.
    pub fn mark_range(&mut self, start: u32, end: u32, process: usize, cell: Cell) {
        for instant in start..end.min(self.horizon) {
            self.mark(instant, process, cell);
        }
    }

    pub fn column(&self, process: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .map(move |row| row.get(process).copied().unwrap_or(Cell::Idle))
    }

    pub fn running_instants(&self, process: usize) -> impl Iterator<Item = u32> + '_ {
        self.column(process)
            .enumerate()
            .filter(|&(_, cell)| cell == Cell::Running)
            .map(|(instant, _)| instant as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub finish_time: u32,
    pub turnaround_time: u32,
    pub normalized_turnaround: f64,
}

impl Stats {
    pub fn new(process: &Process, finish_time: u32) -> Self {
        let turnaround_time = finish_time - process.arrival_time();
        Self {
            finish_time,
            turnaround_time,
            normalized_turnaround: turnaround_time as f64 / process.service_time() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    Finished(Stats),
    /// The horizon was reached before the process got all of its service.
    Incomplete,
}

impl Completion {
    pub fn stats(&self) -> Option<&Stats> {
        match self {
            Completion::Finished(stats) => Some(stats),
            Completion::Incomplete => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Completion::Finished(_))
    }
}

/// Everything one policy run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub timeline: Timeline,
    pub completions: Vec<Completion>,
}

impl Schedule {
    pub fn new(horizon: u32, process_count: usize) -> Self {
        Self {
            timeline: Timeline::new(horizon, process_count),
            completions: vec![Completion::Incomplete; process_count],
        }
    }

    pub fn horizon(&self) -> u32 {
        self.timeline.horizon()
    }

    /// Records a finish, unless it lies past the horizon.
    pub fn finish(&mut self, index: usize, process: &Process, finish_time: u32) {
        if finish_time > self.horizon() {
            log::debug!(
                "{} would finish at {} past horizon {}",
                process.name(),
                finish_time,
                self.horizon()
            );
            return;
        }
        if let Some(slot) = self.completions.get_mut(index) {
            *slot = Completion::Finished(Stats::new(process, finish_time));
        }
    }

    pub fn stats(&self, index: usize) -> Option<&Stats> {
        self.completions.get(index).and_then(Completion::stats)
    }

    pub fn finish_times(&self) -> Vec<Option<u32>> {
        self.completions
            .iter()
            .map(|completion| completion.stats().map(|stats| stats.finish_time))
            .collect()
    }

    pub fn incomplete(&self) -> impl Iterator<Item = usize> + '_ {
        self.completions
            .iter()
            .enumerate()
            .filter(|(_, completion)| !completion.is_finished())
            .map(|(index, _)| index)
    }
}
