use super::{runner::Run, Cell, Completion, Operation, Schedule, Stats};
use crate::config::SimulationConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout, Write},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell as TableCell, Paragraph, Row, Table},
    Terminal,
};

/// Renders one finished run.
pub trait Report {
    fn report(&mut self, config: &SimulationConfig, run: &Run) -> Result<(), io::Error>;
}

/// Plain text trace grid or statistics table.
pub struct TextReport<W> {
    out: W,
    operation: Operation,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W, operation: Operation) -> Self {
        Self { out, operation }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn trace(&mut self, config: &SimulationConfig, run: &Run) -> Result<(), io::Error> {
        let horizon = run.schedule.horizon();
        let width = name_width(config);
        let rule = "-".repeat(width + 2 + horizon as usize * 2);

        write!(self.out, "{:<width$}  ", run.algorithm.to_string())?;
        for instant in 0..horizon {
            write!(self.out, "{} ", instant % 10)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;

        for (index, process) in config.processes.iter().enumerate() {
            write!(self.out, "{:<width$} |", process.name())?;
            for cell in run.schedule.timeline.column(index) {
                write!(self.out, "{}|", cell.as_char())?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "{rule}")
    }

    fn stats(&mut self, config: &SimulationConfig, run: &Run) -> Result<(), io::Error> {
        writeln!(self.out, "{}", run.algorithm)?;
        for row in stats_rows(config, &run.schedule) {
            write!(self.out, "{:<12}", format!("{}:", row[0]))?;
            for value in &row[1..] {
                write!(self.out, "{value:>5} ")?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Report for TextReport<W> {
    fn report(&mut self, config: &SimulationConfig, run: &Run) -> Result<(), io::Error> {
        match self.operation {
            Operation::Trace => self.trace(config, run)?,
            Operation::Stats => self.stats(config, run)?,
        }
        writeln!(self.out)
    }
}

fn name_width(config: &SimulationConfig) -> usize {
    config
        .processes
        .iter()
        .map(|process| process.name().len())
        .max()
        .unwrap_or(0)
        .max(6)
}

/// Rows of the stats table, label first. Incomplete processes show `-`.
fn stats_rows(config: &SimulationConfig, schedule: &Schedule) -> Vec<Vec<String>> {
    let field = |f: fn(&Stats) -> String| -> Vec<String> {
        schedule
            .completions
            .iter()
            .map(|completion| match completion {
                Completion::Finished(stats) => f(stats),
                Completion::Incomplete => "-".to_owned(),
            })
            .collect()
    };

    let names = config.processes.iter().map(|p| p.name().to_owned()).collect();
    let rows: [(&str, Vec<String>); 4] = [
        ("Process", names),
        ("Finish", field(|s| s.finish_time.to_string())),
        ("Turnaround", field(|s| s.turnaround_time.to_string())),
        ("NormTurn", field(|s| format!("{:.2}", s.normalized_turnaround))),
    ];

    rows.into_iter()
        .map(|(label, values)| std::iter::once(label.to_owned()).chain(values).collect())
        .collect()
}

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub enum ViewerEvent {
    Quit,
    Next,
    Previous,
    Toggle,
    None,
}

const TICK_RATE: Duration = Duration::from_millis(200);

/// Full-screen viewer that pages through the runs of a simulation.
pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        log::error!("failed to poll terminal events: {err}");
                        return;
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, input_rx })
    }

    pub fn show(&mut self, config: &SimulationConfig, runs: &[Run]) -> Result<(), io::Error> {
        let mut selected = 0;
        let mut operation = config.operation;

        loop {
            if let Some(run) = runs.get(selected) {
                self.draw(config, run, selected, runs.len(), operation)?;
            }

            match self.get_input() {
                ViewerEvent::Quit => return Ok(()),
                ViewerEvent::Next if selected + 1 < runs.len() => selected += 1,
                ViewerEvent::Previous if selected > 0 => selected -= 1,
                ViewerEvent::Toggle => operation = operation.toggled(),
                _ => {}
            }
        }
    }

    fn draw(
        &mut self,
        config: &SimulationConfig,
        run: &Run,
        position: usize,
        total: usize,
        operation: Operation,
    ) -> Result<(), io::Error> {
        let horizon = run.schedule.horizon();
        let name_width = name_width(config) as u16;

        let (header, rows, widths) = match operation {
            Operation::Trace => {
                let header = std::iter::once("".to_owned())
                    .chain((0..horizon).map(|instant| (instant % 10).to_string()))
                    .collect::<Vec<_>>();
                let rows = config
                    .processes
                    .iter()
                    .enumerate()
                    .map(|(index, process)| {
                        let cells = run.schedule.timeline.column(index).map(|cell| {
                            TableCell::from(cell.as_char().to_string()).style(cell_style(cell))
                        });
                        Row::new(
                            std::iter::once(
                                TableCell::from(process.name().to_owned())
                                    .style(Style::default().add_modifier(Modifier::BOLD)),
                            )
                            .chain(cells)
                            .collect::<Vec<_>>(),
                        )
                    })
                    .collect::<Vec<_>>();
                let widths = std::iter::once(Constraint::Length(name_width))
                    .chain((0..horizon).map(|_| Constraint::Length(1)))
                    .collect::<Vec<_>>();
                (header, rows, widths)
            }
            Operation::Stats => {
                let mut table = stats_rows(config, &run.schedule).into_iter();
                let header = table.next().unwrap_or_default();
                let rows = table.map(Row::new).collect::<Vec<_>>();
                let widths = std::iter::once(Constraint::Length(10))
                    .chain(config.processes.iter().map(|_| Constraint::Length(name_width)))
                    .collect::<Vec<_>>();
                (header, rows, widths)
            }
        };

        // Draw the tui to the terminal
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(f.size());

            let title = Paragraph::new(format!(
                "{}/{} | {} | {} over {} instants | n/p: switch, t: trace/stats, q: quit",
                position + 1,
                total,
                run.name,
                config.processes.len(),
                horizon,
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Algorithm")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(title, chunks[0]);

            let view = match operation {
                Operation::Trace => "Trace",
                Operation::Stats => "Stats",
            };
            let table = Table::new(rows)
                .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
                .widths(&widths)
                .block(Block::default().title(view).borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> ViewerEvent {
        // A closed channel means the input thread is gone, so there's nothing left to wait for
        let Ok(event) = self.input_rx.recv() else {
            return ViewerEvent::Quit;
        };

        if let DisplayEvent::Input(key) = event {
            if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return ViewerEvent::Quit,
                    KeyCode::Char('n') | KeyCode::Right => return ViewerEvent::Next,
                    KeyCode::Char('p') | KeyCode::Left => return ViewerEvent::Previous,
                    KeyCode::Char('t') => return ViewerEvent::Toggle,
                    _ => {}
                };
            }
        }
        ViewerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            log::error!("failed to restore terminal: {err}");
        }
    }
}

fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Running => Style::default().fg(Color::LightYellow),
        Cell::Waiting => Style::default().fg(Color::DarkGray),
        Cell::Idle => Style::default(),
    }
}
