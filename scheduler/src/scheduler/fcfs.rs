use super::{Cell, Process, Schedule, Scheduler};

/// Serves processes strictly in list order. The list is assumed to be sorted by arrival.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> String {
        "First Come First Served".to_owned()
    }

    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule {
        let mut schedule = Schedule::new(horizon, processes.len());
        let mut time = processes.first().map_or(0, Process::arrival_time);

        for (index, process) in processes.iter().enumerate() {
            let start = time.max(process.arrival_time());
            let end = start.saturating_add(process.service_time());
            log::debug!("fcfs: {} runs [{start}, {end})", process.name());

            schedule
                .timeline
                .mark_range(process.arrival_time(), start, index, Cell::Waiting);
            schedule.timeline.mark_range(start, end, index, Cell::Running);
            schedule.finish(index, process, end);
            time = end;
        }
        schedule
    }
}
