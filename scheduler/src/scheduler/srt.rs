use super::{Cell, Process, Schedule, Scheduler};

/// Preemptive SPN: every instant goes to the ready process with the least remaining service.
pub struct SrtScheduler;

impl Scheduler for SrtScheduler {
    fn name(&self) -> String {
        "Shortest Remaining Time".to_owned()
    }

    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule {
        let mut schedule = Schedule::new(horizon, processes.len());
        let mut remaining: Vec<u32> = processes.iter().map(Process::service_time).collect();

        for time in 0..horizon {
            let selected = processes
                .iter()
                .enumerate()
                .filter(|&(index, process)| remaining[index] > 0 && process.has_arrived(time))
                .min_by_key(|&(index, _)| remaining[index])
                .map(|(index, _)| index);

            let Some(selected) = selected else {
                log::trace!("srt: idle at {time}");
                continue;
            };

            schedule.timeline.mark(time, selected, Cell::Running);
            remaining[selected] -= 1;
            if remaining[selected] == 0 {
                let process = &processes[selected];
                log::debug!("srt: {} done at {}", process.name(), time + 1);
                schedule.finish(selected, process, time + 1);
            }
        }
        schedule
    }
}
