use super::{run_non_preemptive, Process, Schedule, Scheduler};

/// Non-preemptive: the ready process with the highest `(wait + service) / service` runs next.
pub struct HrrnScheduler;

impl Scheduler for HrrnScheduler {
    fn name(&self) -> String {
        "Highest Response Ratio Next".to_owned()
    }

    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule {
        run_non_preemptive(processes, horizon, |time, ready| {
            let mut selected: Option<(usize, f64)> = None;
            for (index, process) in ready {
                let ratio = process.response_ratio(time);
                log::trace!("hrrn: {} ratio {ratio:.3} at {time}", process.name());
                // Strictly greater, so the earliest index wins ties.
                if selected.map_or(true, |(_, best)| ratio > best) {
                    selected = Some((index, ratio));
                }
            }
            selected.map(|(index, _)| index)
        })
    }
}
