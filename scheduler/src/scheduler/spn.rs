use super::{run_non_preemptive, Process, Schedule, Scheduler};

/// Non-preemptive: the ready process with the shortest service time runs to completion.
pub struct SpnScheduler;

impl Scheduler for SpnScheduler {
    fn name(&self) -> String {
        "Shortest Process Next".to_owned()
    }

    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule {
        // `min_by_key` keeps the first of equal minimums, so ties go to the earliest index.
        run_non_preemptive(processes, horizon, |_, ready| {
            ready
                .min_by_key(|(_, process)| process.service_time())
                .map(|(index, _)| index)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_ready_process_goes_first() {
        let processes = vec![
            Process::new("P1", 0, 4),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 2),
        ];
        let schedule = SpnScheduler.schedule(&processes, 20);
        assert_eq!(schedule.finish_times(), vec![Some(4), Some(9), Some(6)]);
        assert_eq!(
            schedule.timeline.running_instants(1).collect::<Vec<_>>(),
            vec![6, 7, 8]
        );
    }

    #[test]
    fn ties_go_to_earliest_index() {
        let processes = vec![
            Process::new("A", 0, 1),
            Process::new("B", 0, 3),
            Process::new("C", 0, 3),
        ];
        let schedule = SpnScheduler.schedule(&processes, 20);
        assert_eq!(schedule.finish_times(), vec![Some(1), Some(4), Some(7)]);
    }

    #[test]
    fn waits_for_first_arrival() {
        let processes = vec![Process::new("A", 2, 2)];
        let schedule = SpnScheduler.schedule(&processes, 5);
        assert_eq!(schedule.finish_times(), vec![Some(4)]);
        assert_eq!(schedule.timeline.running_instants(0).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn burst_cut_by_horizon_is_incomplete() {
        let processes = vec![Process::new("A", 0, 2), Process::new("B", 0, 5)];
        let schedule = SpnScheduler.schedule(&processes, 4);
        assert_eq!(schedule.finish_times(), vec![Some(2), None]);
        assert_eq!(schedule.timeline.running_instants(1).count(), 2);
    }
}
