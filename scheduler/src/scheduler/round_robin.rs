use super::{Cell, Process, Schedule, Scheduler};
use crate::error::ConfigurationError;
use std::collections::VecDeque;

pub struct RoundRobinScheduler {
    quantum: u32,
}

struct Ready {
    index: usize,
    remaining: u32,
}

/// Admission cursor over processes that haven't entered the ready queue yet.
struct Admissions<'a> {
    processes: &'a [Process],
    next: usize,
}

impl<'a> Admissions<'a> {
    fn new(processes: &'a [Process]) -> Self {
        Self { processes, next: 0 }
    }

    /// Enqueues, in list order, every waiting process that has arrived by `time`.
    fn admit(&mut self, time: u32, queue: &mut VecDeque<Ready>) {
        while let Some(process) = self.processes.get(self.next) {
            if !process.has_arrived(time) {
                break;
            }
            log::trace!("rr: admit {} at {time}", process.name());
            queue.push_back(Ready {
                index: self.next,
                remaining: process.service_time(),
            });
            self.next += 1;
        }
    }
}

impl RoundRobinScheduler {
    pub fn new(quantum: u32) -> Result<Self, ConfigurationError> {
        if quantum == 0 {
            return Err(ConfigurationError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> String {
        format!("Round Robin (quantum {})", self.quantum)
    }

    fn schedule(&self, processes: &[Process], horizon: u32) -> Schedule {
        let mut schedule = Schedule::new(horizon, processes.len());
        let mut queue = VecDeque::new();
        let mut admissions = Admissions::new(processes);
        let mut time = 0;

        admissions.admit(time, &mut queue);

        while time < horizon {
            let Some(mut current) = queue.pop_front() else {
                // CPU idle
                time += 1;
                admissions.admit(time, &mut queue);
                continue;
            };

            let process = &processes[current.index];
            let burst = self.quantum.min(current.remaining);
            log::debug!("rr: {} runs {burst} from {time}", process.name());

            let mut served = 0;
            while served < burst && time < horizon {
                schedule.timeline.mark(time, current.index, Cell::Running);
                time += 1;
                served += 1;
                // Arrivals during the burst queue up ahead of the preempted process.
                admissions.admit(time, &mut queue);
            }
            current.remaining -= served;

            if current.remaining > 0 {
                queue.push_back(current);
            } else {
                schedule.finish(current.index, process, time);
            }
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 4),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 2),
        ]
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert!(matches!(
            RoundRobinScheduler::new(0),
            Err(ConfigurationError::ZeroQuantum)
        ));
    }

    #[test]
    fn quantum_two_trace() {
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&processes(), 20);
        assert_eq!(schedule.finish_times(), vec![Some(8), Some(9), Some(6)]);

        let timeline = &schedule.timeline;
        assert_eq!(timeline.running_instants(0).collect::<Vec<_>>(), vec![0, 1, 6, 7]);
        assert_eq!(timeline.running_instants(1).collect::<Vec<_>>(), vec![2, 3, 8]);
        assert_eq!(timeline.running_instants(2).collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn quantum_one_alternates() {
        let processes = vec![Process::new("A", 0, 2), Process::new("B", 0, 2)];
        let schedule = RoundRobinScheduler::new(1).unwrap().schedule(&processes, 10);
        assert_eq!(schedule.timeline.running_instants(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(schedule.timeline.running_instants(1).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(schedule.finish_times(), vec![Some(3), Some(4)]);
    }

    #[test]
    fn arrival_mid_burst_goes_ahead_of_preempted_process() {
        // B arrives in the middle of A's 3-instant burst.
        let processes = vec![Process::new("A", 0, 5), Process::new("B", 1, 1)];
        let schedule = RoundRobinScheduler::new(3).unwrap().schedule(&processes, 10);
        assert_eq!(schedule.timeline.running_instants(1).collect::<Vec<_>>(), vec![3]);
        assert_eq!(schedule.finish_times(), vec![Some(6), Some(4)]);
    }

    #[test]
    fn idles_until_first_arrival() {
        let processes = vec![Process::new("A", 3, 2)];
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&processes, 10);
        assert_eq!(schedule.timeline.running_instants(0).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(schedule.finish_times(), vec![Some(5)]);
    }

    #[test]
    fn unfinished_work_at_horizon_is_incomplete() {
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&processes(), 7);
        assert_eq!(schedule.finish_times(), vec![None, None, Some(6)]);
        assert_eq!(schedule.timeline.running_instants(0).count(), 3);
    }
}
