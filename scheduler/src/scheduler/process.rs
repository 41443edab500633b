use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    name: String,
    arrival_time: u32,
    service_time: u32,
    priority: Option<i32>,
}

impl Process {
    pub fn new(name: &str, arrival_time: u32, service_time: u32) -> Self {
        Self {
            name: name.to_owned(),
            arrival_time,
            service_time,
            priority: None,
        }
    }

    pub fn with_priority(name: &str, arrival_time: u32, service_time: u32, priority: i32) -> Self {
        Self {
            priority: Some(priority),
            ..Process::new(name, arrival_time, service_time)
        }
    }

    /// Builds a process from signed values, rejecting anything a schedule can't be computed for.
    pub fn checked(
        index: usize,
        name: &str,
        arrival_time: i64,
        service_time: i64,
        priority: Option<i32>,
    ) -> Result<Self, ConfigurationError> {
        if arrival_time < 0 {
            return Err(ConfigurationError::NegativeArrivalTime {
                index,
                name: name.to_owned(),
                arrival: arrival_time,
            });
        }
        if service_time < 0 {
            return Err(ConfigurationError::NegativeServiceTime {
                index,
                name: name.to_owned(),
                service: service_time,
            });
        }

        let arrival_time = u32::try_from(arrival_time)
            .map_err(|_| ConfigurationError::InvalidProcess(format!("{name}: arrival too large")))?;
        let service_time = u32::try_from(service_time)
            .map_err(|_| ConfigurationError::InvalidProcess(format!("{name}: service too large")))?;

        let process = Self {
            name: name.to_owned(),
            arrival_time,
            service_time,
            priority,
        };
        process.validate(index)?;
        Ok(process)
    }

    pub fn validate(&self, index: usize) -> Result<(), ConfigurationError> {
        if self.service_time == 0 {
            return Err(ConfigurationError::ZeroServiceTime {
                index,
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    pub fn service_time(&self) -> u32 {
        self.service_time
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub fn has_arrived(&self, time: u32) -> bool {
        self.arrival_time <= time
    }

    /// `(wait + service) / service` at `time`. Never below 1 once the process has arrived.
    pub fn response_ratio(&self, time: u32) -> f64 {
        let wait = time.saturating_sub(self.arrival_time);
        (f64::from(wait) + f64::from(self.service_time)) / f64::from(self.service_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_ratio_grows_while_waiting() {
        let process = Process::new("P", 2, 4);
        assert_eq!(process.response_ratio(2), 1.0);
        assert_eq!(process.response_ratio(6), 2.0);
        assert!(process.response_ratio(7) > process.response_ratio(6));

        let huge = Process::new("H", 0, u32::MAX);
        assert_eq!(huge.response_ratio(u32::MAX), 2.0);
    }

    #[test]
    fn checked_rejects_bad_values() {
        assert!(matches!(
            Process::checked(1, "P2", -1, 3, None),
            Err(ConfigurationError::NegativeArrivalTime { index: 1, arrival: -1, .. })
        ));
        assert!(matches!(
            Process::checked(0, "P1", 0, 0, None),
            Err(ConfigurationError::ZeroServiceTime { index: 0, .. })
        ));
        assert!(matches!(
            Process::checked(0, "P1", 0, -5, None),
            Err(ConfigurationError::NegativeServiceTime { service: -5, .. })
        ));

        let process = Process::checked(0, "P1", 3, 5, Some(2)).unwrap();
        assert_eq!(process, Process::with_priority("P1", 3, 5, 2));
    }
}
