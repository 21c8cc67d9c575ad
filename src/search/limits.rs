use std::time::{Duration, Instant};

/// Bounds on the amount of work a search may do. By default a search is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchLimits {
    /// The maximum number of states to examine
    pub max_examined: Option<usize>,
    /// The maximum wall-clock time to search
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn max_examined(mut self, max: usize) -> Self {
        self.max_examined = Some(max);
        self
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Returns true if a search that started at `start` and has examined `examined`
    /// states must stop
    pub(crate) fn exceeded(&self, examined: usize, start: Instant) -> bool {
        if let Some(max) = self.max_examined {
            if examined >= max {
                return true;
            }
        }
        if let Some(limit) = self.time_limit {
            if start.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::SearchLimits;

    #[test]
    fn unlimited_is_never_exceeded() {
        assert!(!SearchLimits::unlimited().exceeded(usize::MAX, Instant::now()));
    }

    #[test]
    fn max_examined() {
        let limits = SearchLimits::unlimited().max_examined(10);
        assert!(!limits.exceeded(9, Instant::now()));
        assert!(limits.exceeded(10, Instant::now()));
    }

    #[test]
    fn zero_time_limit() {
        let limits = SearchLimits::unlimited().time_limit(Duration::from_secs(0));
        assert!(limits.exceeded(0, Instant::now()));
    }
}
