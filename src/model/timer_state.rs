use std::time::{Duration, Instant};

/// Wall-clock bookkeeping for a round in progress. Timestamps come from the
/// caller so the session can drive it from any clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub started_timestamp: Instant,
    pub ended_timestamp: Option<Instant>,
}

impl TimerState {
    pub fn started_at(now: Instant) -> TimerState {
        TimerState {
            started_timestamp: now,
            ended_timestamp: None,
        }
    }

    #[cfg(test)]
    pub fn is_ended(&self) -> bool {
        self.ended_timestamp.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.ended_timestamp
            .unwrap_or(now)
            .saturating_duration_since(self.started_timestamp)
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        u64::try_from(self.elapsed(now).as_millis()).unwrap_or(u64::MAX)
    }

    pub fn ended(&self, now: Instant) -> TimerState {
        let mut new_state = self.clone();
        if new_state.ended_timestamp.is_none() {
            new_state.ended_timestamp = Some(now);
        }
        new_state
    }
}
