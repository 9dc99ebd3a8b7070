use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, FixedOffset, Local};

/// Wall clock that never runs backwards within one process.
#[derive(Debug)]
pub struct MonotonicClock {
    last: Mutex<DateTime<Local>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { last: Mutex::new(Local::now()) }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if now > *last {
            *last = now;
        }
        last.fixed_offset()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_never_decrease() {
        let clock = MonotonicClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let current = clock.now();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn clock_set_back_keeps_last_reading() {
        let clock = MonotonicClock::new();
        let ahead = Local::now() + chrono::Duration::hours(1);
        *clock.last.lock().unwrap() = ahead;

        assert_eq!(clock.now(), ahead.fixed_offset());
    }
}
