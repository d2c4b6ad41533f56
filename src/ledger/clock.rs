// Clock - source of the local date and time stamped on transactions

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cell::Cell;

/// Trait for anything that can tell the current local date and time
pub trait Clock {
    /// Current local date and time, truncated to whole seconds
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the machine's local timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A clock pinned to a given instant, movable by hand
///
/// Tests use it to control which calendar day the daily withdrawal limit
/// applies to.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock stopped at the given instant
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Create a clock stopped at a date and time
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(date.and_time(time))
    }

    /// Move the clock to another instant
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock forward by whole days, keeping the time of day
    pub fn advance_days(&self, days: u64) {
        let current = self.now.get();
        let moved = current
            .checked_add_days(chrono::Days::new(days))
            .unwrap_or(current);
        self.now.set(moved);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
