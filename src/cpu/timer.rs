// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Delay and sound timers, decremented by wall-clock time

use std::time::{Duration, Instant};

/// The delay and sound timers
///
/// Both count down by one per elapsed whole second since they were last sampled.
/// The fractional part of a second is carried over to the next sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer, readable by the program
    pub delay: u8,
    /// Sound timer, write-only to the program
    pub sound: u8,
    last: Instant,
}

impl Timers {
    /// Creates a pair of stopped timers, sampled at `now`
    pub fn new(now: Instant) -> Self {
        Timers {
            delay: 0,
            sound: 0,
            last: now,
        }
    }

    /// Decrements the timers by the number of whole seconds elapsed since the last sample
    ///
    /// Returns the number of seconds consumed.
    /// # Examples
    /// ```rust
    /// # use chirp_term::cpu::timer::Timers;
    /// # use std::time::{Duration, Instant};
    /// let start = Instant::now();
    /// let mut timers = Timers::new(start);
    /// timers.delay = 5;
    /// timers.update(start + Duration::from_millis(3400));
    /// assert_eq!(2, timers.delay);
    /// ```
    pub fn update(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        if secs > 0 {
            let step = secs.min(u8::MAX as u64) as u8;
            self.delay = self.delay.saturating_sub(step);
            self.sound = self.sound.saturating_sub(step);
            self.last += Duration::from_secs(secs);
        }
        secs
    }

    /// Restarts the sampling clock without touching the counters
    pub fn resync(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_floors_to_whole_seconds() {
        let start = Instant::now();
        let mut timers = Timers::new(start);
        timers.delay = 5;
        assert_eq!(3, timers.update(start + Duration::from_millis(3400)));
        assert_eq!(2, timers.delay);
        // cumulative 5.0 seconds: the carried 0.4 makes up the second second
        assert_eq!(2, timers.update(start + Duration::from_millis(5000)));
        assert_eq!(0, timers.delay);
        timers.update(start + Duration::from_secs(60));
        assert_eq!(0, timers.delay);
    }

    #[test]
    fn sub_second_samples_do_nothing() {
        let start = Instant::now();
        let mut timers = Timers::new(start);
        timers.delay = 1;
        for ms in (0..1000).step_by(100) {
            assert_eq!(0, timers.update(start + Duration::from_millis(ms)));
            assert_eq!(1, timers.delay);
        }
        timers.update(start + Duration::from_millis(1000));
        assert_eq!(0, timers.delay);
    }

    #[test]
    fn sound_decays_with_delay() {
        let start = Instant::now();
        let mut timers = Timers::new(start);
        (timers.delay, timers.sound) = (10, 3);
        timers.update(start + Duration::from_secs(4));
        assert_eq!((6, 0), (timers.delay, timers.sound));
    }

    #[test]
    fn long_gaps_saturate() {
        let start = Instant::now();
        let mut timers = Timers::new(start);
        (timers.delay, timers.sound) = (0xff, 0xff);
        timers.update(start + Duration::from_secs(1000));
        assert_eq!((0, 0), (timers.delay, timers.sound));
    }

    #[test]
    fn samples_from_the_past_are_ignored() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut timers = Timers::new(start);
        timers.delay = 4;
        assert_eq!(0, timers.update(start - Duration::from_secs(5)));
        assert_eq!(4, timers.delay);
    }
}
