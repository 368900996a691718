//! Playback clock: play/pause state and elapsed-time computation.

use std::time::Instant;

/// Per-instance playback bookkeeping.
///
/// Elapsed time is recomputed from the wall clock on every read; no
/// elapsed-at-pause offset is persisted. `play()` always restarts from t=0,
/// both on the initial start and on a loop reset. The wall-clock read is the
/// only I/O in the core.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    start_timestamp: Instant,
    running: bool,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            start_timestamp: Instant::now(),
            running: false,
        }
    }

    /// Start (or restart) playback from t=0.
    pub fn play(&mut self) {
        self.running = true;
        self.start_timestamp = Instant::now();
    }

    /// Stop advancing. The start timestamp is left untouched, so
    /// `current_time` keeps reflecting wall-clock distance from the last
    /// play/reset.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Seconds since the last `play()` or loop reset.
    #[inline]
    pub fn current_time(&self) -> f32 {
        self.start_timestamp.elapsed().as_secs_f32()
    }

    /// Whether the driver should tick this instance.
    #[inline]
    pub fn should_tick(&self) -> bool {
        self.running
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_restarts_near_zero() {
        let mut clock = PlaybackClock::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        clock.play();
        assert!(clock.should_tick());
        assert!(clock.current_time() < 0.005);
    }

    #[test]
    fn current_time_is_monotonic_while_running() {
        let mut clock = PlaybackClock::new();
        clock.play();
        let t0 = clock.current_time();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let t1 = clock.current_time();
        assert!(t1 >= t0);
    }

    #[test]
    fn pause_clears_should_tick() {
        let mut clock = PlaybackClock::new();
        clock.play();
        clock.pause();
        assert!(!clock.should_tick());
    }
}
