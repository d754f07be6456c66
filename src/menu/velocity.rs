use crate::menu::geometry::Point;
use crate::menu::{SPEED_SAMPLES, SPEED_TOLERANCE};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Cursor is moving fast; only slice selection applies.
    #[default]
    Gesture,
    /// Cursor came to rest; column items become selectable.
    Settled,
}

#[derive(Debug, Clone, Copy, Default)]
struct Step {
    distance: f64,
    elapsed: Duration,
}

/// Fixed-capacity ring of the most recent steps. Once full, each push
/// overwrites the oldest entry.
#[derive(Debug, Clone)]
struct StepRing {
    steps: [Step; SPEED_SAMPLES],
    head: usize,
    len: usize,
}

impl Default for StepRing {
    fn default() -> Self {
        Self {
            steps: [Step::default(); SPEED_SAMPLES],
            head: 0,
            len: 0,
        }
    }
}

impl StepRing {
    fn push(&mut self, step: Step) {
        self.steps[self.head] = step;
        self.head = (self.head + 1) % SPEED_SAMPLES;
        self.len = (self.len + 1).min(SPEED_SAMPLES);
    }

    fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn is_full(&self) -> bool {
        self.len == SPEED_SAMPLES
    }

    /// Stored steps; order is irrelevant to the averages taken here.
    fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps[..self.len].iter()
    }
}

/// Decides whether the user is still flicking toward a slice or has paused.
///
/// Speed is the mean per-tick cursor displacement over the last
/// [`SPEED_SAMPLES`] ticks. It is not divided by the elapsed time: polling runs
/// at a fixed cadence, so displacement per tick already is the speed.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    mode: Mode,
    ring: StepRing,
    origin: Point,
    started: Option<Instant>,
    last: Option<(Point, Instant)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new session anchored at `origin`.
    pub fn start(&mut self, origin: Point, now: Instant) {
        self.mode = Mode::Gesture;
        self.ring.clear();
        self.origin = origin;
        self.started = Some(now);
        self.last = None;
    }

    /// Records a cursor sample. Returns `true` on the tick the tracker settles.
    pub fn sample(&mut self, pos: Point, time: Instant) -> bool {
        if self.mode == Mode::Settled {
            return false;
        }

        let Some((last_pos, last_time)) = self.last.replace((pos, time)) else {
            return false;
        };

        self.ring.push(Step {
            distance: last_pos.distance(pos),
            elapsed: time.saturating_duration_since(last_time),
        });

        if self.ring.is_full() && self.mean_speed() < SPEED_TOLERANCE {
            log::debug!(
                "Cursor settled after {:?}, mean tick {:?}",
                self.started.map(|s| time.saturating_duration_since(s)),
                self.mean_interval()
            );
            self.mode = Mode::Settled;
            return true;
        }
        false
    }

    pub fn mean_speed(&self) -> f64 {
        if self.ring.len == 0 {
            return 0.0;
        }
        self.ring.iter().map(|s| s.distance).sum::<f64>() / self.ring.len as f64
    }

    /// Average time between samples, useful for spotting a starved timer.
    pub fn mean_interval(&self) -> Duration {
        match u32::try_from(self.ring.len) {
            Ok(n) if n > 0 => self.ring.iter().map(|s| s.elapsed).sum::<Duration>() / n,
            _ => Duration::ZERO,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_gesture(&self) -> bool {
        self.mode == Mode::Gesture
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn sample_count(&self) -> usize {
        self.ring.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(tracker: &mut VelocityTracker, steps: usize, dx: f64, dt: Duration) -> Option<usize> {
        let start = Instant::now();
        tracker.start(Point::default(), start);
        let mut settled_at = None;
        // one extra sample: the first only primes the tracker
        for i in 0..=steps {
            let pos = Point::new(i as f64 * dx, 0.0);
            if tracker.sample(pos, start + dt * i as u32) && settled_at.is_none() {
                settled_at = Some(i);
            }
        }
        settled_at
    }

    #[test]
    fn test_first_sample_only_primes() {
        let mut tracker = VelocityTracker::new();
        let now = Instant::now();
        tracker.start(Point::default(), now);
        assert!(!tracker.sample(Point::new(5.0, 5.0), now));
        assert_eq!(tracker.sample_count(), 0);
    }

    #[test]
    fn test_still_cursor_settles_once_ring_fills() {
        let mut tracker = VelocityTracker::new();
        let settled_at = feed(&mut tracker, SPEED_SAMPLES, 0.0, Duration::from_millis(2));
        assert_eq!(settled_at, Some(SPEED_SAMPLES));
        assert_eq!(tracker.mode(), Mode::Settled);
    }

    #[test]
    fn test_fast_cursor_never_settles() {
        let mut tracker = VelocityTracker::new();
        let settled_at = feed(&mut tracker, SPEED_SAMPLES * 3, 100.0, Duration::from_secs(1));
        assert_eq!(settled_at, None);
        assert!(tracker.is_gesture());
        assert_eq!(tracker.sample_count(), SPEED_SAMPLES);
        assert_eq!(tracker.mean_speed(), 100.0);
        assert_eq!(tracker.mean_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_old_motion_ages_out() {
        let mut tracker = VelocityTracker::new();
        let start = Instant::now();
        tracker.start(Point::default(), start);
        let dt = Duration::from_millis(2);

        tracker.sample(Point::default(), start);
        tracker.sample(Point::new(50.0, 0.0), start + dt);
        let mut settled = false;
        for i in 2..=(SPEED_SAMPLES as u32 + 1) {
            settled |= tracker.sample(Point::new(50.0, 0.0), start + dt * i);
        }
        assert!(settled, "mean speed {}", tracker.mean_speed());
    }

    #[test]
    fn test_settled_is_sticky_until_restart() {
        let mut tracker = VelocityTracker::new();
        feed(&mut tracker, SPEED_SAMPLES, 0.0, Duration::from_millis(2));
        assert!(!tracker.sample(Point::new(500.0, 500.0), Instant::now()));
        assert_eq!(tracker.mode(), Mode::Settled);

        tracker.start(Point::new(1.0, 1.0), Instant::now());
        assert!(tracker.is_gesture());
        assert_eq!(tracker.sample_count(), 0);
        assert_eq!(tracker.origin(), Point::new(1.0, 1.0));
    }
}
