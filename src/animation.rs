//! A time-driven animation between 0 and 1.
//!
//! An [`Animation`] does not own a timer. Its owner calls [`Animation::advance`]
//! with the time elapsed since the last frame, for as long as
//! [`Animation::is_running`] returns true.

use std::time::Duration;

use tracing::trace;

use crate::types::Direction;

/// The shape of an animation's value over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// The value is the progress.
    Linear,
    /// Quadratic acceleration up to the midpoint, then deceleration.
    #[default]
    InOutQuad,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Emitted to an animation's observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The animation advanced to this progress.
    Tick(f64),
    /// The animation reached its boundary and stopped.
    Finished(f64),
}

/// An animation of a scalar between 0 and 1.
///
/// Running [`Forward`](Direction::Forward), the progress rises towards 1;
/// running [`Backward`](Direction::Backward), it falls towards 0.
/// Reversing the direction of a running animation keeps its progress.
#[derive(custom_debug_derive::Debug)]
pub struct Animation {
    duration: Duration,
    // Elapsed time along the forward timeline. Kept as a Duration so that
    // ticks adding up to `duration` land exactly on the boundary.
    position: Duration,
    progress: f64,
    direction: Direction,
    running: bool,
    enabled: bool,
    easing: Easing,
    #[debug(skip)]
    observer: Option<Box<dyn FnMut(AnimationEvent)>>,
}

impl Animation {
    /// Creates a new, idle animation at progress 0.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
            progress: 0.0,
            direction: Direction::Forward,
            running: false,
            enabled: true,
            easing: Easing::default(),
            observer: None,
        }
    }

    /// Sets the easing curve applied by [`value`](Animation::value).
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Registers a callback invoked on every tick, and once more when the
    /// animation stops.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(AnimationEvent) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// The linear progress, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The eased progress, in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.easing.apply(self.progress)
    }

    /// Whether the animation needs further ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The direction the animation runs in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The time a full run takes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether [`start`](Animation::start) has any effect.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the animation.
    ///
    /// Disabling a running animation stops it where it is.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.running = false;
        }
    }

    /// Sets the direction to run in.
    ///
    /// A running animation turns around without resetting its progress.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Changes the duration, keeping the current progress.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.position = duration.mul_f64(self.progress);
        if self.running && duration.is_zero() {
            self.finish();
        }
    }

    /// Jumps to `progress` and stops.
    ///
    /// Owners use this instead of [`start`](Animation::start) when animations
    /// are disabled, to snap to the final state without intermediate frames.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
        self.position = self.duration.mul_f64(self.progress);
        self.running = false;
    }

    /// Starts the animation from its current progress.
    ///
    /// Returns whether the animation is running afterwards. Does nothing if
    /// the animation is disabled or already running. With a zero duration,
    /// or when already at the target boundary, the animation finishes
    /// immediately.
    pub fn start(&mut self) -> bool {
        if !self.enabled || self.running {
            return self.running
        }

        self.running = true;
        if self.duration.is_zero() || self.at_target() {
            self.finish();
        }
        trace!("animation started {:?} at {}, running: {}", self.direction, self.progress, self.running);

        self.running
    }

    /// Stops the animation where it is.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances a running animation by `elapsed`, returning the new progress.
    ///
    /// Has no effect on an idle animation.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        if !self.running {
            return self.progress
        }

        self.position = match self.direction {
            Direction::Forward => (self.position + elapsed).min(self.duration),
            Direction::Backward => self.position.saturating_sub(elapsed),
        };

        if self.at_boundary() {
            self.finish();
        } else {
            self.progress = (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
            self.notify(AnimationEvent::Tick(self.progress));
        }

        self.progress
    }

    fn at_boundary(&self) -> bool {
        match self.direction {
            Direction::Forward => self.position >= self.duration,
            Direction::Backward => self.position.is_zero(),
        }
    }

    fn at_target(&self) -> bool {
        match self.direction {
            Direction::Forward => self.progress >= 1.0,
            Direction::Backward => self.progress <= 0.0,
        }
    }

    fn finish(&mut self) {
        let (progress, position) = match self.direction {
            Direction::Forward => (1.0, self.duration),
            Direction::Backward => (0.0, Duration::ZERO),
        };
        self.progress = progress;
        self.position = position;
        self.running = false;

        self.notify(AnimationEvent::Tick(progress));
        self.notify(AnimationEvent::Finished(progress));
    }

    fn notify(&mut self, event: AnimationEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    const MS: Duration = Duration::from_millis(1);

    #[test_log::test]
    fn test_forward_reaches_exactly_one() {
        for step in [1u64, 3, 7, 50, 200] {
            let mut anim = Animation::new(Duration::from_millis(200));
            assert!(anim.start());

            let mut remaining = 200;
            while remaining > 0 {
                let dt = step.min(remaining);
                anim.advance(MS * dt as u32);
                remaining -= dt;
            }

            assert_eq!(anim.progress(), 1.0, "step {step}");
            assert!(!anim.is_running());
        }
    }

    #[test]
    fn test_reversal_keeps_progress() {
        let mut anim = Animation::new(Duration::from_millis(100));
        anim.start();
        anim.advance(MS * 60);
        let p = anim.progress();
        assert!((p - 0.6).abs() < 1e-9);

        anim.set_direction(Direction::Backward);
        let mut last = p;
        for _ in 0..6 {
            let now = anim.advance(MS * 10);
            assert!(now < last);
            assert!(last - now < 0.1 + 1e-9);
            last = now;
        }
        assert_eq!(anim.progress(), 0.0);
        assert!(!anim.is_running());
    }

    #[test]
    fn test_disabled_and_zero_duration() {
        let mut anim = Animation::new(Duration::from_millis(100));
        anim.set_enabled(false);
        assert!(!anim.start());
        assert_eq!(anim.advance(MS * 50), 0.0);

        anim.set_progress(1.0);
        assert_eq!(anim.progress(), 1.0);
        assert!(!anim.is_running());

        let mut instant = Animation::new(Duration::ZERO);
        assert!(!instant.start());
        assert_eq!(instant.progress(), 1.0);
    }

    #[test]
    fn test_observer_sees_every_tick_and_finish() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();

        let mut anim = Animation::new(Duration::from_millis(30));
        anim.set_observer(move |e| sink.borrow_mut().push(e));
        anim.start();
        anim.advance(MS * 10);
        anim.advance(MS * 10);
        anim.advance(MS * 10);

        let events = events.borrow();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], AnimationEvent::Tick(_)));
        assert_eq!(events[2], AnimationEvent::Tick(1.0));
        assert_eq!(events[3], AnimationEvent::Finished(1.0));
    }

    #[test]
    fn test_duration_change_keeps_progress() {
        let mut anim = Animation::new(Duration::from_millis(100));
        anim.start();
        anim.advance(MS * 25);
        anim.set_duration(Duration::from_millis(400));
        assert!((anim.progress() - 0.25).abs() < 1e-9);

        anim.advance(MS * 300);
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_in_out_quad() {
        let e = Easing::InOutQuad;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!(e.apply(0.25) < 0.25);
        assert!(e.apply(0.75) > 0.75);
    }
}
