//! Frame loop driver and real-time timers.
//!
//! The host calls [`FrameDriver::step`] once per frame with the time elapsed
//! since startup. Timers compare that clock against their own schedule, so
//! meteor spawning follows wall time regardless of the frame rate.

use std::time::Duration;

use tracing::debug;

use crate::animations::meteors::SPAWN_INTERVAL;
use crate::state::AnimationContext;

/// Fixed-period timer polled against a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Duration,
}

impl IntervalTimer {
    /// Timer whose first tick is one period after `now`.
    pub fn new(period: Duration, now: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next tick, zero when already due.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.next_due.saturating_sub(now)
    }

    /// Returns `true` if the timer is due at `now`.
    ///
    /// Fires at most once per poll. After a stall longer than a period the
    /// schedule restarts from `now` instead of replaying missed ticks.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

/// Drives the animation one frame at a time.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    /// Whether frames are being produced.
    running: bool,
    /// Frames rendered since creation.
    frames: u64,
    /// Meteor spawn timer.
    meteor_timer: IntervalTimer,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL)
    }
}

impl FrameDriver {
    /// Create a stopped driver with the given meteor timer period.
    pub fn new(meteor_interval: Duration) -> Self {
        Self {
            running: false,
            frames: 0,
            meteor_timer: IntervalTimer::new(meteor_interval, Duration::ZERO),
        }
    }

    /// Start producing frames, scheduling timers relative to `now`.
    pub fn start(&mut self, now: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.meteor_timer = IntervalTimer::new(self.meteor_timer.period(), now);
        debug!("frame driver started");
    }

    /// Stop producing frames.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!(frames = self.frames, "frame driver stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Deliver any timer ticks due at `now`.
    pub fn fire_timers(&mut self, context: &mut AnimationContext, now: Duration) {
        if !self.running {
            return;
        }
        if self.meteor_timer.poll(now) {
            context.on_meteor_timer();
        }
    }

    /// Fire due timers and render one frame.
    ///
    /// Returns `false` without touching the context when stopped.
    pub fn step(&mut self, context: &mut AnimationContext, now: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.fire_timers(context, now);
        context.render_frame();
        self.frames += 1;
        true
    }
}
