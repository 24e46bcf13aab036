use crate::error::{Error, Result};
use crate::simulation::Action;
use std::time::{Duration, Instant};

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

/// Emits `Tick` actions at a target rate from a free-running frame callback.
///
/// The host calls [`AnimationDriver::poll`] at whatever cadence it refreshes.
/// Once more than one frame interval has passed since the last accepted
/// step, one tick is emitted and the reference time is moved to
/// `now - (elapsed % interval)`, so refresh jitter does not accumulate into
/// drift. At most one tick is emitted per poll.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    target_fps: u32,
    frame_interval: Duration,
    /// Last accepted step; `None` while stopped
    then: Option<Instant>,
    started_at: Option<Instant>,
}

impl AnimationDriver {
    pub fn new(target_fps: u32) -> Result<Self> {
        Ok(Self {
            target_fps,
            frame_interval: frame_interval(target_fps)?,
            then: None,
            started_at: None,
        })
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn is_running(&self) -> bool {
        self.then.is_some()
    }

    /// When the driver was last started
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Start emitting ticks, measuring from `now`. Restarting a running
    /// driver resets its reference time.
    pub fn start(&mut self, now: Instant) {
        self.then = Some(now);
        self.started_at = Some(now);
    }

    /// Stop emitting ticks. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.then = None;
    }

    /// Change the target rate. A running driver is stopped and restarted at
    /// `now` so the remainder carried from the old interval is discarded.
    pub fn set_target_fps(&mut self, fps: u32, now: Instant) -> Result<()> {
        let interval = frame_interval(fps)?;
        let was_running = self.is_running();
        self.stop();
        self.target_fps = fps;
        self.frame_interval = interval;
        if was_running {
            self.start(now);
        }
        Ok(())
    }

    /// Frame callback. Returns a tick when one is due.
    pub fn poll(&mut self, now: Instant) -> Option<Action> {
        let then = self.then?;
        let elapsed = now.saturating_duration_since(then);
        if elapsed <= self.frame_interval {
            return None;
        }
        let remainder = elapsed.as_nanos() % self.frame_interval.as_nanos();
        self.then = Some(now - Duration::from_nanos(remainder as u64));
        Some(Action::Tick)
    }
}

/// Validate a target rate and convert it to a frame interval
pub fn frame_interval(fps: u32) -> Result<Duration> {
    if !(MIN_FPS..=MAX_FPS).contains(&fps) {
        return Err(Error::InvalidFrameRate(fps));
    }
    Ok(Duration::from_nanos(1_000_000_000 / fps as u64))
}
