pub const AUTO_DRAW_MIN_MS: u32 = 200;
pub const AUTO_DRAW_MAX_MS: u32 = 3000;
pub const AUTO_DRAW_STEP_MS: u32 = 200;
pub const AUTO_DRAW_DEFAULT_MS: u32 = 1000;

pub fn clamp_interval(ms: u32) -> u32 {
    let clamped = ms.clamp(AUTO_DRAW_MIN_MS, AUTO_DRAW_MAX_MS);
    let steps = (clamped - AUTO_DRAW_MIN_MS + AUTO_DRAW_STEP_MS / 2) / AUTO_DRAW_STEP_MS;
    (AUTO_DRAW_MIN_MS + steps * AUTO_DRAW_STEP_MS).min(AUTO_DRAW_MAX_MS)
}

/// A repeating timer the auto-draw policy drives.
///
/// `start` is only called while stopped, so implementations never hold more
/// than one running timer.
pub trait TickSource {
    fn start(&mut self, period_ms: u32);
    fn stop(&mut self);
}

#[derive(Debug)]
pub struct AutoDraw<T> {
    ticks: T,
    active: bool,
    interval_ms: u32,
}

impl<T: TickSource> AutoDraw<T> {
    pub fn new(ticks: T) -> Self {
        Self::with_interval(ticks, AUTO_DRAW_DEFAULT_MS)
    }

    pub fn with_interval(ticks: T, interval_ms: u32) -> Self {
        Self {
            ticks,
            active: false,
            interval_ms: clamp_interval(interval_ms),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn can_go_faster(&self) -> bool {
        self.interval_ms > AUTO_DRAW_MIN_MS
    }

    pub fn can_go_slower(&self) -> bool {
        self.interval_ms < AUTO_DRAW_MAX_MS
    }

    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.ticks.start(self.interval_ms);
        self.active = true;
        true
    }

    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks.stop();
        self.active = false;
        true
    }

    /// Applies a new period, restarting the running timer when it changes.
    pub fn set_interval(&mut self, interval_ms: u32) -> u32 {
        let next = clamp_interval(interval_ms);
        if next != self.interval_ms {
            self.interval_ms = next;
            if self.active {
                self.ticks.stop();
                self.ticks.start(next);
            }
        }
        self.interval_ms
    }

    pub fn faster(&mut self) -> u32 {
        self.set_interval(self.interval_ms.saturating_sub(AUTO_DRAW_STEP_MS))
    }

    pub fn slower(&mut self) -> u32 {
        self.set_interval(self.interval_ms.saturating_add(AUTO_DRAW_STEP_MS))
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }
}
