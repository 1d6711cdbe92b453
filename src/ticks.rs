use std::rc::Rc;

use deckdraw_core::TickSource;
use gloo::timers::callback::Interval;

/// Browser interval that calls back into the app on every tick.
pub(crate) struct GlooTicks {
    on_tick: Rc<dyn Fn()>,
    interval: Option<Interval>,
}

impl GlooTicks {
    pub(crate) fn new(on_tick: Rc<dyn Fn()>) -> Self {
        Self {
            on_tick,
            interval: None,
        }
    }
}

impl TickSource for GlooTicks {
    fn start(&mut self, period_ms: u32) {
        if let Some(previous) = self.interval.take() {
            previous.cancel();
        }
        let on_tick = Rc::clone(&self.on_tick);
        self.interval = Some(Interval::new(period_ms, move || on_tick()));
    }

    fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}
