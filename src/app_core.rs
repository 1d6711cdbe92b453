use std::cell::RefCell;
use std::rc::{Rc, Weak};

use deckdraw_core::{
    ActionOutcome, AutoToggle, DeckAction, DeckController, DeckSnapshot, DrawOutcome,
    InitOutcome, ShuffleOutcome, NO_CARDS_REMAINING,
};
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpDeckService;
use crate::app_router::InitConfig;
use crate::ticks::GlooTicks;

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

type Deck = DeckController<HttpDeckService, GlooTicks>;

pub(crate) struct AppCore {
    deck: Deck,
    auto_start: bool,
    snapshot: RefCell<DeckSnapshot>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl AppCore {
    pub(crate) fn new(config: &InitConfig) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<AppCore>| {
            let weak = weak.clone();
            let ticks = GlooTicks::new(Rc::new(move || {
                if let Some(core) = weak.upgrade() {
                    core.dispatch(DeckAction::AutoTick);
                }
            }));
            let deck = DeckController::with_seed(
                HttpDeckService::new(&config.api_base),
                ticks,
                session_seed(),
            )
            .with_interval(config.interval_ms);
            let snapshot = deck.snapshot();
            Self {
                deck,
                auto_start: config.auto_start,
                snapshot: RefCell::new(snapshot),
                subscribers: Rc::new(RefCell::new(Vec::new())),
            }
        })
    }

    pub(crate) fn snapshot(&self) -> DeckSnapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        *self.snapshot.borrow_mut() = self.deck.snapshot();
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    /// Creates the deck. Auto-draw follows when the page asked for it.
    pub(crate) fn start(self: &Rc<Self>) {
        self.dispatch(DeckAction::Initialize);
    }

    pub(crate) fn dispatch(self: &Rc<Self>, action: DeckAction) {
        let core = Rc::clone(self);
        spawn_local(async move {
            let outcome = core.deck.perform(action).await;
            log_outcome(&outcome);
            if core.auto_start && is_ready(&outcome) {
                log_outcome(&ActionOutcome::Auto(core.deck.toggle_auto_draw()));
            }
            core.notify();
        });
    }
}

/// A create that just succeeded, whether at boot or from Retry.
fn is_ready(outcome: &ActionOutcome) -> bool {
    matches!(outcome, ActionOutcome::Initialized(InitOutcome::Ready { .. }))
}

fn log_outcome(outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Initialized(InitOutcome::Ready { remaining }) => {
            gloo::console::log!("deck ready", *remaining);
        }
        ActionOutcome::Initialized(InitOutcome::Failed(err))
        | ActionOutcome::Drew(DrawOutcome::Failed(err))
        | ActionOutcome::Shuffled(ShuffleOutcome::Failed(err)) => {
            gloo::console::warn!("deck service failed", err.to_string());
        }
        ActionOutcome::Drew(DrawOutcome::Exhausted) => {
            gloo::console::log!(NO_CARDS_REMAINING);
        }
        ActionOutcome::Drew(DrawOutcome::Drawn { remaining: 0, .. }) => {
            gloo::console::log!("last card drawn");
        }
        ActionOutcome::Auto(AutoToggle::Started { interval_ms }) => {
            gloo::console::log!("auto-draw started", *interval_ms);
        }
        ActionOutcome::Auto(AutoToggle::Stopped) => {
            gloo::console::log!("auto-draw stopped");
        }
        _ => {}
    }
}

#[cfg(target_arch = "wasm32")]
fn session_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    now.rotate_left(21) ^ noise ^ 0x9E37_79B9_7F4A_7C15
}

#[cfg(not(target_arch = "wasm32"))]
fn session_seed() -> u64 {
    0x5EED_DECC
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckdraw_core::Rejection;

    #[test]
    fn only_a_successful_create_counts_as_ready() {
        assert!(is_ready(&ActionOutcome::Initialized(InitOutcome::Ready {
            remaining: 52
        })));
        assert!(!is_ready(&ActionOutcome::Initialized(InitOutcome::Rejected(
            Rejection::AlreadyInitialized
        ))));
        assert!(!is_ready(&ActionOutcome::Drew(DrawOutcome::Exhausted)));
    }
}
