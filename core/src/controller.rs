use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::action::{ActionOutcome, DeckAction};
use crate::auto_draw::{AutoDraw, TickSource};
use crate::error::ServiceError;
use crate::placement::{deck_slot_bounds, pile_bounds, Gesture};
use crate::protocol::CreateDeckRequest;
use crate::service::DeckService;
use crate::snapshot::DeckSnapshot;
use crate::state::{DeckPhase, DeckState, DrawnCard, Notice, Pending};
use crate::transform::{compose_placement, random_offset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NotReady,
    AlreadyInitialized,
    Busy,
    AutoInactive,
    DeckEmpty,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InitOutcome {
    Ready { remaining: u32 },
    Rejected(Rejection),
    Failed(ServiceError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOutcome {
    Drawn {
        cards: Vec<DrawnCard>,
        remaining: u32,
    },
    /// Nothing left to draw; no request was made.
    Exhausted,
    Rejected(Rejection),
    Failed(ServiceError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShuffleOutcome {
    Shuffled { remaining: u32 },
    Rejected(Rejection),
    Failed(ServiceError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoToggle {
    Started { interval_ms: u32 },
    Stopped,
    Rejected(Rejection),
}

/// Owns the deck state and drives the service.
///
/// Every method takes `&self`; interior borrows are released before each
/// service call so a tick or pointer event can run while a request is in
/// flight. At most one request is in flight at a time.
pub struct DeckController<S, T> {
    service: S,
    create: CreateDeckRequest,
    state: RefCell<DeckState>,
    auto: RefCell<AutoDraw<T>>,
    rng: RefCell<StdRng>,
}

impl<S, T> DeckController<S, T>
where
    S: DeckService,
    T: TickSource,
{
    pub fn with_seed(service: S, ticks: T, seed: u64) -> Self {
        Self::with_rng(service, ticks, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(service: S, ticks: T, mut rng: StdRng) -> Self {
        let state = DeckState::new(&mut rng);
        Self {
            service,
            create: CreateDeckRequest::default(),
            state: RefCell::new(state),
            auto: RefCell::new(AutoDraw::new(ticks)),
            rng: RefCell::new(rng),
        }
    }

    pub fn with_create_request(mut self, create: CreateDeckRequest) -> Self {
        self.create = create;
        self
    }

    pub fn with_interval(self, interval_ms: u32) -> Self {
        self.auto.borrow_mut().set_interval(interval_ms);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        let auto = self.auto.borrow();
        DeckSnapshot::new(&self.state.borrow(), auto.is_active(), auto.interval_ms())
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&DeckState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn with_ticks<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(self.auto.borrow().ticks())
    }

    pub fn is_auto_active(&self) -> bool {
        self.auto.borrow().is_active()
    }

    pub fn interval_ms(&self) -> u32 {
        self.auto.borrow().interval_ms()
    }

    pub async fn perform(&self, action: DeckAction) -> ActionOutcome {
        match action {
            DeckAction::Initialize => ActionOutcome::Initialized(self.initialize().await),
            DeckAction::Draw => ActionOutcome::Drew(self.draw().await),
            DeckAction::AutoTick => ActionOutcome::Drew(self.auto_tick().await),
            DeckAction::Shuffle => ActionOutcome::Shuffled(self.shuffle().await),
            DeckAction::ToggleAutoDraw => ActionOutcome::Auto(self.toggle_auto_draw()),
            DeckAction::Faster => ActionOutcome::Interval(self.faster()),
            DeckAction::Slower => ActionOutcome::Interval(self.slower()),
            DeckAction::SetInterval { interval_ms } => {
                ActionOutcome::Interval(self.set_interval(interval_ms))
            }
            DeckAction::NudgeSlot { index, gesture } => {
                ActionOutcome::Nudged(self.nudge_deck(index, gesture).len())
            }
            DeckAction::NudgePile { gesture } => {
                ActionOutcome::Nudged(self.nudge_drawn_pile(gesture))
            }
            DeckAction::DismissNotice => {
                self.dismiss_notice();
                ActionOutcome::NoticeDismissed
            }
        }
    }

    pub async fn initialize(&self) -> InitOutcome {
        {
            let mut state = self.state.borrow_mut();
            if state.pending.is_some() {
                return InitOutcome::Rejected(Rejection::Busy);
            }
            if state.deck_id.is_some() {
                return InitOutcome::Rejected(Rejection::AlreadyInitialized);
            }
            state.pending = Some(Pending::Create);
        }
        debug!(shuffled = self.create.shuffled, decks = self.create.deck_count, "creating deck");
        let result = self.service.create_deck(self.create).await;
        let mut state = self.state.borrow_mut();
        state.pending = None;
        match result {
            Ok(created) => {
                debug!(deck = %created.deck_id, remaining = created.remaining, "deck ready");
                let mut rng = self.rng.borrow_mut();
                state.apply_created(&mut *rng, created);
                InitOutcome::Ready {
                    remaining: state.remaining,
                }
            }
            Err(err) => {
                warn!(error = %err, "deck creation failed");
                state.record_failure(err.clone());
                InitOutcome::Failed(err)
            }
        }
    }

    pub async fn draw(&self) -> DrawOutcome {
        self.draw_one().await
    }

    /// A timer tick; ignored once auto-draw has been stopped.
    pub async fn auto_tick(&self) -> DrawOutcome {
        if !self.is_auto_active() {
            return DrawOutcome::Rejected(Rejection::AutoInactive);
        }
        self.draw_one().await
    }

    async fn draw_one(&self) -> DrawOutcome {
        let deck_id = {
            let mut state = self.state.borrow_mut();
            let Some(deck_id) = state.deck_id.clone() else {
                return DrawOutcome::Rejected(Rejection::NotReady);
            };
            if state.pending.is_some() {
                return DrawOutcome::Rejected(Rejection::Busy);
            }
            if state.remaining == 0 {
                state.notice = Some(Notice::NoCardsRemaining);
                drop(state);
                self.stop_auto_draw();
                return DrawOutcome::Exhausted;
            }
            state.pending = Some(Pending::Draw);
            deck_id
        };
        let result = self.service.draw_cards(&deck_id, 1).await;
        let mut state = self.state.borrow_mut();
        state.pending = None;
        match result {
            Ok(response) => {
                let cards = {
                    let mut rng = self.rng.borrow_mut();
                    state.apply_drawn(&mut *rng, response)
                };
                let remaining = state.remaining;
                drop(state);
                debug!(drawn = cards.len(), remaining, "cards drawn");
                if remaining == 0 {
                    self.stop_auto_draw();
                }
                DrawOutcome::Drawn { cards, remaining }
            }
            Err(err) => {
                warn!(error = %err, "draw failed");
                state.record_failure(err.clone());
                drop(state);
                self.stop_auto_draw();
                DrawOutcome::Failed(err)
            }
        }
    }

    pub async fn shuffle(&self) -> ShuffleOutcome {
        let deck_id = {
            let mut state = self.state.borrow_mut();
            let Some(deck_id) = state.deck_id.clone() else {
                return ShuffleOutcome::Rejected(Rejection::NotReady);
            };
            if state.pending.is_some() {
                return ShuffleOutcome::Rejected(Rejection::Busy);
            }
            state.pending = Some(Pending::Shuffle);
            deck_id
        };
        let result = self.service.shuffle_deck(&deck_id).await;
        let mut state = self.state.borrow_mut();
        state.pending = None;
        match result {
            Ok(response) => {
                let mut rng = self.rng.borrow_mut();
                state.apply_shuffled(&mut *rng, response);
                debug!(remaining = state.remaining, "deck shuffled");
                ShuffleOutcome::Shuffled {
                    remaining: state.remaining,
                }
            }
            Err(err) => {
                warn!(error = %err, "shuffle failed");
                state.record_failure(err.clone());
                ShuffleOutcome::Failed(err)
            }
        }
    }

    pub fn toggle_auto_draw(&self) -> AutoToggle {
        let mut auto = self.auto.borrow_mut();
        if auto.is_active() {
            auto.stop();
            debug!("auto-draw stopped");
            return AutoToggle::Stopped;
        }
        match self.state.borrow().phase() {
            DeckPhase::Uninitialized => AutoToggle::Rejected(Rejection::NotReady),
            DeckPhase::Empty => AutoToggle::Rejected(Rejection::DeckEmpty),
            DeckPhase::Ready => {
                auto.start();
                debug!(interval_ms = auto.interval_ms(), "auto-draw started");
                AutoToggle::Started {
                    interval_ms: auto.interval_ms(),
                }
            }
        }
    }

    pub fn stop_auto_draw(&self) -> bool {
        let stopped = self.auto.borrow_mut().stop();
        if stopped {
            debug!("auto-draw stopped");
        }
        stopped
    }

    pub fn faster(&self) -> u32 {
        self.auto.borrow_mut().faster()
    }

    pub fn slower(&self) -> u32 {
        self.auto.borrow_mut().slower()
    }

    pub fn set_interval(&self, interval_ms: u32) -> u32 {
        self.auto.borrow_mut().set_interval(interval_ms)
    }

    /// Nudges a visible deck slot and ripples into its neighbours. Returns the
    /// slots that moved.
    pub fn nudge_deck(&self, index: usize, gesture: Gesture) -> Vec<usize> {
        let mut state = self.state.borrow_mut();
        let visible = state.remaining as usize;
        if index >= visible {
            return Vec::new();
        }
        let is_top = state.top_slot() == Some(index);
        let bounds = deck_slot_bounds(gesture, is_top);
        let mut rng = self.rng.borrow_mut();
        state
            .placements
            .ripple(index, visible, bounds, gesture.ripple_decay(), &mut *rng)
    }

    pub fn nudge_drawn_pile(&self, gesture: Gesture) -> usize {
        let mut state = self.state.borrow_mut();
        let bounds = pile_bounds(gesture);
        let mut rng = self.rng.borrow_mut();
        for card in &mut state.drawn {
            card.placement = compose_placement(card.placement, random_offset(&mut *rng, bounds));
        }
        state.drawn.len()
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().notice = None;
    }
}
