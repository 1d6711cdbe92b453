use crate::auto_draw::{AUTO_DRAW_MAX_MS, AUTO_DRAW_MIN_MS};
use crate::deck_id::DeckId;
use crate::state::{DeckPhase, DeckState, DrawnCard, Notice, Pending};
use crate::transform::Placement;

/// Read-only view of the controller handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckSnapshot {
    pub phase: DeckPhase,
    pub deck_id: Option<DeckId>,
    pub capacity: u32,
    pub remaining: u32,
    pub drawn: Vec<DrawnCard>,
    pub slots: Vec<Placement>,
    pub pending: Option<Pending>,
    pub notice: Option<Notice>,
    pub create_failed: bool,
    pub auto_active: bool,
    pub interval_ms: u32,
}

impl DeckSnapshot {
    pub fn new(state: &DeckState, auto_active: bool, interval_ms: u32) -> Self {
        Self {
            phase: state.phase(),
            deck_id: state.deck_id.clone(),
            capacity: state.capacity,
            remaining: state.remaining,
            drawn: state.drawn.clone(),
            slots: state.placements.iter().copied().collect(),
            pending: state.pending,
            notice: state.notice.clone(),
            create_failed: state.create_failed,
            auto_active,
            interval_ms,
        }
    }

    pub fn can_draw(&self) -> bool {
        self.phase == DeckPhase::Ready
    }

    pub fn can_shuffle(&self) -> bool {
        self.deck_id.is_some() && !self.drawn.is_empty()
    }

    pub fn can_toggle_auto(&self) -> bool {
        self.auto_active || self.phase == DeckPhase::Ready
    }

    pub fn can_go_faster(&self) -> bool {
        self.interval_ms > AUTO_DRAW_MIN_MS
    }

    pub fn can_go_slower(&self) -> bool {
        self.interval_ms < AUTO_DRAW_MAX_MS
    }

    pub fn can_retry(&self) -> bool {
        self.phase == DeckPhase::Uninitialized && self.pending.is_none() && self.create_failed
    }

    pub fn is_loading(&self) -> bool {
        self.pending == Some(Pending::Create)
    }
}
