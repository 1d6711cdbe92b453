pub mod action;
pub mod auto_draw;
pub mod controller;
pub mod deck_id;
pub mod error;
pub mod placement;
pub mod protocol;
pub mod service;
pub mod snapshot;
pub mod state;
pub mod transform;

pub use action::{ActionOutcome, DeckAction};
pub use auto_draw::{
    clamp_interval, AutoDraw, TickSource, AUTO_DRAW_DEFAULT_MS, AUTO_DRAW_MAX_MS,
    AUTO_DRAW_MIN_MS, AUTO_DRAW_STEP_MS,
};
pub use controller::{AutoToggle, DeckController, DrawOutcome, InitOutcome, Rejection, ShuffleOutcome};
pub use deck_id::{is_valid_deck_id, DeckId, DeckIdError, DECK_ID_MAX_LEN};
pub use error::{ServiceCall, ServiceError};
pub use placement::{Gesture, PlacementTable};
pub use protocol::{
    CardData, CreateDeckRequest, DeckCreated, DeckEndpoints, DrawResponse, ShuffleResponse,
    CARDS_PER_DECK, DEFAULT_API_BASE,
};
pub use service::DeckService;
pub use snapshot::DeckSnapshot;
pub use state::{DeckPhase, DeckState, DrawnCard, Notice, Pending, NO_CARDS_REMAINING};
pub use transform::{Nudge, NudgeBounds, Placement};
