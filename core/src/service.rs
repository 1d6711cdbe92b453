use crate::deck_id::DeckId;
use crate::error::ServiceError;
use crate::protocol::{CreateDeckRequest, DeckCreated, DrawResponse, ShuffleResponse};

/// The three calls against the remote deck service.
///
/// Futures are not required to be `Send`; the browser client runs on the
/// single wasm thread.
#[allow(async_fn_in_trait)]
pub trait DeckService {
    async fn create_deck(&self, request: CreateDeckRequest) -> Result<DeckCreated, ServiceError>;

    async fn draw_cards(&self, deck_id: &DeckId, count: u32) -> Result<DrawResponse, ServiceError>;

    /// Folds drawn cards back in as well (`remaining=false`).
    async fn shuffle_deck(&self, deck_id: &DeckId) -> Result<ShuffleResponse, ServiceError>;
}
