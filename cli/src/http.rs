use deckdraw_core::{
    CreateDeckRequest, DeckCreated, DeckEndpoints, DeckId, DeckService, DrawResponse,
    ServiceCall, ServiceError, ShuffleResponse,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

#[derive(Clone, Debug)]
pub struct ReqwestDeckService {
    client: reqwest::Client,
    endpoints: DeckEndpoints,
}

impl ReqwestDeckService {
    pub fn new(base_url: &Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Self {
        Self {
            client,
            endpoints: DeckEndpoints::new(base_url.as_str()),
        }
    }

    pub async fn shuffle_with(
        &self,
        deck_id: &DeckId,
        remaining_only: bool,
    ) -> Result<ShuffleResponse, ServiceError> {
        let url = self.endpoints.shuffle(deck_id, remaining_only);
        self.get_json(url, ServiceCall::Shuffle).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        call: ServiceCall,
    ) -> Result<T, ServiceError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ServiceError::transport(call, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::status(
                call,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::decode(call, err))
    }
}

impl DeckService for ReqwestDeckService {
    async fn create_deck(&self, request: CreateDeckRequest) -> Result<DeckCreated, ServiceError> {
        let url = self.endpoints.create(request);
        self.get_json(url, ServiceCall::CreateDeck).await
    }

    async fn draw_cards(&self, deck_id: &DeckId, count: u32) -> Result<DrawResponse, ServiceError> {
        let url = self.endpoints.draw(deck_id, count);
        self.get_json(url, ServiceCall::Draw).await
    }

    async fn shuffle_deck(&self, deck_id: &DeckId) -> Result<ShuffleResponse, ServiceError> {
        self.shuffle_with(deck_id, false).await
    }
}
