use deckdraw_core::{
    CreateDeckRequest, DeckCreated, DeckEndpoints, DeckId, DeckService, DrawResponse,
    ServiceCall, ServiceError, ShuffleResponse,
};
use gloo::net::http::Request;
use serde::de::DeserializeOwned;

pub(crate) struct HttpDeckService {
    endpoints: DeckEndpoints,
}

impl HttpDeckService {
    pub(crate) fn new(api_base: &str) -> Self {
        Self {
            endpoints: DeckEndpoints::new(api_base),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        call: ServiceCall,
    ) -> Result<T, ServiceError> {
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| ServiceError::transport(call, err))?;
        if !response.ok() {
            return Err(ServiceError::status(
                call,
                response.status(),
                response.status_text(),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::decode(call, err))
    }
}

impl DeckService for HttpDeckService {
    async fn create_deck(&self, request: CreateDeckRequest) -> Result<DeckCreated, ServiceError> {
        self.get_json(self.endpoints.create(request), ServiceCall::CreateDeck)
            .await
    }

    async fn draw_cards(&self, deck_id: &DeckId, count: u32) -> Result<DrawResponse, ServiceError> {
        self.get_json(self.endpoints.draw(deck_id, count), ServiceCall::Draw)
            .await
    }

    async fn shuffle_deck(&self, deck_id: &DeckId) -> Result<ShuffleResponse, ServiceError> {
        self.get_json(self.endpoints.shuffle(deck_id, false), ServiceCall::Shuffle)
            .await
    }
}
