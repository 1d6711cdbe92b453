use serde::{Deserialize, Serialize};

use crate::deck_id::DeckId;

pub const DEFAULT_API_BASE: &str = "https://deckofcardsapi.com/api/deck";
pub const CARDS_PER_DECK: u32 = 52;

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub code: String,
    pub image: String,
    pub value: String,
    pub suit: String,
}

impl CardData {
    pub fn label(&self) -> String {
        format!("{} of {}", self.value, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCreated {
    #[serde(default = "default_success")]
    pub success: bool,
    pub deck_id: DeckId,
    pub remaining: u32,
    #[serde(default)]
    pub shuffled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<DeckId>,
    #[serde(default)]
    pub cards: Vec<CardData>,
    pub remaining: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<DeckId>,
    #[serde(default)]
    pub shuffled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateDeckRequest {
    pub shuffled: bool,
    pub deck_count: u32,
}

impl Default for CreateDeckRequest {
    fn default() -> Self {
        Self {
            shuffled: true,
            deck_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEndpoints {
    base: String,
}

impl Default for DeckEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl DeckEndpoints {
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim().trim_end_matches('/');
        let base = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn create(&self, request: CreateDeckRequest) -> String {
        let shuffle_path = if request.shuffled { "shuffle/" } else { "" };
        if request.deck_count > 1 {
            format!(
                "{}/new/{shuffle_path}?deck_count={}",
                self.base, request.deck_count
            )
        } else {
            format!("{}/new/{shuffle_path}", self.base)
        }
    }

    pub fn draw(&self, deck_id: &DeckId, count: u32) -> String {
        format!("{}/{deck_id}/draw/?count={}", self.base, count.max(1))
    }

    pub fn shuffle(&self, deck_id: &DeckId, remaining_only: bool) -> String {
        format!(
            "{}/{deck_id}/shuffle/?remaining={remaining_only}",
            self.base
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> DeckId {
        DeckId::parse("3p40paa87x90").expect("valid id")
    }

    #[test]
    fn builds_service_paths() {
        let endpoints = DeckEndpoints::default();
        assert_eq!(
            endpoints.create(CreateDeckRequest::default()),
            "https://deckofcardsapi.com/api/deck/new/shuffle/"
        );
        assert_eq!(
            endpoints.create(CreateDeckRequest {
                shuffled: false,
                deck_count: 1,
            }),
            "https://deckofcardsapi.com/api/deck/new/"
        );
        assert_eq!(
            endpoints.draw(&deck(), 1),
            "https://deckofcardsapi.com/api/deck/3p40paa87x90/draw/?count=1"
        );
        assert_eq!(
            endpoints.shuffle(&deck(), false),
            "https://deckofcardsapi.com/api/deck/3p40paa87x90/shuffle/?remaining=false"
        );
    }

    #[test]
    fn base_is_normalized() {
        let endpoints = DeckEndpoints::new(" http://localhost:9000/api/deck/ ");
        assert_eq!(endpoints.base(), "http://localhost:9000/api/deck");
        assert_eq!(DeckEndpoints::new("  ").base(), DEFAULT_API_BASE);
    }

    #[test]
    fn multi_deck_and_zero_count() {
        let endpoints = DeckEndpoints::new("http://x");
        assert_eq!(
            endpoints.create(CreateDeckRequest {
                shuffled: true,
                deck_count: 6,
            }),
            "http://x/new/shuffle/?deck_count=6"
        );
        assert_eq!(endpoints.draw(&deck(), 0), "http://x/3p40paa87x90/draw/?count=1");
    }

    #[test]
    fn decodes_service_payloads() {
        let created: DeckCreated = serde_json::from_str(
            r#"{"success": true, "deck_id": "3p40paa87x90", "shuffled": true, "remaining": 52}"#,
        )
        .expect("decode create");
        assert_eq!(created.deck_id, deck());
        assert_eq!(created.remaining, CARDS_PER_DECK);

        let drawn: DrawResponse = serde_json::from_str(
            r#"{
                "success": true,
                "deck_id": "3p40paa87x90",
                "cards": [{
                    "code": "6H",
                    "image": "https://deckofcardsapi.com/static/img/6H.png",
                    "images": {"svg": "https://deckofcardsapi.com/static/img/6H.svg"},
                    "value": "6",
                    "suit": "HEARTS"
                }],
                "remaining": 50
            }"#,
        )
        .expect("decode draw");
        assert_eq!(drawn.cards.len(), 1);
        assert_eq!(drawn.cards[0].label(), "6 of HEARTS");
        assert_eq!(drawn.remaining, 50);

        let exhausted: DrawResponse = serde_json::from_str(
            r#"{"success": false, "deck_id": "3p40paa87x90", "cards": [], "remaining": 0,
                "error": "Not enough cards remaining to draw 1 additional"}"#,
        )
        .expect("decode exhausted draw");
        assert!(!exhausted.success);
        assert!(exhausted.cards.is_empty());

        let shuffled: ShuffleResponse = serde_json::from_str(
            r#"{"success": true, "deck_id": "3p40paa87x90", "shuffled": true, "remaining": 52}"#,
        )
        .expect("decode shuffle");
        assert!(shuffled.shuffled);
        assert_eq!(shuffled.remaining, Some(52));
    }
}
