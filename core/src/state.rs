use std::fmt;

use rand::Rng;
use tracing::warn;

use crate::deck_id::DeckId;
use crate::error::{ServiceCall, ServiceError};
use crate::placement::PlacementTable;
use crate::protocol::{CardData, DeckCreated, DrawResponse, ShuffleResponse, CARDS_PER_DECK};
use crate::transform::{drawn_card_placement, Placement};

pub const NO_CARDS_REMAINING: &str = "No cards remaining!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeckPhase {
    Uninitialized,
    Ready,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pending {
    Create,
    Draw,
    Shuffle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NoCardsRemaining,
    ServiceFailure(ServiceError),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::ServiceFailure(_))
    }

    pub fn failed_call(&self) -> Option<ServiceCall> {
        match self {
            Notice::ServiceFailure(err) => Some(err.call()),
            Notice::NoCardsRemaining => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoCardsRemaining => f.write_str(NO_CARDS_REMAINING),
            Notice::ServiceFailure(err) => err.fmt(f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawnCard {
    pub code: String,
    pub value: String,
    pub suit: String,
    pub image: String,
    pub placement: Placement,
}

impl DrawnCard {
    pub fn new(card: CardData, placement: Placement) -> Self {
        Self {
            code: card.code,
            value: card.value,
            suit: card.suit,
            image: card.image,
            placement,
        }
    }

    pub fn label(&self) -> String {
        format!("{} of {}", self.value, self.suit)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckState {
    pub deck_id: Option<DeckId>,
    pub capacity: u32,
    pub remaining: u32,
    pub drawn: Vec<DrawnCard>,
    pub placements: PlacementTable,
    pub pending: Option<Pending>,
    pub notice: Option<Notice>,
    /// Set when creation failed; survives a dismissed notice until a create succeeds.
    pub create_failed: bool,
}

impl DeckState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            deck_id: None,
            capacity: CARDS_PER_DECK,
            remaining: CARDS_PER_DECK,
            drawn: Vec::new(),
            placements: PlacementTable::new(rng, CARDS_PER_DECK as usize),
            pending: None,
            notice: None,
            create_failed: false,
        }
    }

    pub fn phase(&self) -> DeckPhase {
        match (&self.deck_id, self.remaining) {
            (None, _) => DeckPhase::Uninitialized,
            (Some(_), 0) => DeckPhase::Empty,
            (Some(_), _) => DeckPhase::Ready,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.drawn.len() as u64 + u64::from(self.remaining) == u64::from(self.capacity)
    }

    pub fn top_slot(&self) -> Option<usize> {
        (self.remaining as usize).checked_sub(1)
    }

    pub fn apply_created<R: Rng + ?Sized>(&mut self, rng: &mut R, created: DeckCreated) {
        self.deck_id = Some(created.deck_id);
        self.capacity = created.remaining;
        self.remaining = created.remaining;
        self.drawn.clear();
        self.placements.resize(rng, created.remaining as usize);
        self.notice = None;
        self.create_failed = false;
    }

    /// Appends the drawn cards and takes the service's remaining count.
    pub fn apply_drawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        response: DrawResponse,
    ) -> Vec<DrawnCard> {
        let cards: Vec<DrawnCard> = response
            .cards
            .into_iter()
            .map(|card| DrawnCard::new(card, drawn_card_placement(rng)))
            .collect();
        self.drawn.extend(cards.iter().cloned());
        let remaining = response.remaining.min(self.capacity);
        let expected = (self.capacity as usize).saturating_sub(self.drawn.len());
        if remaining as usize != expected {
            warn!(
                remaining,
                expected,
                drawn = self.drawn.len(),
                "service count disagrees with the drawn pile"
            );
        }
        self.remaining = remaining;
        self.notice = if remaining == 0 {
            Some(Notice::NoCardsRemaining)
        } else {
            None
        };
        cards
    }

    pub fn apply_shuffled<R: Rng + ?Sized>(&mut self, rng: &mut R, response: ShuffleResponse) {
        if let Some(reported) = response.remaining {
            if reported != self.capacity {
                warn!(
                    reported,
                    capacity = self.capacity,
                    "shuffle reported a partial deck"
                );
            }
        }
        self.drawn.clear();
        self.remaining = self.capacity;
        self.placements.reset(rng);
        self.notice = None;
    }

    pub fn record_failure(&mut self, err: ServiceError) {
        if err.call() == ServiceCall::CreateDeck && self.deck_id.is_none() {
            self.create_failed = true;
        }
        self.notice = Some(Notice::ServiceFailure(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(code: &str, value: &str, suit: &str) -> CardData {
        CardData {
            code: code.to_string(),
            image: format!("https://deckofcardsapi.com/static/img/{code}.png"),
            value: value.to_string(),
            suit: suit.to_string(),
        }
    }

    fn ready(rng: &mut StdRng) -> DeckState {
        let mut state = DeckState::new(rng);
        state.apply_created(
            rng,
            DeckCreated {
                success: true,
                deck_id: DeckId::parse("abc123").expect("id"),
                remaining: 52,
                shuffled: true,
            },
        );
        state
    }

    #[test]
    fn starts_uninitialized_and_consistent() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = DeckState::new(&mut rng);
        assert_eq!(state.phase(), DeckPhase::Uninitialized);
        assert!(state.is_consistent());
        assert_eq!(state.placements.len(), 52);
    }

    #[test]
    fn draw_folds_cards_and_count() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = ready(&mut rng);
        let drawn = state.apply_drawn(
            &mut rng,
            DrawResponse {
                success: true,
                deck_id: None,
                cards: vec![card("5S", "5", "SPADES")],
                remaining: 51,
                error: None,
            },
        );
        assert_eq!(drawn.len(), 1);
        assert_eq!(state.remaining, 51);
        assert_eq!(state.drawn[0].value, "5");
        assert_eq!(state.drawn[0].suit, "SPADES");
        assert_eq!(state.drawn[0].label(), "5 of SPADES");
        assert!(state.is_consistent());
        assert_eq!(state.notice, None);
    }

    #[test]
    fn last_card_sets_notice() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = ready(&mut rng);
        state.remaining = 1;
        state.drawn = (0..51)
            .map(|_| DrawnCard::new(card("AS", "ACE", "SPADES"), Placement::anchor()))
            .collect();
        state.apply_drawn(
            &mut rng,
            DrawResponse {
                success: true,
                deck_id: None,
                cards: vec![card("KD", "KING", "DIAMONDS")],
                remaining: 0,
                error: None,
            },
        );
        assert_eq!(state.phase(), DeckPhase::Empty);
        assert_eq!(state.notice, Some(Notice::NoCardsRemaining));
        assert_eq!(
            state.notice.as_ref().map(ToString::to_string).as_deref(),
            Some("No cards remaining!")
        );
        assert!(state.is_consistent());
    }

    #[test]
    fn shuffle_restores_capacity() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = ready(&mut rng);
        state.apply_drawn(
            &mut rng,
            DrawResponse {
                success: true,
                deck_id: None,
                cards: vec![card("2C", "2", "CLUBS")],
                remaining: 51,
                error: None,
            },
        );
        let before = state.placements.clone();
        state.apply_shuffled(
            &mut rng,
            ShuffleResponse {
                success: true,
                deck_id: None,
                shuffled: true,
                remaining: Some(52),
            },
        );
        assert!(state.drawn.is_empty());
        assert_eq!(state.remaining, 52);
        for (old, new) in before.iter().zip(state.placements.iter()) {
            assert_ne!(old, new);
        }
    }

    #[test]
    fn multi_deck_capacity_comes_from_service() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = DeckState::new(&mut rng);
        state.apply_created(
            &mut rng,
            DeckCreated {
                success: true,
                deck_id: DeckId::parse("multi2").expect("id"),
                remaining: 104,
                shuffled: true,
            },
        );
        assert_eq!(state.capacity, 104);
        assert_eq!(state.placements.len(), 104);
        assert!(state.is_consistent());
    }

    #[test]
    fn failure_notice_names_call() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = DeckState::new(&mut rng);
        state.record_failure(ServiceError::status(ServiceCall::CreateDeck, 500, "Internal Server Error"));
        assert!(state.create_failed);
        let notice = state.notice.clone().expect("notice");
        assert!(notice.is_failure());
        assert_eq!(notice.failed_call(), Some(ServiceCall::CreateDeck));
        assert_eq!(
            notice.to_string(),
            "Failed creating deck (500 Internal Server Error)"
        );
    }
}
