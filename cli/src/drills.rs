use deckdraw_core::{CardData, CreateDeckRequest, DeckService, ServiceCall, ServiceError};

fn first_card(cards: Vec<CardData>) -> Result<CardData, ServiceError> {
    cards
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::decode(ServiceCall::Draw, "no card in draw response"))
}

/// One card from a newly shuffled deck.
pub async fn single_card<S: DeckService>(service: &S) -> Result<CardData, ServiceError> {
    let deck = service.create_deck(CreateDeckRequest::default()).await?;
    let drawn = service.draw_cards(&deck.deck_id, 1).await?;
    first_card(drawn.cards)
}

/// Two cards drawn one after another from the same newly shuffled deck.
pub async fn card_pair<S: DeckService>(service: &S) -> Result<[CardData; 2], ServiceError> {
    let deck = service.create_deck(CreateDeckRequest::default()).await?;
    let first = first_card(service.draw_cards(&deck.deck_id, 1).await?.cards)?;
    let second = first_card(service.draw_cards(&deck.deck_id, 1).await?.cards)?;
    Ok([first, second])
}
