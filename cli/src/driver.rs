use std::time::Duration;

use deckdraw_core::{
    DeckController, DeckService, DrawOutcome, DrawnCard, ServiceError, ShuffleOutcome, TickSource,
};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Publishes the auto-draw period; `None` while stopped.
#[derive(Debug)]
pub struct WatchTicks {
    tx: watch::Sender<Option<u32>>,
}

impl WatchTicks {
    pub fn channel() -> (Self, watch::Receiver<Option<u32>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }

    pub fn period(&self) -> Option<u32> {
        *self.tx.borrow()
    }
}

impl TickSource for WatchTicks {
    fn start(&mut self, period_ms: u32) {
        self.tx.send_replace(Some(period_ms));
    }

    fn stop(&mut self) {
        self.tx.send_replace(None);
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct AutoReport {
    pub drawn: usize,
    pub shuffled: bool,
    pub error: Option<ServiceError>,
}

/// Runs ticks at the published period until auto-draw stops.
///
/// A period change drops the running interval and starts a new one, so ticks
/// from two periods never interleave.
pub async fn run_auto<S, F>(
    deck: &DeckController<S, WatchTicks>,
    mut period: watch::Receiver<Option<u32>>,
    mut on_card: F,
) -> AutoReport
where
    S: DeckService,
    F: FnMut(&DrawnCard, u32),
{
    let mut report = AutoReport::default();
    loop {
        let Some(period_ms) = *period.borrow_and_update() else {
            break;
        };
        let mut ticker = tokio::time::interval(Duration::from_millis(u64::from(period_ms)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match deck.auto_tick().await {
                        DrawOutcome::Drawn { cards, remaining } => {
                            for card in &cards {
                                on_card(card, remaining);
                            }
                            report.drawn += cards.len();
                        }
                        DrawOutcome::Failed(err) => {
                            warn!(error = %err, "auto-draw stopped");
                            report.error = Some(err);
                        }
                        DrawOutcome::Exhausted | DrawOutcome::Rejected(_) => {}
                    }
                }
                changed = period.changed() => {
                    if changed.is_err() {
                        return report;
                    }
                    break;
                }
            }
        }
    }
    info!(drawn = report.drawn, "auto-draw finished");
    report
}

pub async fn run_auto_then_shuffle<S, F>(
    deck: &DeckController<S, WatchTicks>,
    period: watch::Receiver<Option<u32>>,
    shuffle_when_empty: bool,
    on_card: F,
) -> AutoReport
where
    S: DeckService,
    F: FnMut(&DrawnCard, u32),
{
    let mut report = run_auto(deck, period, on_card).await;
    if shuffle_when_empty && report.error.is_none() {
        match deck.shuffle().await {
            ShuffleOutcome::Shuffled { .. } => report.shuffled = true,
            ShuffleOutcome::Failed(err) => report.error = Some(err),
            ShuffleOutcome::Rejected(reason) => warn!(?reason, "shuffle skipped"),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckdraw_core::{
        AutoToggle, CardData, CreateDeckRequest, DeckCreated, DeckId, DrawResponse, InitOutcome,
        ServiceCall, ShuffleResponse,
    };
    use std::cell::Cell;

    struct CountingService {
        capacity: u32,
        remaining: Cell<u32>,
        fail_at: Option<u32>,
    }

    impl CountingService {
        fn new(capacity: u32) -> Self {
            Self {
                capacity,
                remaining: Cell::new(capacity),
                fail_at: None,
            }
        }

        fn id() -> DeckId {
            DeckId::parse("drv01").expect("id")
        }
    }

    impl DeckService for CountingService {
        async fn create_deck(&self, _: CreateDeckRequest) -> Result<DeckCreated, ServiceError> {
            Ok(DeckCreated {
                success: true,
                deck_id: Self::id(),
                remaining: self.capacity,
                shuffled: true,
            })
        }

        async fn draw_cards(&self, _: &DeckId, _: u32) -> Result<DrawResponse, ServiceError> {
            let left = self.remaining.get();
            if self.fail_at == Some(left) {
                return Err(ServiceError::status(ServiceCall::Draw, 502, "Bad Gateway"));
            }
            self.remaining.set(left - 1);
            Ok(DrawResponse {
                success: true,
                deck_id: None,
                cards: vec![CardData {
                    code: format!("{left}C"),
                    image: String::new(),
                    value: left.to_string(),
                    suit: "CLUBS".to_string(),
                }],
                remaining: left - 1,
                error: None,
            })
        }

        async fn shuffle_deck(&self, _: &DeckId) -> Result<ShuffleResponse, ServiceError> {
            self.remaining.set(self.capacity);
            Ok(ShuffleResponse {
                success: true,
                deck_id: None,
                shuffled: true,
                remaining: Some(self.capacity),
            })
        }
    }

    async fn started(
        service: CountingService,
    ) -> (
        DeckController<CountingService, WatchTicks>,
        watch::Receiver<Option<u32>>,
    ) {
        let (ticks, period) = WatchTicks::channel();
        let deck = DeckController::with_seed(service, ticks, 9).with_interval(200);
        assert!(matches!(deck.initialize().await, InitOutcome::Ready { .. }));
        assert_eq!(
            deck.toggle_auto_draw(),
            AutoToggle::Started { interval_ms: 200 }
        );
        (deck, period)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_until_empty_then_shuffles() {
        let (deck, period) = started(CountingService::new(3)).await;
        let mut seen = Vec::new();
        let report = run_auto_then_shuffle(&deck, period, true, |card, remaining| {
            seen.push((card.code.clone(), remaining));
        })
        .await;
        assert_eq!(report.drawn, 3);
        assert!(report.shuffled);
        assert_eq!(report.error, None);
        assert_eq!(
            seen,
            vec![("3C".to_string(), 2), ("2C".to_string(), 1), ("1C".to_string(), 0)]
        );
        assert_eq!(deck.snapshot().remaining, 3);
        assert_eq!(deck.with_ticks(WatchTicks::period), None);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_ends_the_run() {
        let mut service = CountingService::new(5);
        service.fail_at = Some(3);
        let (deck, period) = started(service).await;
        let report = run_auto_then_shuffle(&deck, period, true, |_, _| {}).await;
        assert_eq!(report.drawn, 2);
        assert!(!report.shuffled);
        assert_eq!(
            report.error.map(|err| err.to_string()).as_deref(),
            Some("Failed drawing cards (502 Bad Gateway)")
        );
    }
}
