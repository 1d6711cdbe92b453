use clap::{Parser, Subcommand};
use deckdraw_cli::drills::{card_pair, single_card};
use deckdraw_cli::{run_auto_then_shuffle, ReqwestDeckService, WatchTicks};
use deckdraw_core::{
    AutoToggle, CreateDeckRequest, DeckController, DeckId, DeckService, InitOutcome,
    AUTO_DRAW_DEFAULT_MS, DEFAULT_API_BASE,
};
use url::Url;

#[derive(Parser)]
#[command(name = "deckdraw-cli", version, about = "Draw cards from the deck of cards service")]
struct Cli {
    #[arg(long, env = "DECK_API_BASE_URL", default_value = DEFAULT_API_BASE, global = true)]
    base_url: Url,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one card from a newly shuffled deck.
    Card,
    /// Draw two cards, one after the other, from the same newly shuffled deck.
    Pair,
    /// Draw on a timer until the deck runs out.
    Auto {
        #[arg(long, default_value_t = AUTO_DRAW_DEFAULT_MS)]
        interval_ms: u32,
        #[arg(long, default_value_t = 1)]
        decks: u32,
        #[arg(long)]
        shuffle_when_empty: bool,
    },
    /// Draw from an existing deck.
    Draw {
        #[arg(long)]
        deck_id: DeckId,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Return cards to an existing deck.
    Shuffle {
        #[arg(long)]
        deck_id: DeckId,
        #[arg(long)]
        remaining_only: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let service = ReqwestDeckService::new(&cli.base_url);

    match cli.command {
        Commands::Card => {
            let card = single_card(&service).await?;
            println!("{}", card.label().to_lowercase());
        }
        Commands::Pair => {
            let [first, second] = card_pair(&service).await?;
            println!("{}", first.label().to_lowercase());
            println!("{}", second.label().to_lowercase());
        }
        Commands::Auto {
            interval_ms,
            decks,
            shuffle_when_empty,
        } => {
            let (ticks, period) = WatchTicks::channel();
            let deck = DeckController::with_seed(service, ticks, rand::random())
                .with_create_request(CreateDeckRequest {
                    shuffled: true,
                    deck_count: decks.max(1),
                })
                .with_interval(interval_ms);
            match deck.initialize().await {
                InitOutcome::Ready { remaining } => {
                    println!("deck ready: {remaining} cards, one every {}ms", deck.interval_ms());
                }
                InitOutcome::Failed(err) => return Err(err.into()),
                InitOutcome::Rejected(reason) => {
                    return Err(format!("deck not created: {reason:?}").into())
                }
            }
            if let AutoToggle::Rejected(reason) = deck.toggle_auto_draw() {
                return Err(format!("auto-draw not started: {reason:?}").into());
            }
            let report = run_auto_then_shuffle(&deck, period, shuffle_when_empty, |card, remaining| {
                println!("{:>3} left  {}", remaining, card.label().to_lowercase());
            })
            .await;
            if let Some(notice) = deck.snapshot().notice {
                println!("{notice}");
            }
            if report.shuffled {
                println!("shuffled {} cards back into the deck", report.drawn);
            }
            if let Some(err) = report.error {
                return Err(err.into());
            }
        }
        Commands::Draw { deck_id, count } => {
            let drawn = service.draw_cards(&deck_id, count).await?;
            for card in &drawn.cards {
                println!("{}  {}", card.code, card.label().to_lowercase());
            }
            if let Some(reason) = drawn.error {
                println!("{reason}");
            }
            println!("remaining: {}", drawn.remaining);
        }
        Commands::Shuffle {
            deck_id,
            remaining_only,
        } => {
            let shuffled = service.shuffle_with(&deck_id, remaining_only).await?;
            match shuffled.remaining {
                Some(remaining) => println!("shuffled: {remaining} cards in deck {deck_id}"),
                None => println!("shuffled deck {deck_id}"),
            }
        }
    }

    Ok(())
}
