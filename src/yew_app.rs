use std::rc::Rc;

use deckdraw_core::{DeckAction, DeckSnapshot, DrawnCard, Gesture, Placement};
use web_sys::{KeyboardEvent, PointerEvent};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::app_router;
use crate::input::{gesture_for, is_activation_key, InputEventKind, PointerKind};

const CARD_BACK_SRC: &str = "https://deckofcardsapi.com/static/img/back.png";
const CARD_BACK_ALT: &str = "Shuffle deck, face down";

#[derive(Properties)]
struct AppProps {
    core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn pointer_gesture(kind: InputEventKind, event: &PointerEvent) -> Option<Gesture> {
    gesture_for(kind, PointerKind::from_pointer_type(&event.pointer_type()))
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let app_snapshot = use_state(|| app_core.snapshot());
    {
        let app_core = app_core.clone();
        let app_snapshot = app_snapshot.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let app_snapshot_for_cb = app_snapshot.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                app_snapshot_for_cb.set(app_core_for_cb.snapshot());
            }));
            app_snapshot.set(app_core.snapshot());
            move || drop(subscription)
        });
    }
    let dispatch = {
        let app_core = app_core.clone();
        Callback::from(move |action: DeckAction| app_core.dispatch(action))
    };
    let snapshot = (*app_snapshot).clone();

    html! {
        <div id="game-container" role="main">
            <Controls snapshot={snapshot.clone()} dispatch={dispatch.clone()} />
            <DrawnPileView drawn={snapshot.drawn.clone()} dispatch={dispatch.clone()} />
            <DeckView
                slots={snapshot.slots.clone()}
                remaining={snapshot.remaining}
                dispatch={dispatch}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DeckViewProps {
    pub(crate) slots: Vec<Placement>,
    pub(crate) remaining: u32,
    pub(crate) dispatch: Callback<DeckAction>,
}

#[function_component(DeckView)]
pub(crate) fn deck_view(props: &DeckViewProps) -> Html {
    let remaining = props.remaining as usize;
    let on_draw = {
        let dispatch = props.dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(DeckAction::Draw))
    };
    let slots: Html = props
        .slots
        .iter()
        .enumerate()
        .map(|(index, placement)| {
            let visible = index < remaining;
            let is_top = index + 1 == remaining;
            let style = format!(
                "display: {}; z-index: {}; --base-transform: {};",
                if visible { "block" } else { "none" },
                index + 1,
                placement.to_css()
            );
            let nudge = |kind: InputEventKind| {
                let dispatch = props.dispatch.clone();
                Callback::from(move |event: PointerEvent| {
                    if let Some(gesture) = pointer_gesture(kind, &event) {
                        dispatch.emit(DeckAction::NudgeSlot { index, gesture });
                    }
                })
            };
            html! {
                <img
                    key={index}
                    src={CARD_BACK_SRC}
                    alt={CARD_BACK_ALT}
                    class={classes!("deck-card", is_top.then_some("top-card"))}
                    data-pin-nopin="true"
                    style={style}
                    onpointerenter={nudge(InputEventKind::Hover)}
                    onpointerleave={nudge(InputEventKind::Leave)}
                    onpointerdown={nudge(InputEventKind::Down)}
                    onpointerup={nudge(InputEventKind::Up)}
                    onpointercancel={nudge(InputEventKind::Cancel)}
                />
            }
        })
        .collect();

    html! {
        <div
            id="deck"
            aria-label={format!("Deck of cards: {remaining} remaining")}
            onclick={on_draw}
        >
            { slots }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DrawnPileProps {
    pub(crate) drawn: Vec<DrawnCard>,
    pub(crate) dispatch: Callback<DeckAction>,
}

#[function_component(DrawnPileView)]
pub(crate) fn drawn_pile_view(props: &DrawnPileProps) -> Html {
    let has_cards = !props.drawn.is_empty();
    let on_click = {
        let dispatch = props.dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            if has_cards {
                dispatch.emit(DeckAction::Shuffle);
            }
        })
    };
    let on_key = {
        let dispatch = props.dispatch.clone();
        Callback::from(move |event: KeyboardEvent| {
            if is_activation_key(&event.key()) {
                event.prevent_default();
                if has_cards {
                    dispatch.emit(DeckAction::Shuffle);
                }
            }
        })
    };
    let nudge = |kind: InputEventKind| {
        let dispatch = props.dispatch.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(gesture) = pointer_gesture(kind, &event) {
                dispatch.emit(DeckAction::NudgePile { gesture });
            }
        })
    };
    let cards: Html = props
        .drawn
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let style = format!(
                "transform: {}; z-index: {};",
                card.placement.to_css(),
                index + 1
            );
            html! {
                <img
                    key={format!("{}-{index}", card.code)}
                    src={card.image.clone()}
                    alt={card.label()}
                    class="card"
                    data-pin-nopin="true"
                    style={style}
                />
            }
        })
        .collect();

    html! {
        <div
            id="drawn-cards-container"
            role="button"
            tabindex="0"
            aria-label={format!(
                "Drawn pile: {} cards. Click to shuffle back.",
                props.drawn.len()
            )}
            class={classes!(has_cards.then_some("active"))}
            onclick={on_click}
            onkeydown={on_key}
            onpointerenter={nudge(InputEventKind::Hover)}
            onpointerleave={nudge(InputEventKind::Leave)}
        >
            { cards }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ControlsProps {
    pub(crate) snapshot: DeckSnapshot,
    pub(crate) dispatch: Callback<DeckAction>,
}

#[function_component(Controls)]
pub(crate) fn controls(props: &ControlsProps) -> Html {
    let snapshot = &props.snapshot;
    let action = |action: DeckAction| {
        let dispatch = props.dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(action))
    };
    let retry = snapshot.can_retry().then(|| {
        html! {
            <button class="retry" onclick={action(DeckAction::Initialize)}>
                { "Retry" }
            </button>
        }
    });
    let notice = snapshot.notice.as_ref().map(|notice| {
        html! {
            <div class="error-message" role="alert">
                <span>{ notice.to_string() }</span>
                <button
                    class="dismiss"
                    aria-label="Dismiss"
                    onclick={action(DeckAction::DismissNotice)}
                >
                    { "×" }
                </button>
            </div>
        }
    });
    let loading = snapshot.is_loading().then(|| {
        html! { <div class="loading" aria-live="polite">{ "Loading deck…" }</div> }
    });
    let auto_label = if snapshot.auto_active { "Stop" } else { "Auto" };

    html! {
        <div class="controls">
            <button
                onclick={action(DeckAction::Draw)}
                disabled={!snapshot.can_draw()}
                aria-disabled={(!snapshot.can_draw()).to_string()}
            >
                { "Draw" }
            </button>
            <button
                onclick={action(DeckAction::ToggleAutoDraw)}
                disabled={!snapshot.can_toggle_auto()}
                aria-pressed={snapshot.auto_active.to_string()}
            >
                { auto_label }
            </button>
            <button
                onclick={action(DeckAction::Faster)}
                disabled={!snapshot.can_go_faster()}
            >
                { "Faster" }
            </button>
            <button
                onclick={action(DeckAction::Slower)}
                disabled={!snapshot.can_go_slower()}
            >
                { "Slower" }
            </button>
            <button
                onclick={action(DeckAction::Shuffle)}
                disabled={!snapshot.can_shuffle()}
                aria-disabled={(!snapshot.can_shuffle()).to_string()}
            >
                { "Shuffle" }
            </button>
            <div class="speed">{ format!("{}ms", snapshot.interval_ms) }</div>
            <div class="remaining" aria-live="polite">
                { "Remaining: " }<strong>{ snapshot.remaining }</strong>
            </div>
            { for loading }
            { for retry }
            { for notice }
        </div>
    }
}

pub(crate) fn run() {
    let config = app_router::load_init_config();
    gloo::console::log!(
        "deckdraw starting",
        config.api_base.clone(),
        config.interval_ms
    );
    let core = AppCore::new(&config);
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"));
    let props = AppProps {
        core: Rc::clone(&core),
    };
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, props).render();
        }
        None => {
            yew::Renderer::<App>::with_props(props).render();
        }
    }
    core.start();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use deckdraw_core::Nudge;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_point() -> web_sys::Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    #[wasm_bindgen_test(async)]
    async fn deck_view_hides_drawn_slots_and_marks_top() {
        let root = mount_point();
        let slots = vec![Placement::anchor(); 52];
        let _handle = yew::Renderer::<DeckView>::with_root_and_props(
            root.clone(),
            DeckViewProps {
                slots,
                remaining: 50,
                dispatch: Callback::noop(),
            },
        )
        .render();
        TimeoutFuture::new(0).await;

        let cards = root.query_selector_all(".deck-card").expect("query cards");
        assert_eq!(cards.length(), 52);
        let top = root
            .query_selector_all(".top-card")
            .expect("query top card");
        assert_eq!(top.length(), 1);
        let top = root
            .query_selector(".top-card")
            .expect("query top")
            .expect("top card present");
        let style = top.get_attribute("style").unwrap_or_default();
        assert!(style.contains("z-index: 50"));
        assert!(style.contains("--base-transform: translate(-50%, -50%) matrix("));
    }

    #[wasm_bindgen_test(async)]
    async fn drawn_pile_labels_cards_and_count() {
        let root = mount_point();
        let card = DrawnCard {
            code: "5S".to_string(),
            value: "5".to_string(),
            suit: "SPADES".to_string(),
            image: "https://deckofcardsapi.com/static/img/5S.png".to_string(),
            placement: Placement::anchor().compose(Nudge {
                dx: 4.0,
                dy: -3.0,
                rotation: 12.0,
            }),
        };
        let _handle = yew::Renderer::<DrawnPileView>::with_root_and_props(
            root.clone(),
            DrawnPileProps {
                drawn: vec![card],
                dispatch: Callback::noop(),
            },
        )
        .render();
        TimeoutFuture::new(0).await;

        let pile = root
            .query_selector("#drawn-cards-container")
            .expect("query pile")
            .expect("pile present");
        assert_eq!(
            pile.get_attribute("aria-label").as_deref(),
            Some("Drawn pile: 1 cards. Click to shuffle back.")
        );
        assert_eq!(pile.class_name(), "active");
        let image = root
            .query_selector(".card")
            .expect("query card")
            .expect("card present");
        assert_eq!(image.get_attribute("alt").as_deref(), Some("5 of SPADES"));
    }
}
