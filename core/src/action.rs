use crate::controller::{AutoToggle, DrawOutcome, InitOutcome, ShuffleOutcome};
use crate::placement::Gesture;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckAction {
    Initialize,
    Draw,
    AutoTick,
    Shuffle,
    ToggleAutoDraw,
    Faster,
    Slower,
    SetInterval { interval_ms: u32 },
    NudgeSlot { index: usize, gesture: Gesture },
    NudgePile { gesture: Gesture },
    DismissNotice,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Initialized(InitOutcome),
    Drew(DrawOutcome),
    Shuffled(ShuffleOutcome),
    Auto(AutoToggle),
    Interval(u32),
    Nudged(usize),
    NoticeDismissed,
}
