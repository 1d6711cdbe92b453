use deckdraw_core::Gesture;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }

    fn hovers(self) -> bool {
        matches!(self, PointerKind::Mouse | PointerKind::Pen)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputEventKind {
    Down,
    Up,
    Cancel,
    Hover,
    Leave,
}

/// Touch has no hover; its enter/leave pair arrives around a press and is
/// covered by `Down`/`Up`.
pub(crate) fn gesture_for(kind: InputEventKind, pointer: PointerKind) -> Option<Gesture> {
    match kind {
        InputEventKind::Hover if pointer.hovers() => Some(Gesture::HoverEnter),
        InputEventKind::Leave if pointer.hovers() => Some(Gesture::HoverLeave),
        InputEventKind::Hover | InputEventKind::Leave => None,
        InputEventKind::Down => Some(Gesture::Press),
        InputEventKind::Up | InputEventKind::Cancel => Some(Gesture::Release),
    }
}

pub(crate) fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
