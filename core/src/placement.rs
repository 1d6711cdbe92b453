use rand::Rng;

use crate::transform::{
    attenuation, base_placement, compose_placement, random_offset, Nudge, NudgeBounds, Placement,
};

pub const TOP_ENTER_BOUNDS: NudgeBounds = NudgeBounds::new(10.0, 20.0);
pub const TOP_LEAVE_BOUNDS: NudgeBounds = NudgeBounds::new(5.0, 10.0);
pub const SLOT_ENTER_BOUNDS: NudgeBounds = NudgeBounds::new(5.0, 10.0);
pub const SLOT_LEAVE_BOUNDS: NudgeBounds = NudgeBounds::new(3.0, 5.0);
pub const PILE_ENTER_BOUNDS: NudgeBounds = NudgeBounds::new(5.0, 10.0);
pub const PILE_LEAVE_BOUNDS: NudgeBounds = NudgeBounds::new(3.0, 5.0);

pub const HOVER_RIPPLE_DECAY: f32 = 0.4;
pub const PRESS_RIPPLE_DECAY: f32 = 0.6;
pub const RIPPLE_CUTOFF: f32 = 0.05;

const RESET_ATTEMPTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    HoverEnter,
    HoverLeave,
    Press,
    Release,
}

impl Gesture {
    fn is_entering(self) -> bool {
        matches!(self, Gesture::HoverEnter | Gesture::Press)
    }

    pub fn ripple_decay(self) -> f32 {
        match self {
            Gesture::HoverEnter | Gesture::HoverLeave => HOVER_RIPPLE_DECAY,
            Gesture::Press | Gesture::Release => PRESS_RIPPLE_DECAY,
        }
    }
}

pub fn deck_slot_bounds(gesture: Gesture, is_top: bool) -> NudgeBounds {
    match (gesture.is_entering(), is_top) {
        (true, true) => TOP_ENTER_BOUNDS,
        (true, false) => SLOT_ENTER_BOUNDS,
        (false, true) => TOP_LEAVE_BOUNDS,
        (false, false) => SLOT_LEAVE_BOUNDS,
    }
}

pub fn pile_bounds(gesture: Gesture) -> NudgeBounds {
    if gesture.is_entering() {
        PILE_ENTER_BOUNDS
    } else {
        PILE_LEAVE_BOUNDS
    }
}

/// Per-slot placements for the face-down stack, indexed bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementTable {
    slots: Vec<Placement>,
}

impl PlacementTable {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| base_placement(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Placement> {
        self.slots.get(index).copied()
    }

    pub fn set(&mut self, index: usize, placement: Placement) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = placement;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.slots.iter()
    }

    /// Resamples every slot; no slot keeps the value it had before.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in &mut self.slots {
            let previous = *slot;
            let mut next = base_placement(rng);
            let mut attempts = 1;
            while next == previous && attempts < RESET_ATTEMPTS {
                next = base_placement(rng);
                attempts += 1;
            }
            if next == previous {
                next = base_placement(rng).compose(Nudge {
                    dx: 0.5,
                    dy: 0.0,
                    rotation: 0.0,
                });
            }
            *slot = next;
        }
    }

    pub fn resize<R: Rng + ?Sized>(&mut self, rng: &mut R, len: usize) {
        if len == self.slots.len() {
            self.reset(rng);
        } else {
            *self = Self::new(rng, len);
        }
    }

    pub fn nudge<R: Rng + ?Sized>(&mut self, index: usize, bounds: NudgeBounds, rng: &mut R) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        *slot = compose_placement(*slot, random_offset(rng, bounds));
        true
    }

    /// Nudges `center` and spreads attenuated nudges to visible neighbours on
    /// both sides. Returns the indices that moved.
    pub fn ripple<R: Rng + ?Sized>(
        &mut self,
        center: usize,
        visible: usize,
        bounds: NudgeBounds,
        decay: f32,
        rng: &mut R,
    ) -> Vec<usize> {
        let visible = visible.min(self.slots.len());
        if center >= visible {
            return Vec::new();
        }
        let mut moved = Vec::new();
        self.nudge(center, bounds, rng);
        moved.push(center);
        for distance in 1..visible {
            let factor = attenuation(distance, decay);
            if factor < RIPPLE_CUTOFF {
                break;
            }
            let scaled = bounds.scaled(factor);
            let below = center.checked_sub(distance);
            let above = Some(center + distance).filter(|idx| *idx < visible);
            if below.is_none() && above.is_none() {
                break;
            }
            for idx in below.into_iter().chain(above) {
                self.nudge(idx, scaled, rng);
                moved.push(idx);
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut table = PlacementTable::new(&mut rng, 52);
        assert_eq!(table.len(), 52);
        assert!(table.get(52).is_none());
        assert!(table.set(3, Placement::anchor()));
        assert_eq!(table.get(3), Some(Placement::anchor()));
        assert!(!table.set(52, Placement::anchor()));
    }

    #[test]
    fn reset_replaces_every_slot() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut table = PlacementTable::new(&mut rng, 52);
        let before = table.clone();
        table.reset(&mut rng);
        for (old, new) in before.iter().zip(table.iter()) {
            assert_ne!(old, new);
        }
    }

    #[test]
    fn nudge_touches_only_its_slot() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut table = PlacementTable::new(&mut rng, 10);
        let before = table.clone();
        assert!(table.nudge(4, TOP_ENTER_BOUNDS, &mut rng));
        for idx in 0..10 {
            if idx == 4 {
                assert_ne!(table.get(idx), before.get(idx));
            } else {
                assert_eq!(table.get(idx), before.get(idx));
            }
        }
        assert!(!table.nudge(10, TOP_ENTER_BOUNDS, &mut rng));
    }

    #[test]
    fn ripple_stops_at_cutoff_and_visible_edge() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut table = PlacementTable::new(&mut rng, 52);
        // 0.4^3 = 0.064 still moves, 0.4^4 = 0.0256 does not.
        let mut moved = table.ripple(20, 52, SLOT_ENTER_BOUNDS, HOVER_RIPPLE_DECAY, &mut rng);
        moved.sort_unstable();
        assert_eq!(moved, vec![17, 18, 19, 20, 21, 22, 23]);

        let mut moved = table.ripple(1, 3, SLOT_ENTER_BOUNDS, PRESS_RIPPLE_DECAY, &mut rng);
        moved.sort_unstable();
        assert_eq!(moved, vec![0, 1, 2]);

        assert!(table
            .ripple(30, 30, SLOT_ENTER_BOUNDS, HOVER_RIPPLE_DECAY, &mut rng)
            .is_empty());
    }

    #[test]
    fn gesture_bounds() {
        assert_eq!(deck_slot_bounds(Gesture::HoverEnter, true), TOP_ENTER_BOUNDS);
        assert_eq!(deck_slot_bounds(Gesture::Press, false), SLOT_ENTER_BOUNDS);
        assert_eq!(deck_slot_bounds(Gesture::Release, true), TOP_LEAVE_BOUNDS);
        assert_eq!(deck_slot_bounds(Gesture::HoverLeave, false), SLOT_LEAVE_BOUNDS);
        assert_eq!(pile_bounds(Gesture::HoverLeave), PILE_LEAVE_BOUNDS);
        assert_eq!(Gesture::Press.ripple_decay(), PRESS_RIPPLE_DECAY);
    }
}
