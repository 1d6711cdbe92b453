use rand::Rng;

pub const BASE_JITTER_PX: f32 = 2.0;
pub const BASE_JITTER_DEG: f32 = 2.0;
pub const DRAWN_CARD_OFFSET_PX: f32 = 20.0;
pub const DRAWN_CARD_ROTATION_DEG: f32 = 20.0;

pub const ANCHOR_CSS: &str = "translate(-50%, -50%)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NudgeBounds {
    pub max_offset: f32,
    pub max_rotation: f32,
}

impl NudgeBounds {
    pub const fn new(max_offset: f32, max_rotation: f32) -> Self {
        Self {
            max_offset,
            max_rotation,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            max_offset: self.max_offset * factor,
            max_rotation: self.max_rotation * factor,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Nudge {
    pub dx: f32,
    pub dy: f32,
    pub rotation: f32,
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    let max = max.abs();
    if max == 0.0 {
        return 0.0;
    }
    rng.random_range(-max..=max)
}

pub fn random_offset<R: Rng + ?Sized>(rng: &mut R, bounds: NudgeBounds) -> Nudge {
    Nudge {
        dx: symmetric(rng, bounds.max_offset),
        dy: symmetric(rng, bounds.max_offset),
        rotation: symmetric(rng, bounds.max_rotation),
    }
}

/// 2D affine transform applied after the centering anchor.
///
/// Stored as the CSS `matrix(a, b, c, d, e, f)` coefficients so any number of
/// nudges collapse into a fixed-size value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self::anchor()
    }
}

impl Placement {
    pub const fn anchor() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Appends `translate(dx, dy) rotate(rotation)` in the card's local frame.
    pub fn compose(self, nudge: Nudge) -> Self {
        let (sin, cos) = nudge.rotation.to_radians().sin_cos();
        let (na, nb, nc, nd) = (cos, sin, -sin, cos);
        Self {
            a: self.a * na + self.c * nb,
            b: self.b * na + self.d * nb,
            c: self.a * nc + self.c * nd,
            d: self.b * nc + self.d * nd,
            e: self.a * nudge.dx + self.c * nudge.dy + self.e,
            f: self.b * nudge.dx + self.d * nudge.dy + self.f,
        }
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    pub fn rotation_deg(&self) -> f32 {
        self.b.atan2(self.a).to_degrees()
    }

    pub fn to_css(&self) -> String {
        format!(
            "{ANCHOR_CSS} matrix({:.4}, {:.4}, {:.4}, {:.4}, {:.2}, {:.2})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

pub fn base_placement<R: Rng + ?Sized>(rng: &mut R) -> Placement {
    compose_placement(
        Placement::anchor(),
        random_offset(rng, NudgeBounds::new(BASE_JITTER_PX, BASE_JITTER_DEG)),
    )
}

pub fn base_placements<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Placement> {
    (0..count).map(|_| base_placement(rng)).collect()
}

pub fn compose_placement(base: Placement, nudge: Nudge) -> Placement {
    base.compose(nudge)
}

pub fn drawn_card_placement<R: Rng + ?Sized>(rng: &mut R) -> Placement {
    compose_placement(
        Placement::anchor(),
        random_offset(
            rng,
            NudgeBounds::new(DRAWN_CARD_OFFSET_PX, DRAWN_CARD_ROTATION_DEG),
        ),
    )
}

/// Geometric falloff for a slot `distance` indices away from the ripple origin.
pub fn attenuation(distance: usize, decay: f32) -> f32 {
    let exp = i32::try_from(distance).unwrap_or(i32::MAX);
    decay.clamp(0.0, 1.0).powi(exp)
}
