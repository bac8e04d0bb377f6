use crate::key::TrackKey;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_derive::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const CAMERA: Color = Color::new(255, 200, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated hue in degrees, `v` in `[0, 1]`.
    pub fn from_hue(hue: f32, v: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = v;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let q = |f: f32| (f * 255.0).round().clamp(0.0, 255.0) as u8;

        Self::new(q(r), q(g), q(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ColorScheme {
    /// Pure function of the key. Nothing is retained.
    Hashed,
    /// Random hue per key, kept for the whole session (eviction does not forget it).
    Random { seed: Option<u64> },
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Hashed
    }
}

#[derive(Debug)]
pub struct Palette {
    scheme: ColorScheme,
    // only for ColorScheme::Random
    rng: Option<StdRng>,
    assigned: HashMap<TrackKey, Color>,
}

impl Palette {
    pub fn new(scheme: ColorScheme) -> Self {
        let rng = match scheme {
            ColorScheme::Hashed => None,
            ColorScheme::Random { seed: Some(seed) } => Some(StdRng::seed_from_u64(seed)),
            ColorScheme::Random { seed: None } => Some(StdRng::from_entropy()),
        };

        Self {
            scheme,
            rng,
            assigned: HashMap::new(),
        }
    }

    pub fn color_of(&mut self, key: &TrackKey) -> Color {
        match &mut self.rng {
            None => hashed(key),
            Some(rng) => *self
                .assigned
                .entry(key.clone())
                .or_insert_with(|| Color::from_hue(rng.gen_range(0.0..360.0), 0.95)),
        }
    }

    #[inline]
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Number of memoized assignments.
    #[inline]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

fn hashed(key: &TrackKey) -> Color {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);

    let hue = (hasher.finish() % 360) as f32;

    Color::from_hue(hue, 0.95)
}
