//! HUD models.
//!
//! Floating pickup text and the inventory listing. A renderer reads these;
//! nothing here draws.

use std::collections::BTreeMap;

use tessera_economy::ItemKind;

/// RGBA color, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `factor` (clamped to 0..=1).
    #[must_use]
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: (f32::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Text that drifts up from a screen point and fades out.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    /// Content, e.g. `"+1 Dirt"`.
    pub text: String,
    /// Screen X in pixels.
    pub x: f32,
    /// Screen Y in pixels.
    pub y: f32,
    /// Base color.
    pub color: Color,
    /// Seconds since spawn.
    pub age: f32,
    /// Seconds at full opacity.
    pub duration: f32,
    /// Seconds of fade after `duration`.
    pub fade_out: f32,
}

impl FloatingText {
    /// Seconds at full opacity.
    pub const DEFAULT_DURATION: f32 = 0.5;
    /// Seconds of fade.
    pub const DEFAULT_FADE_OUT: f32 = 0.25;
    /// Upward drift in pixels per second.
    pub const RISE_SPEED: f32 = 40.0;

    /// Creates white text with the default timings.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color: Color::WHITE,
            age: 0.0,
            duration: Self::DEFAULT_DURATION,
            fade_out: Self::DEFAULT_FADE_OUT,
        }
    }

    /// Same text in another color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Advances the animation. Returns `false` once the text is gone.
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.y -= Self::RISE_SPEED * dt;
        self.is_alive()
    }

    /// True until `duration + fade_out` has elapsed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.age < self.duration + self.fade_out
    }

    /// Opacity: 1 until `duration`, then linear to 0.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        if self.age <= self.duration {
            1.0
        } else if self.fade_out <= 0.0 {
            0.0
        } else {
            (1.0 - (self.age - self.duration) / self.fade_out).clamp(0.0, 1.0)
        }
    }

    /// Base color with the current opacity applied.
    #[must_use]
    pub fn current_color(&self) -> Color {
        self.color.faded(self.alpha())
    }
}

/// Live floating texts.
#[derive(Debug, Clone, Default)]
pub struct FloatingTexts {
    texts: Vec<FloatingText>,
}

impl FloatingTexts {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text.
    pub fn spawn(&mut self, text: FloatingText) {
        self.texts.push(text);
    }

    /// Advances every text and drops finished ones.
    pub fn update(&mut self, dt: f32) {
        self.texts.retain_mut(|text| text.update(dt));
    }

    /// Live texts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FloatingText> {
        self.texts.iter()
    }

    /// Number of live texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// True if no text is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// One `"Name: count"` line per held kind, in id order.
#[must_use]
pub fn inventory_lines(contents: &BTreeMap<ItemKind, u32>) -> Vec<String> {
    contents
        .iter()
        .map(|(kind, count)| format!("{}: {count}", kind.name()))
        .collect()
}
