//! Severity fill colors.

use lccqa_core::{Error, Result, Severity};

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const RED: Self = Self::new(255, 0, 0);

    /// Parse a 6-digit hex color, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || Error::InvalidParameter {
            name: "color",
            value: hex.to_string(),
            reason: "expected a 6-digit hex color".into(),
        };
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase hex without `#`, e.g. `FFFF00`
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fill color per severity tier. `Normal` cells are never filled.
#[derive(Debug, Clone)]
pub struct Palette {
    fills: Vec<(Severity, Rgb)>,
}

impl Palette {
    /// A palette with no fills
    pub fn empty() -> Self {
        Self { fills: Vec::new() }
    }

    /// Set the fill for a tier, replacing any previous one.
    pub fn with_fill(mut self, tier: Severity, color: Rgb) -> Self {
        if tier == Severity::Normal {
            return self;
        }
        self.fills.retain(|(t, _)| *t != tier);
        self.fills.push((tier, color));
        self
    }

    pub fn fill(&self, tier: Severity) -> Option<Rgb> {
        self.fills
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, color)| *color)
    }
}

impl Default for Palette {
    /// Yellow for cells needing review, red for invalid ones
    fn default() -> Self {
        Self::empty()
            .with_fill(Severity::NeedsReview, Rgb::YELLOW)
            .with_fill(Severity::Invalid, Rgb::RED)
    }
}
