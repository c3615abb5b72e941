//! Emotion theming: the fixed label set rooms are themed with.

use serde::{Deserialize, Serialize};

/// The eight emotions a room can be themed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Fear,
    Anger,
    Desire,
    Anxiety,
    Pride,
    Grief,
    Envy,
    Attachment,
}

impl Emotion {
    /// All emotions, in declaration order.
    pub const ALL: [Emotion; 8] = [
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Desire,
        Emotion::Anxiety,
        Emotion::Pride,
        Emotion::Grief,
        Emotion::Envy,
        Emotion::Attachment,
    ];

    /// Stable index into per-emotion tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-line reflective description of the emotion.
    pub fn description(self) -> &'static str {
        match self {
            Emotion::Fear => "The anticipation of future suffering",
            Emotion::Anger => "The desire for revenge or punishment",
            Emotion::Desire => "The attachment to temporary pleasures",
            Emotion::Anxiety => "Worry about uncertain outcomes",
            Emotion::Pride => "Excessive self-regard",
            Emotion::Grief => "Pain from loss or disappointment",
            Emotion::Envy => "Desire for others' possessions or qualities",
            Emotion::Attachment => "Clinging to impermanent things",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// RGB color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Blend from white toward this color by `intensity` (clamped to 0..1).
    pub fn with_intensity(self, intensity: f32) -> Color {
        let t = intensity.clamp(0.0, 1.0);
        Color {
            r: 1.0 + (self.r - 1.0) * t,
            g: 1.0 + (self.g - 1.0) * t,
            b: 1.0 + (self.b - 1.0) * t,
        }
    }
}

/// Presentation data for a single emotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub name: String,
    pub color: Color,
    pub description: String,
    /// Visual intensity scalar applied when tinting a room.
    pub intensity: f32,
}

/// Emotion-to-presentation mapping table, built once at load time.
///
/// Lookup is total: the table always holds a profile for every [`Emotion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionPalette {
    profiles: [EmotionProfile; 8],
}

impl EmotionPalette {
    const DEFAULT_COLORS: [Color; 8] = [
        Color::rgb(0.7, 0.7, 0.7), // Fear - gray
        Color::rgb(0.9, 0.2, 0.2), // Anger - red tint
        Color::rgb(0.2, 0.2, 0.9), // Desire - blue tint
        Color::rgb(0.8, 0.8, 0.2), // Anxiety - yellow tint
        Color::rgb(0.2, 0.9, 0.2), // Pride - green tint
        Color::rgb(0.5, 0.5, 0.5), // Grief - dark gray
        Color::rgb(0.6, 0.2, 0.6), // Envy - purple tint
        Color::rgb(0.4, 0.4, 0.4), // Attachment - medium gray
    ];

    /// Build the palette with the stock color and description set.
    pub fn stoic_defaults() -> Self {
        let profiles = Emotion::ALL.map(|emotion| EmotionProfile {
            name: emotion.to_string(),
            color: Self::DEFAULT_COLORS[emotion.index()],
            description: emotion.description().to_string(),
            intensity: 1.0,
        });
        Self { profiles }
    }

    /// Get the presentation profile for an emotion.
    pub fn profile(&self, emotion: Emotion) -> &EmotionProfile {
        &self.profiles[emotion.index()]
    }

    /// Replace the profile for an emotion.
    pub fn set_profile(&mut self, emotion: Emotion, profile: EmotionProfile) {
        self.profiles[emotion.index()] = profile;
    }

    /// The tint color for an emotion, with its intensity applied.
    pub fn tint(&self, emotion: Emotion) -> Color {
        let profile = self.profile(emotion);
        profile.color.with_intensity(profile.intensity)
    }
}

impl Default for EmotionPalette {
    fn default() -> Self {
        Self::stoic_defaults()
    }
}
