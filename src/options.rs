//! Presentation options owned by the Dock and carried to the Display in every
//! dispatch. Each option has a fixed set of wire values; anything unknown or
//! empty falls back to the default so a malformed URL still renders.

use serde::{Deserialize, Serialize};

/// Shared behavior of the enumerated options: wire value, operator-facing
/// label, and forward cycling for the Dock's single-key toggles.
pub trait OptionValue: Sized + Copy + PartialEq + Default + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Extra spellings accepted when parsing.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    fn parse_or_default(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| {
                value.as_str().eq_ignore_ascii_case(raw)
                    || value
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(raw))
            })
            .unwrap_or_default()
    }

    fn next(self) -> Self {
        let position = Self::ALL
            .iter()
            .position(|value| *value == self)
            .unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Celestial,
    Dark,
    Light,
    Projector,
}

impl OptionValue for Theme {
    const ALL: &'static [Self] = &[Theme::Celestial, Theme::Dark, Theme::Light, Theme::Projector];

    fn as_str(self) -> &'static str {
        match self {
            Theme::Celestial => "celestial",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Projector => "projector",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Theme::Celestial => "Celestial",
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Projector => "Projector",
        }
    }
}

/// Which language column(s) the Display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Both,
    Primary,
    Secondary,
}

impl OptionValue for ViewMode {
    const ALL: &'static [Self] = &[ViewMode::Both, ViewMode::Primary, ViewMode::Secondary];

    fn as_str(self) -> &'static str {
        match self {
            ViewMode::Both => "both",
            ViewMode::Primary => "primary",
            ViewMode::Secondary => "secondary",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ViewMode::Both => "Both",
            ViewMode::Primary => "Primary",
            ViewMode::Secondary => "Secondary",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ViewMode::Both => &[],
            ViewMode::Primary => &["yoruba"],
            ViewMode::Secondary => &["english"],
        }
    }
}

/// Text scale. Wire values keep the utility-class names used by the browser
/// Display (`lg`, `xl`, `3xl`, `5xl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontSize {
    #[serde(rename = "lg")]
    Small,
    #[default]
    #[serde(rename = "xl")]
    Medium,
    #[serde(rename = "3xl")]
    Large,
    #[serde(rename = "5xl")]
    ExtraLarge,
}

impl OptionValue for FontSize {
    const ALL: &'static [Self] = &[
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::ExtraLarge,
    ];

    fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "lg",
            FontSize::Medium => "xl",
            FontSize::Large => "3xl",
            FontSize::ExtraLarge => "5xl",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::ExtraLarge => "XL",
        }
    }
}

impl FontSize {
    /// CSS size matching the utility class of the same name.
    pub fn css_size(self) -> &'static str {
        match self {
            FontSize::Small => "1.125rem",
            FontSize::Medium => "1.25rem",
            FontSize::Large => "1.875rem",
            FontSize::ExtraLarge => "3rem",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Center,
    Left,
    Justify,
}

impl OptionValue for Align {
    const ALL: &'static [Self] = &[Align::Center, Align::Left, Align::Justify];

    fn as_str(self) -> &'static str {
        match self {
            Align::Center => "center",
            Align::Left => "left",
            Align::Justify => "justify",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Align::Center => "Center",
            Align::Left => "Left",
            Align::Justify => "Justify",
        }
    }
}

/// The flat set of style options serialized into every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationOptions {
    pub theme: Theme,
    pub view: ViewMode,
    pub font_size: FontSize,
    pub align: Align,
    /// Background image URL; empty means none.
    pub bg_image: String,
}
