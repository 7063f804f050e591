//! Fixed highlight color palette and the color-choice payload.

use crate::annotation::{HighlightStyle, Rgb, check_opacity};
use crate::error::Result;

/// One entry of the highlight palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: Rgb,
    pub hex: &'static str,
    pub opacity: f64,
}

impl PaletteColor {
    /// The color-chosen payload a picker would send for this entry.
    pub fn to_choice(&self) -> ColorChoice {
        ColorChoice {
            name: self.name.to_string(),
            hex: self.hex.to_string(),
            opacity: self.opacity,
        }
    }

    pub fn to_style(&self) -> HighlightStyle {
        HighlightStyle {
            color_name: self.name.to_string(),
            color_rgb: self.rgb,
            color_hex: self.hex.to_string(),
            opacity: self.opacity,
        }
    }
}

/// Highlight colors offered by the color picker, in display order.
pub const HIGHLIGHT_PALETTE: &[PaletteColor] = &[
    PaletteColor {
        name: "Yellow",
        rgb: Rgb::new(1.0, 1.0, 0.0),
        hex: "#FFFF00",
        opacity: 0.3,
    },
    PaletteColor {
        name: "Green",
        rgb: Rgb::new(0.0, 1.0, 0.0),
        hex: "#00FF00",
        opacity: 0.3,
    },
    PaletteColor {
        name: "Blue",
        rgb: Rgb::new(0.0, 191.0 / 255.0, 1.0),
        hex: "#00BFFF",
        opacity: 0.3,
    },
    PaletteColor {
        name: "Pink",
        rgb: Rgb::new(1.0, 105.0 / 255.0, 180.0 / 255.0),
        hex: "#FF69B4",
        opacity: 0.3,
    },
    PaletteColor {
        name: "Orange",
        rgb: Rgb::new(1.0, 165.0 / 255.0, 0.0),
        hex: "#FFA500",
        opacity: 0.3,
    },
];

/// Look up a palette entry by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static PaletteColor> {
    HIGHLIGHT_PALETTE
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Payload of a color-chosen event: what the picker reports.
///
/// The RGB triple is derived from `hex` rather than sent separately, so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorChoice {
    pub name: String,
    pub hex: String,
    pub opacity: f64,
}

impl ColorChoice {
    pub fn new(name: impl Into<String>, hex: impl Into<String>, opacity: f64) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            opacity,
        }
    }

    /// Resolve into a highlight style, parsing `hex` and checking opacity.
    pub fn to_style(&self) -> Result<HighlightStyle> {
        let rgb = Rgb::from_hex(&self.hex)?;
        check_opacity(self.opacity)?;
        Ok(HighlightStyle {
            color_name: self.name.clone(),
            color_rgb: rgb,
            color_hex: rgb.to_hex(),
            opacity: self.opacity,
        })
    }
}
