use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three fixed brush presets offered by the brush-size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BrushSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BrushSize {
    pub const ALL: [BrushSize; 3] = [BrushSize::Small, BrushSize::Medium, BrushSize::Large];

    pub fn label(self) -> &'static str {
        match self {
            BrushSize::Small => "Small",
            BrushSize::Medium => "Medium",
            BrushSize::Large => "Large",
        }
    }
}

/// Thickness in points for each brush preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSizes {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl Default for BrushSizes {
    fn default() -> Self {
        Self {
            small: 10.0,
            medium: 20.0,
            large: 30.0,
        }
    }
}

impl BrushSizes {
    pub fn thickness(&self, size: BrushSize) -> f32 {
        match size {
            BrushSize::Small => self.small,
            BrushSize::Medium => self.medium,
            BrushSize::Large => self.large,
        }
    }

    /// Replaces every preset that is not a positive finite thickness with its
    /// default value.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |size: BrushSize| {
            let thickness = self.thickness(size);
            if thickness.is_finite() && thickness > 0.0 {
                thickness
            } else {
                let fallback = defaults.thickness(size);
                log::warn!(
                    "Invalid {} brush thickness {}, using {}",
                    size.label(),
                    thickness,
                    fallback
                );
                fallback
            }
        };
        Self {
            small: pick(BrushSize::Small),
            medium: pick(BrushSize::Medium),
            large: pick(BrushSize::Large),
        }
    }
}

/// Color and thickness applied to the next stroke that gets started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    pub color: Color32,
    pub thickness: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            thickness: BrushSizes::default().medium,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color tag must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color tag must have 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in color tag: {0:?}")]
    BadDigit(String),
}

/// Parses `#RRGGBB` or `#AARRGGBB` palette tags.
pub fn parse_hex_color(tag: &str) -> Result<Color32, ColorParseError> {
    let hex = tag
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(tag.to_owned()))?;

    let value = match hex.len() {
        6 | 8 => u32::from_str_radix(hex, 16)
            .map_err(|_| ColorParseError::BadDigit(tag.to_owned()))?,
        _ => return Err(ColorParseError::BadLength(tag.to_owned())),
    };

    let [a, r, g, b] = if hex.len() == 6 {
        let [_, r, g, b] = value.to_be_bytes();
        [0xff, r, g, b]
    } else {
        value.to_be_bytes()
    };
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#ffffcc99", // skin
    "#ff000000", // black
    "#ffff0000", // red
    "#ff00ff00", // green
    "#ff0000ff", // blue
    "#ffffff00", // yellow
    "#fffc7b55", // lollipop
    "#ffffffff", // white
];

/// A palette swatch: the tag it was configured with and the parsed color.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub tag: String,
    pub color: Color32,
}

/// Fixed color palette with one active swatch.
#[derive(Debug, Clone)]
pub struct Palette {
    swatches: Vec<Swatch>,
    selected: usize,
}

impl Palette {
    /// Builds a palette from hex tags. Malformed tags are skipped.
    pub fn from_tags<S: AsRef<str>>(tags: &[S], selected: usize) -> Self {
        let swatches: Vec<Swatch> = tags
            .iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                match parse_hex_color(tag) {
                    Ok(color) => Some(Swatch {
                        tag: tag.to_owned(),
                        color,
                    }),
                    Err(err) => {
                        log::warn!("Skipping palette entry: {}", err);
                        None
                    }
                }
            })
            .collect();

        if swatches.is_empty() {
            log::warn!("Palette has no usable colors, falling back to defaults");
            return Self::from_tags(&DEFAULT_PALETTE, 1);
        }

        let selected = selected.min(swatches.len() - 1);
        Self { swatches, selected }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_color(&self) -> Color32 {
        self.swatches[self.selected].color
    }

    /// Makes `index` the active swatch. Returns the new color, or `None` when
    /// the swatch is already active or does not exist.
    pub fn select(&mut self, index: usize) -> Option<Color32> {
        if index == self.selected || index >= self.swatches.len() {
            return None;
        }
        self.selected = index;
        Some(self.swatches[index].color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_tags(&DEFAULT_PALETTE, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#ff00ff00"), Ok(Color32::from_rgb(0, 255, 0)));
        assert_eq!(
            parse_hex_color("#800000ff"),
            Ok(Color32::from_rgba_unmultiplied(0, 0, 255, 0x80))
        );
    }

    #[test]
    fn test_parse_hex_color_errors() {
        assert!(matches!(parse_hex_color("ff0000"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(parse_hex_color("#fff"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(parse_hex_color("#gg0000"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn test_default_palette_starts_on_black() {
        let palette = Palette::default();
        assert_eq!(palette.swatches().len(), DEFAULT_PALETTE.len());
        assert_eq!(palette.selected_index(), 1);
        assert_eq!(palette.selected_color(), Color32::BLACK);
    }

    #[test]
    fn test_select_same_swatch_is_noop() {
        let mut palette = Palette::default();
        assert_eq!(palette.select(1), None);
        assert_eq!(palette.select(2), Some(Color32::RED));
        assert_eq!(palette.selected_index(), 2);
        assert_eq!(palette.select(99), None);
        assert_eq!(palette.selected_index(), 2);
    }

    #[test]
    fn test_bad_tags_are_skipped() {
        let palette = Palette::from_tags(&["#ff0000", "nope", "#0000ff"], 5);
        assert_eq!(palette.swatches().len(), 2);
        assert_eq!(palette.selected_index(), 1);
    }

    #[test]
    fn test_presets() {
        let sizes = BrushSizes::default();
        assert_eq!(sizes.thickness(BrushSize::Small), 10.0);
        assert_eq!(sizes.thickness(BrushSize::Medium), 20.0);
        assert_eq!(sizes.thickness(BrushSize::Large), 30.0);
    }

    #[test]
    fn test_invalid_presets_fall_back_to_defaults() {
        let sizes = BrushSizes {
            small: f32::NAN,
            medium: 0.0,
            large: -5.0,
        }
        .sanitized();
        assert_eq!(sizes, BrushSizes::default());

        let custom = BrushSizes {
            small: 4.0,
            medium: f32::INFINITY,
            large: 50.0,
        }
        .sanitized();
        assert_eq!(custom.small, 4.0);
        assert_eq!(custom.medium, 20.0);
        assert_eq!(custom.large, 50.0);
    }
}
