//! Named style table for the patent report
//!
//! Colors and text styles are fixed by the report template. They live here,
//! not inline in the planner, so tests can compare against them directly.

use serde::{Deserialize, Serialize};

use crate::operations::{
    Color, Dimension, Link, OptionalColor, ParagraphStyle, RgbColor, TextStyle,
    WeightedFontFamily,
};

/// 8-bit RGB triple, converted to the editor's 0..1 channels on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> OptionalColor {
        OptionalColor {
            color: Color {
                rgb_color: RgbColor {
                    red: f32::from(self.0) / 255.0,
                    green: f32::from(self.1) / 255.0,
                    blue: f32::from(self.2) / 255.0,
                },
            },
        }
    }
}

pub const ABSTRACT_HEADER: Rgb = Rgb(159, 197, 232);
pub const CODES_HEADER: Rgb = Rgb(207, 226, 243);
pub const EVENTS_HEADER: Rgb = Rgb(159, 197, 232);
pub const LINK: Rgb = Rgb(17, 85, 204);
pub const MUTED: Rgb = Rgb(95, 99, 104);

pub const TITLE: &str = "TITLE";
pub const HEADING_2: &str = "HEADING_2";
pub const NORMAL_TEXT: &str = "NORMAL_TEXT";
pub const CENTER: &str = "CENTER";
pub const NUMBERED_DECIMAL_NESTED: &str = "NUMBERED_DECIMAL_NESTED";

const ABSTRACT_FONT: &str = "Roboto";

fn sized(points: f32, bold: bool) -> TextStyle {
    TextStyle {
        font_size: Some(Dimension::points(points)),
        bold: bold.then_some(true),
        ..Default::default()
    }
}

/// "Prepared by: " and the other cover labels.
pub fn cover_label() -> TextStyle {
    sized(14.0, false)
}

pub fn cover_value() -> TextStyle {
    sized(14.0, true)
}

pub fn body() -> TextStyle {
    sized(10.0, false)
}

pub fn body_bold() -> TextStyle {
    sized(10.0, true)
}

pub fn bold() -> TextStyle {
    TextStyle {
        bold: Some(true),
        ..Default::default()
    }
}

pub fn abstract_body() -> TextStyle {
    TextStyle {
        weighted_font_family: Some(WeightedFontFamily {
            font_family: ABSTRACT_FONT.to_string(),
        }),
        ..body()
    }
}

/// Status cell of an application event: linked statuses are underlined and
/// blue, plain ones muted grey.
pub fn event_status(hyperlink: Option<&str>) -> TextStyle {
    let color = if hyperlink.is_some() { LINK } else { MUTED };
    TextStyle {
        underline: Some(hyperlink.is_some()),
        foreground_color: Some(color.to_color()),
        link: hyperlink.map(|url| Link {
            url: url.to_string(),
        }),
        ..body()
    }
}

pub fn named(style_type: &str) -> ParagraphStyle {
    ParagraphStyle {
        named_style_type: Some(style_type.to_string()),
        alignment: None,
    }
}

pub fn centered_title() -> ParagraphStyle {
    ParagraphStyle {
        alignment: Some(CENTER.to_string()),
        ..named(TITLE)
    }
}

/// Per-deployment knobs of the report template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    pub banner_image_uri: String,
    /// Blank lines between the banner and the title.
    pub leading_blank_lines: u32,
    /// Blank lines between the title and the cover labels.
    pub spacer_lines: u32,
}

pub const DEFAULT_BANNER_IMAGE_URI: &str =
    "https://drive.google.com/uc?export=view&id=1oVrLElJ_q9ErqssSIgxukpAe80UwwWPC";

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            banner_image_uri: DEFAULT_BANNER_IMAGE_URI.to_string(),
            leading_blank_lines: 3,
            spacer_lines: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_channels_scale_to_unit_range() {
        let color = Rgb(255, 0, 51).to_color().color.rgb_color;
        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_event_status_with_link() {
        let style = event_status(Some("https://example.com"));
        assert_eq!(style.underline, Some(true));
        assert_eq!(style.foreground_color, Some(LINK.to_color()));
        assert_eq!(style.link.unwrap().url, "https://example.com");
    }

    #[test]
    fn test_event_status_without_link() {
        let style = event_status(None);
        assert_eq!(style.underline, Some(false));
        assert_eq!(style.foreground_color, Some(MUTED.to_color()));
        assert!(style.link.is_none());
    }

    #[test]
    fn test_abstract_body_keeps_body_size() {
        let style = abstract_body();
        assert_eq!(style.font_size, Some(Dimension::points(10.0)));
        assert_eq!(style.weighted_font_family.unwrap().font_family, "Roboto");
        assert_eq!(style.bold, None);
    }
}
