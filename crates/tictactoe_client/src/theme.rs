//! Colour theme. Presentation only.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::instrument;

/// Two-valued UI theme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

/// Colours used by the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Body text.
    pub text: Color,
    /// Screen background.
    pub background: Color,
    /// Titles and borders of focused widgets.
    pub accent: Color,
    /// Help lines and empty cells.
    pub muted: Color,
    /// Cells held by X.
    pub mark_x: Color,
    /// Cells held by O.
    pub mark_o: Color,
    /// Background of winning cells.
    pub highlight: Color,
    /// Keyboard cursor background.
    pub cursor: Color,
    /// Error and notice messages.
    pub message: Color,
}

impl Theme {
    /// Returns the other theme.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Colours for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::White,
                background: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                mark_x: Color::LightBlue,
                mark_o: Color::LightRed,
                highlight: Color::Green,
                cursor: Color::Gray,
                message: Color::Yellow,
            },
            Theme::Light => Palette {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                mark_x: Color::Blue,
                mark_o: Color::Red,
                highlight: Color::LightGreen,
                cursor: Color::LightYellow,
                message: Color::Magenta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
