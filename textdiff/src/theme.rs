//! Colour palettes for the terminal UI.
//!
//! Picked once at startup from the `theme` config key; there is no runtime
//! switch. `dark` sticks to the 16 ANSI colours and works over plain SSH.
//! `catppuccin-mocha` needs a truecolor terminal.

use ratatui::style::Color;

/// Every colour the renderer uses, named by what it paints.
#[derive(Debug, Clone)]
pub struct Theme {
    pub focus_border: Color,
    pub idle_border: Color,

    /// Token only in the compared text set.
    pub insert: Color,
    /// Token only in the base.
    pub delete: Color,
    /// Token in both.
    pub equal: Color,
    /// "Base: …" and "vs: …" lines, help section titles.
    pub heading: Color,

    /// Active group arrow and base star.
    pub marker: Color,
    pub checked: Color,
    pub manual: Color,
    pub transcribed: Color,
    /// Counts, placeholders, source brackets.
    pub muted: Color,

    pub bar_bg: Color,
    pub bar_fg: Color,
    pub mode_normal: Color,
    pub mode_insert: Color,
    pub message: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            focus_border: Color::Cyan,
            idle_border: Color::DarkGray,
            insert: Color::Green,
            delete: Color::Red,
            equal: Color::Reset,
            heading: Color::Cyan,
            marker: Color::Yellow,
            checked: Color::Green,
            manual: Color::Blue,
            transcribed: Color::Magenta,
            muted: Color::DarkGray,
            bar_bg: Color::DarkGray,
            bar_fg: Color::White,
            mode_normal: Color::Cyan,
            mode_insert: Color::Green,
            message: Color::Yellow,
        }
    }

    /// Catppuccin Mocha.
    pub fn catppuccin_mocha() -> Self {
        let rgb = |hex: u32| Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
        let text = rgb(0xcdd6f4);
        let overlay = rgb(0x7f849c);
        let green = rgb(0xa6e3a1);
        let lavender = rgb(0xb4befe);

        Self {
            focus_border: lavender,
            idle_border: overlay,
            insert: green,
            delete: rgb(0xf38ba8),
            equal: text,
            heading: rgb(0x94e2d5),
            marker: rgb(0xf9e2af),
            checked: green,
            manual: rgb(0x89b4fa),
            transcribed: rgb(0xcba6f7),
            muted: overlay,
            bar_bg: rgb(0x45475a),
            bar_fg: text,
            mode_normal: lavender,
            mode_insert: green,
            message: rgb(0xfab387),
        }
    }

    /// Unknown names log a warning and use `dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocha_hex_is_decoded() {
        assert_eq!(Theme::catppuccin_mocha().delete, Color::Rgb(243, 139, 168));
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").focus_border, Theme::dark().focus_border);
    }
}
