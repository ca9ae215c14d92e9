//! Theme for Jellyfindarr
//!
//! Deep navy background with the Jellyfin purple/blue accents.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and style helpers
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101322
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x13, 0x22);

    /// Primary: #aa5cc3 (Jellyfin purple)
    pub const PRIMARY: Color = Color::Rgb(0xaa, 0x5c, 0xc3);

    /// Secondary: #00a4dc (Jellyfin blue)
    pub const SECONDARY: Color = Color::Rgb(0x00, 0xa4, 0xdc);

    /// Accent: #f2c14e (amber)
    pub const ACCENT: Color = Color::Rgb(0xf2, 0xc1, 0x4e);

    /// Text: #e6e6f0
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe6, 0xf0);

    /// Dim: #6b7089
    pub const DIM: Color = Color::Rgb(0x6b, 0x70, 0x89);

    /// Error: #ff5c6c
    pub const ERROR: Color = Color::Rgb(0xff, 0x5c, 0x6c);

    /// Panel background
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1a, 0x1e, 0x33);

    /// Border (muted purple)
    pub const BORDER: Color = Color::Rgb(0x4a, 0x3a, 0x66);

    /// Border when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted list row
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Enabled button
    pub fn button() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled button
    pub fn button_disabled() -> Style {
        Style::default()
            .fg(Self::DIM)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Button showing "Loading..."
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND_LIGHT)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance, https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors, 1 (same) to 21 (black on white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Extract RGB from a ratatui color (Rgb variant only)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
