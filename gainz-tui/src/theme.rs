//! Parrot/neon palette and the styles the panels draw with.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headings)
//! - **Positive**: Neon green (gains, BUY)
//! - **Negative**: Hot pink (losses, SELL, errors)
//! - **Hold**: Neon yellow (HOLD)
//! - **Warning**: Neon orange (alerts)
//! - **Neutral**: Cool purple (secondary series)
//! - **Muted**: Steel blue (hints, labels)

use ratatui::style::{Color, Modifier, Style};

use gainz_core::Signal;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const HOLD: Color = Color::Rgb(255, 230, 0);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold().bg(BACKGROUND)
    } else {
        muted()
    }
}

/// Color for a signal cell: BUY green, SELL pink, HOLD yellow.
pub fn signal_color(signal: Signal) -> Color {
    match signal {
        Signal::Buy => POSITIVE,
        Signal::Sell => NEGATIVE,
        Signal::Hold => HOLD,
    }
}

pub fn signal_style(signal: Signal) -> Style {
    Style::default()
        .fg(signal_color(signal))
        .add_modifier(Modifier::BOLD)
}

/// Green for a gain (or flat), pink for a loss.
pub fn change_style(change_percent: f64) -> Style {
    if change_percent >= 0.0 {
        positive()
    } else {
        negative()
    }
}

/// RSI shading: overbought pink, oversold green, otherwise plain text.
pub fn rsi_style(rsi: f64) -> Style {
    match rsi {
        r if r >= 70.0 => negative(),
        r if r <= 30.0 => positive(),
        _ => text(),
    }
}
