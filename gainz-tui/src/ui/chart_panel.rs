//! Price chart: close with EMA 9 and EMA 21 overlaid.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};

use gainz_core::indicators::AugmentedSeries;

use crate::theme;

/// Chart points for the close and both EMAs. EMA points start where the EMA
/// is first defined.
pub struct ChartSeries {
    pub close: Vec<(f64, f64)>,
    pub ema_fast: Vec<(f64, f64)>,
    pub ema_slow: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn from_augmented(augmented: &AugmentedSeries) -> Self {
        let mut series = ChartSeries {
            close: Vec::with_capacity(augmented.len()),
            ema_fast: Vec::new(),
            ema_slow: Vec::new(),
        };
        for (i, (bar, row)) in augmented.iter().enumerate() {
            let x = i as f64;
            series.close.push((x, bar.close));
            if let Some(v) = row.ema_fast {
                series.ema_fast.push((x, v));
            }
            if let Some(v) = row.ema_slow {
                series.ema_slow.push((x, v));
            }
        }
        series
    }

    /// (min, max) over every plotted value.
    pub fn y_range(&self) -> (f64, f64) {
        self.close
            .iter()
            .chain(&self.ema_fast)
            .chain(&self.ema_slow)
            .map(|&(_, y)| y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            })
    }
}

pub fn render(f: &mut Frame, area: Rect, augmented: &AugmentedSeries) {
    let points = ChartSeries::from_augmented(augmented);
    let (min_y, max_y) = points.y_range();

    let padding = ((max_y - min_y).abs() * 0.05).max(0.01);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = augmented.len().saturating_sub(1) as f64;

    let first_label = augmented
        .series()
        .first()
        .map(|b| b.timestamp.format("%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let last_label = augmented
        .series()
        .last()
        .map(|b| b.timestamp.format("%m-%d %H:%M").to_string())
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&points.close),
        Dataset::default()
            .name("EMA 9")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Line)
            .data(&points.ema_fast),
        Dataset::default()
            .name("EMA 21")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&points.ema_slow),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_label, theme::muted()),
                    Span::styled(last_label, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{:.2}", y_min), theme::muted()),
                    Span::styled(format!("{:.2}", y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
