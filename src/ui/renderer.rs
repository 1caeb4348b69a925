//! Chart renderers
//!
//! A renderer instance owns a snapshot of its data and palette. Instances are
//! never patched: a [`ChartSlot`] disposes its current instance and builds a
//! new one whenever the data, labels or palette change, so no scale or legend
//! state survives from a previous draw.

use {
    crate::{
        classifier::DerivedState,
        config::Theme,
        session::stats::StateCounts,
    },
    ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
        Frame,
    },
};

const LINE_COLOR: Color = Color::Rgb(16, 185, 129);

/// Cosmetic colours that differ between the light and dark variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub grid: Color,
    pub text: Color,
    pub title: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                grid: Color::Gray,
                text: Color::Black,
                title: Color::Black,
            },
            Theme::Dark => Self {
                grid: Color::DarkGray,
                text: Color::White,
                title: Color::White,
            },
        }
    }
}

/// Colour for a derived state (relaxed green, engaged blue, seizure red)
pub fn state_color(state: DerivedState) -> Color {
    match state {
        DerivedState::Relaxed => Color::Rgb(16, 185, 129),
        DerivedState::Engaged => Color::Rgb(59, 130, 246),
        DerivedState::Seizure => Color::Rgb(239, 68, 68),
    }
}

pub trait Renderer: Sized {
    type Data: Clone + PartialEq;

    /// Construct a fresh instance that owns `data`
    fn build(data: &Self::Data, palette: Palette) -> Self;

    fn data(&self) -> &Self::Data;

    fn palette(&self) -> Palette;

    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// Exclusive owner of one renderer instance
pub struct ChartSlot<R: Renderer> {
    instance: Option<R>,
    rebuilds: u64,
}

impl<R: Renderer> Default for ChartSlot<R> {
    fn default() -> Self {
        Self {
            instance: None,
            rebuilds: 0,
        }
    }
}

impl<R: Renderer> ChartSlot<R> {
    /// Return an instance for `data`, rebuilding it if anything changed
    pub fn render(&mut self, data: &R::Data, palette: Palette) -> &R {
        let stale = match &self.instance {
            Some(current) => current.data() != data || current.palette() != palette,
            None => true,
        };

        if stale {
            if let Some(old) = self.instance.take() {
                drop(old);
            }
            self.rebuilds += 1;
        }

        self.instance.get_or_insert_with(|| R::build(data, palette))
    }

    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

// ── Live window line chart ───────────────────────────────────────────────────

/// Line chart over `(label, amplitude)` pairs
pub struct AmplitudeChart {
    window: Vec<(u64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    palette: Palette,
}

impl AmplitudeChart {
    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }
}

impl Renderer for AmplitudeChart {
    type Data = Vec<(u64, f64)>;

    fn build(data: &Self::Data, palette: Palette) -> Self {
        let points: Vec<(f64, f64)> = data.iter().map(|&(x, y)| (x as f64, y)).collect();

        let x_min = points.first().map(|p| p.0).unwrap_or(0.0);
        let x_max = points.last().map(|p| p.0).unwrap_or(0.0).max(x_min + 1.0);

        let peak = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
        let floor = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
        let y_max = ((peak * 1.1) / 10.0).ceil().max(10.0) * 10.0;
        let y_min = (floor / 10.0).floor() * 10.0;

        Self {
            window: data.clone(),
            points,
            x_bounds: [x_min, x_max],
            y_bounds: [y_min, y_max],
            palette,
        }
    }

    fn data(&self) -> &Self::Data {
        &self.window
    }

    fn palette(&self) -> Palette {
        self.palette
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let text = Style::default().fg(self.palette.text);
        let [x_min, x_max] = self.x_bounds;
        let [y_min, y_max] = self.y_bounds;

        let x_labels = vec![
            Span::styled(format!("{:.0}", x_min), text),
            Span::styled(format!("{:.0}", x_max), text),
        ];
        let y_labels = vec![
            Span::styled(format!("{:.0}", y_min), text),
            Span::styled(format!("{:.0}", (y_min + y_max) / 2.0), text),
            Span::styled(format!("{:.0}", y_max), text),
        ];

        let dataset = Dataset::default()
            .name(Line::styled("EEG Amplitude", text))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(LINE_COLOR))
            .data(&self.points);

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.grid))
                    .title(Span::styled(
                        "Real-time EEG Signal",
                        Style::default()
                            .fg(self.palette.title)
                            .add_modifier(Modifier::BOLD),
                    )),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled("Time (seconds)", text))
                    .style(Style::default().fg(self.palette.grid))
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Amplitude", text))
                    .style(Style::default().fg(self.palette.grid))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}

// ── State distribution bar chart ─────────────────────────────────────────────

pub struct StateDistributionChart {
    counts: StateCounts,
    palette: Palette,
}

impl Renderer for StateDistributionChart {
    type Data = StateCounts;

    fn build(data: &Self::Data, palette: Palette) -> Self {
        Self {
            counts: *data,
            palette,
        }
    }

    fn data(&self) -> &Self::Data {
        &self.counts
    }

    fn palette(&self) -> Palette {
        self.palette
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let text = Style::default().fg(self.palette.text);

        let bars: Vec<Bar> = DerivedState::all()
            .into_iter()
            .map(|state| {
                Bar::default()
                    .value(self.counts.get(state))
                    .label(Line::styled(state.range_caption(), text))
                    .style(Style::default().fg(state_color(state)))
                    .value_style(Style::default().fg(Color::Black).bg(state_color(state)))
            })
            .collect();

        // Three bars share the inner width, one column of gap between them
        let bar_width = (area.width.saturating_sub(4) / 3).max(1);

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.grid))
                    .title(Span::styled(
                        "State Distribution",
                        Style::default()
                            .fg(self.palette.title)
                            .add_modifier(Modifier::BOLD),
                    )),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .label_style(text);

        frame.render_widget(chart, area);
    }
}

/// Amplitude with two decimals
pub fn format_amplitude(amplitude: f64) -> String {
    format!("{:.2}", amplitude)
}
