use {
    super::{
        renderer::{format_amplitude, state_color, Renderer},
        App, View,
    },
    crate::session::{Phase, Session},
    chrono::{DateTime, Local, Utc},
    ratatui::{
        layout::{Alignment, Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph, Row, Table, Tabs, Wrap},
        Frame,
    },
};

/// Render the main UI layout
pub fn render_layout(
    f: &mut Frame,
    area: Rect,
    session: &Session,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(4), // Footer/Status
        ])
        .split(area);

    render_header(f, chunks[0], session);

    let body = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_signal_panel(f, body[0], session, app);
    render_side_panel(f, body[1], session, app);

    render_footer(f, chunks[2], session, app);

    Ok(())
}

fn render_header(f: &mut Frame, area: Rect, session: &Session) {
    let phase_span = match session.phase() {
        Phase::Running => Span::styled(
            "● RUNNING",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Phase::Idle => Span::styled("○ IDLE", Style::default().fg(Color::Gray)),
    };

    let mut spans = vec![
        Span::styled(
            "EEG Simulation Dashboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        phase_span,
    ];

    if session.in_flight() > 0 {
        spans.push(Span::styled(
            format!("  ⟳ fetching ({})", session.in_flight()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(Line::from(spans)).block(header), area);
}

fn render_signal_panel(f: &mut Frame, area: Rect, session: &Session, app: &mut App) {
    let rows = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let palette = app.palette();
    let window = session.window().current_window();
    app.amplitude_chart.render(&window, palette).draw(f, rows[0]);

    let stopped = session.phase() == Phase::Idle && session.last_error().is_none();
    let feedback = match session.window().latest() {
        Some(_) if stopped => Line::from(Span::styled(
            "Simulation stopped",
            Style::default().fg(Color::Gray),
        )),
        Some(sample) => {
            let state = sample.state();
            let mut style = Style::default().fg(state_color(state));
            if state == crate::classifier::DerivedState::Seizure {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled("Feedback: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(sample.feedback_label.clone(), style),
            ])
        }
        None => Line::from(Span::styled(
            "Feedback: Waiting for data...",
            Style::default().fg(Color::Gray),
        )),
    };

    f.render_widget(
        Paragraph::new(feedback)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        rows[1],
    );
}

fn render_side_panel(f: &mut Frame, area: Rect, session: &Session, app: &mut App) {
    let rows = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = match app.view {
        View::RecentResults => 0,
        View::History => 1,
    };
    let tabs = Tabs::new(vec![View::RecentResults.title(), View::History.title()])
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, rows[0]);

    match app.view {
        View::RecentResults => render_results_table(f, rows[1], session),
        View::History => render_history(f, rows[1], session, app),
    }
}

fn render_results_table(f: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default().borders(Borders::ALL).title("Recent Results");

    if session.results().is_empty() {
        let empty = Paragraph::new("No results yet. Start the simulation to see data.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Time", "State", "Amplitude", "Feedback"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = session
        .results()
        .entries()
        .map(|sample| {
            let state = sample.state();
            Row::new(vec![
                format_clock(sample.captured_at),
                state.label().to_string(),
                format_amplitude(sample.amplitude),
                sample.feedback_label.clone(),
            ])
            .style(Style::default().fg(state_color(state)))
        })
        .collect();

    let widths = [
        Constraint::Length(11), // Time
        Constraint::Length(8),  // State
        Constraint::Length(10), // Amplitude
        Constraint::Min(10),    // Feedback
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn render_history(f: &mut Frame, area: Rect, session: &Session, app: &mut App) {
    let rows = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stats = session.stats();
    let label = Style::default().fg(Color::Gray);
    let text = vec![
        Line::from(vec![
            Span::styled("Average: ", label),
            Span::raw(format_amplitude(stats.mean)),
            Span::styled("   Max: ", label),
            Span::raw(format_amplitude(stats.max)),
        ]),
        Line::from(vec![
            Span::styled("Min: ", label),
            Span::raw(format_amplitude(stats.min)),
            Span::styled("       Samples: ", label),
            Span::raw(stats.count.to_string()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Statistics")),
        rows[0],
    );

    if stats.count == 0 {
        let empty = Paragraph::new("No data available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("State Distribution"));
        f.render_widget(empty, rows[1]);
        return;
    }

    let palette = app.palette();
    app.state_chart.render(&stats.states, palette).draw(f, rows[1]);
}

fn render_footer(f: &mut Frame, area: Rect, session: &Session, app: &App) {
    let export_count = session.export().len();
    let export_style = if export_count == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let run_label = if session.is_running() { "stop" } else { "start" };

    let keys = Line::from(vec![
        Span::styled("[s]", Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {}  ", run_label)),
        Span::styled("[e]", export_style),
        Span::raw(format!(" export ({})  ", export_count)),
        Span::styled("[t]", Style::default().fg(Color::Cyan)),
        Span::raw(" theme  "),
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" view  "),
        Span::styled("[q]", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]);

    let status = match (session.last_error(), &app.notice) {
        (Some(error), _) => Line::from(Span::styled(
            format!("⚠ {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        (None, Some(notice)) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        )),
        (None, None) => Line::from(Span::styled("Ready", Style::default().fg(Color::Gray))),
    };

    let footer = Block::default().borders(Borders::ALL).title("Status");
    f.render_widget(Paragraph::new(vec![keys, status]).block(footer), area);
}

fn format_clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M:%S %p").to_string()
}
