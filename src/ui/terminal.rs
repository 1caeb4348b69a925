use {
    super::{action_for_key, layout::render_layout, Action, App},
    crate::{config::Config, poller::Controller},
    chrono::Utc,
    crossterm::event::{Event, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{io::Stdout, time::Duration},
};

/// Redraw cadence while idle between key events
const REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Run the TUI event loop
///
/// Handles keyboard input and periodic redraws. The controller is stopped and
/// the terminal restored on exit, whether the loop ended cleanly or not.
pub async fn run_ui(controller: Controller, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    // Stderr logging is not isolated by the alternate screen; lines written
    // while the dashboard is up will overdraw it until the next redraw.

    let mut app = App::new(config.theme);
    let result = event_loop(&mut terminal, &mut app, &controller, config).await;

    controller.stop().await;

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    controller: &Controller,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = controller.session();

    loop {
        {
            let session = session.read().await;
            terminal.draw(|f| {
                let area = f.area();
                if let Err(e) = render_layout(f, area, &session, app) {
                    log::error!("Layout render error: {}", e);
                }
            })?;
        }

        // Blocking poll is short enough not to starve the runtime worker
        if !crossterm::event::poll(REFRESH_INTERVAL)? {
            continue;
        }

        let Event::Key(key) = crossterm::event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for_key(key.code) {
            Some(Action::Quit) => break,
            Some(Action::ToggleRun) => {
                app.notice = None;
                controller.toggle().await;
            }
            Some(Action::ToggleTheme) => app.toggle_theme(),
            Some(Action::SwitchView) => app.switch_view(),
            Some(Action::Export) => {
                let session = session.read().await;
                match session.export().write_csv(&config.export_dir, Utc::now().date_naive()) {
                    Ok(Some(path)) => {
                        app.notice = Some(format!(
                            "Exported {} samples to {}",
                            session.export().len(),
                            path.display()
                        ));
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("Export failed: {}", e);
                        app.notice = Some(format!("Export failed: {}", e));
                    }
                }
            }
            None => {}
        }
    }

    Ok(())
}
