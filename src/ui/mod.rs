pub mod layout;
pub mod renderer;
pub mod terminal;

pub use terminal::run_ui;

use {
    crate::config::Theme,
    crossterm::event::KeyCode,
    renderer::{AmplitudeChart, ChartSlot, Palette, StateDistributionChart},
};

/// Side-panel view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    RecentResults,
    History,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::RecentResults => "Recent Results",
            View::History => "History",
        }
    }

    fn next(self) -> Self {
        match self {
            View::RecentResults => View::History,
            View::History => View::RecentResults,
        }
    }
}

/// Operator actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleRun,
    ToggleTheme,
    Export,
    SwitchView,
    Quit,
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('s') | KeyCode::Char(' ') => Some(Action::ToggleRun),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Tab => Some(Action::SwitchView),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// UI-local state: everything that is not session data
pub struct App {
    pub theme: Theme,
    pub view: View,
    /// Last operator notice (export result, etc.); fetch errors come from the session
    pub notice: Option<String>,
    pub amplitude_chart: ChartSlot<AmplitudeChart>,
    pub state_chart: ChartSlot<StateDistributionChart>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            view: View::RecentResults,
            notice: None,
            amplitude_chart: ChartSlot::default(),
            state_chart: ChartSlot::default(),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn switch_view(&mut self) {
        self.view = self.view.next();
    }
}
