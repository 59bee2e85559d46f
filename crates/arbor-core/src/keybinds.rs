use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes, shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Navigation and actions via keybinds.
    #[default]
    Normal,
    /// The edit dialog is open and capturing text.
    Edit,
    /// The confirmation dialog is open.
    Confirm,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Edit => "EDIT",
            Self::Confirm => "CONFIRM",
        }
    }
}

/// Actions that can result from processing a key event in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No-op — the key was consumed but nothing happens.
    None,
    /// Quit the application.
    Quit,
    /// Move selection down by N rows.
    MoveDown(usize),
    /// Move selection up by N rows.
    MoveUp(usize),
    /// Jump to the first row.
    GotoTop,
    /// Jump to the last row.
    GotoBottom,
    /// Half-page down.
    HalfPageDown,
    /// Half-page up.
    HalfPageUp,
    /// Toggle expansion of the selected row.
    Toggle,
    /// Begin creating a child of the selected node.
    Create,
    /// Begin renaming the selected node.
    Rename,
    /// Request deletion of the selected node.
    Delete,
    /// Re-fetch the tree from the server.
    Refresh,
    /// Show the help popup.
    Help,
}

/// Pending key state for two-key sequences like `gg` and `dd`.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pub pending_key: Option<char>,
}

impl KeyState {
    pub fn reset(&mut self) {
        self.pending_key = None;
    }
}

/// Process a key event in Normal mode, accounting for multi-key sequences.
pub fn process_normal_key(key: KeyEvent, state: &mut KeyState) -> Action {
    if let Some(pending) = state.pending_key.take() {
        return match (pending, key.code) {
            ('g', KeyCode::Char('g')) => Action::GotoTop,
            ('d', KeyCode::Char('d')) => Action::Delete,
            _ => Action::None, // Invalid sequence, ignore
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp(1),
        KeyCode::Char('G') => Action::GotoBottom,
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
            Action::None
        }
        KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageDown,
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageUp,
        KeyCode::Char('d') => {
            state.pending_key = Some('d');
            Action::None
        }
        KeyCode::Enter => Action::Toggle,
        KeyCode::Char('a') => Action::Create,
        KeyCode::Char('e') => Action::Rename,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}
