use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Margin, Rect},
};

use arbor_api::{ApiCommand, ApiEvent, ApiExecutor, Node};
use arbor_core::{
    dialog::{ConfirmDialog, InputDialog},
    help_popup::{HelpEntry, HelpPopup},
    keybinds::{Action, InputMode, KeyState, process_normal_key},
    tree_view::{TreeView, render_tree},
    ui,
};

/// What the edit dialog is editing. `Create` targets a parent for a
/// brand-new node; `Rename` targets an existing node id. The node name
/// itself lives in the dialog's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Create { parent_id: i64 },
    Rename { node_id: i64 },
}

/// A staged action awaiting confirmation, dispatched explicitly when
/// the user confirms. Cleared whenever the confirm dialog closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingConfirm {
    /// The fetched tree was empty; offer to create the first node
    /// under the fetched root id.
    CreateFirstNode { parent_id: i64 },
    /// Delete a node (the server deletes its subtree with it).
    DeleteNode { node_id: i64 },
}

/// The main application state: the tree view, the dialogs, and the
/// channel to the API executor. The rendered tree is always a pure
/// projection of the last successful fetch; every mutation goes
/// through the server and triggers a re-fetch.
pub struct App {
    tree_name: String,
    api: ApiExecutor,
    view: TreeView<Node>,
    /// Root id from the last successful fetch; parent for first-level
    /// creates.
    root_id: Option<i64>,
    editing: Option<EditTarget>,
    pending: Option<PendingConfirm>,
    edit_dialog: InputDialog,
    confirm_dialog: ConfirmDialog,
    help: HelpPopup,
    key_state: KeyState,
    /// Whether a request is outstanding. Purely an indicator: nothing
    /// is cancelled or deduplicated, the last response wins.
    loading: bool,
    error: Option<String>,
    spinner_tick: usize,
    /// Inner tree area from the last render, for mouse hit testing.
    content_inner: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: ApiExecutor, tree_name: impl Into<String>) -> Self {
        Self {
            tree_name: tree_name.into(),
            api,
            view: TreeView::new(),
            root_id: None,
            editing: None,
            pending: None,
            edit_dialog: InputDialog::new(),
            confirm_dialog: ConfirmDialog::new(),
            help: HelpPopup::new(),
            key_state: KeyState::default(),
            loading: false,
            error: None,
            spinner_tick: 0,
            content_inner: Rect::default(),
            should_quit: false,
        }
    }

    /// The current input mode, derived from which dialog is open.
    fn mode(&self) -> InputMode {
        if self.confirm_dialog.visible {
            InputMode::Confirm
        } else if self.edit_dialog.visible {
            InputMode::Edit
        } else {
            InputMode::Normal
        }
    }

    // ── API round-trips ──────────────────────────────────────────────

    /// Request the whole tree from the server. Never retried
    /// automatically; `r` re-triggers it manually.
    pub fn fetch_tree(&mut self) {
        self.error = None;
        self.loading = true;
        let cmd = ApiCommand::FetchTree {
            tree_name: self.tree_name.clone(),
        };
        if self.api.send(cmd).is_err() {
            self.loading = false;
            self.error = Some("Failed to load tree".to_string());
        }
    }

    /// Drain pending API events. Called every tick; draining in a loop
    /// means the last response wins when several are queued.
    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
        while let Some(event) = self.api.try_recv() {
            self.handle_api_event(event);
        }
    }

    fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::TreeFetched(root) => {
                self.loading = false;
                self.error = None;
                self.root_id = Some(root.id);
                let empty = root.children.is_empty();
                self.view.set_roots(root.children);
                if empty {
                    self.pending = Some(PendingConfirm::CreateFirstNode { parent_id: root.id });
                    self.confirm_dialog.open("Create the first node?");
                }
            }
            ApiEvent::FetchFailed(_) => {
                self.loading = false;
                self.error = Some("Failed to load tree".to_string());
            }
            ApiEvent::NodeSaved => {
                self.loading = false;
                self.edit_dialog.close();
                self.editing = None;
                self.fetch_tree();
            }
            ApiEvent::SaveFailed(detail) => {
                // The dialog stays open with the entered name intact.
                self.loading = false;
                self.error = Some(format!("Failed to save node: {detail}"));
            }
            ApiEvent::NodeDeleted => {
                self.loading = false;
                self.fetch_tree();
            }
            ApiEvent::DeleteFailed(_) => {
                self.loading = false;
                self.error = Some("Failed to delete node".to_string());
            }
        }
    }

    // ── User intents ─────────────────────────────────────────────────

    fn request_create(&mut self, parent_id: i64) {
        self.error = None;
        self.editing = Some(EditTarget::Create { parent_id });
        self.edit_dialog.open("New node", "");
    }

    fn request_rename(&mut self, node_id: i64, name: &str) {
        self.error = None;
        self.editing = Some(EditTarget::Rename { node_id });
        self.edit_dialog.open("Rename node", name);
    }

    fn request_delete(&mut self, node_id: i64, name: &str) {
        self.error = None;
        self.pending = Some(PendingConfirm::DeleteNode { node_id });
        self.confirm_dialog.open(format!("Delete '{name}'?"));
    }

    /// Send create or rename depending on the edit target — never
    /// both. The dialog only closes once the server confirms.
    fn save(&mut self) {
        let Some(target) = self.editing else {
            return;
        };
        let name = self.edit_dialog.buffer.clone();
        let cmd = match target {
            EditTarget::Create { parent_id } => ApiCommand::CreateNode {
                tree_name: self.tree_name.clone(),
                parent_id,
                name,
            },
            EditTarget::Rename { node_id } => ApiCommand::RenameNode {
                tree_name: self.tree_name.clone(),
                node_id,
                new_name: name,
            },
        };
        self.error = None;
        self.loading = true;
        if self.api.send(cmd).is_err() {
            self.loading = false;
            self.error = Some("Failed to save node: executor stopped".to_string());
        }
    }

    fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_dialog.close();
    }

    /// Dispatch the staged action, if any, and close the confirm
    /// dialog. With nothing staged this is a no-op.
    fn confirm_pending(&mut self) {
        self.confirm_dialog.close();
        match self.pending.take() {
            Some(PendingConfirm::CreateFirstNode { parent_id }) => {
                self.request_create(parent_id);
            }
            Some(PendingConfirm::DeleteNode { node_id }) => {
                self.error = None;
                self.loading = true;
                let cmd = ApiCommand::DeleteNode {
                    tree_name: self.tree_name.clone(),
                    node_id,
                };
                if self.api.send(cmd).is_err() {
                    self.loading = false;
                    self.error = Some("Failed to delete node".to_string());
                }
            }
            None => {}
        }
    }

    fn cancel_confirm(&mut self) {
        self.pending = None;
        self.confirm_dialog.close();
    }

    // ── Input handling ───────────────────────────────────────────────

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    self.handle_click(mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-c always quits
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.help.visible {
            self.handle_help_key(key);
            return;
        }

        if self.confirm_dialog.visible {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_pending(),
                KeyCode::Char('n') | KeyCode::Esc => self.cancel_confirm(),
                _ => {}
            }
            return;
        }

        if self.edit_dialog.visible {
            match key.code {
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Enter => self.save(),
                KeyCode::Char(c) => self.edit_dialog.insert_char(c),
                KeyCode::Backspace => self.edit_dialog.backspace(),
                KeyCode::Left => self.edit_dialog.cursor_left(),
                KeyCode::Right => self.edit_dialog.cursor_right(),
                _ => {}
            }
            return;
        }

        let action = process_normal_key(key, &mut self.key_state);
        self.apply_action(action);
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::MoveDown(n) => {
                for _ in 0..n {
                    self.view.move_down();
                }
            }
            Action::MoveUp(n) => {
                for _ in 0..n {
                    self.view.move_up();
                }
            }
            Action::GotoTop => self.view.goto_top(),
            Action::GotoBottom => self.view.goto_bottom(),
            Action::HalfPageDown => self.view.half_page_down(self.visible_lines()),
            Action::HalfPageUp => self.view.half_page_up(self.visible_lines()),
            Action::Toggle => {
                self.view.toggle_selected();
            }
            Action::Create => {
                // Child of the selection, or of the root when the tree
                // is empty.
                if let Some(parent_id) = self.view.selected_id().or(self.root_id) {
                    self.request_create(parent_id);
                }
            }
            Action::Rename => {
                if let Some(row) = self.view.selected_row() {
                    let (id, name) = (row.id, row.name.clone());
                    self.request_rename(id, &name);
                }
            }
            Action::Delete => {
                if let Some(row) = self.view.selected_row() {
                    let (id, name) = (row.id, row.name.clone());
                    self.request_delete(id, &name);
                }
            }
            Action::Refresh => self.fetch_tree(),
            Action::Help => self.show_help(),
        }
    }

    /// A click on a row selects it; when the row has children it also
    /// toggles expansion, same as Enter. Action keys never toggle.
    fn handle_click(&mut self, column: u16, row: u16) {
        if self.confirm_dialog.visible || self.edit_dialog.visible || self.help.visible {
            return;
        }
        let inner = self.content_inner;
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return;
        }
        let line = (row - inner.y) as usize;
        if let Some(idx) = self.view.row_at(line, inner.height as usize) {
            self.view.selected = idx;
            self.view.toggle_selected();
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.help.hide();
                self.key_state.reset();
            }
            KeyCode::Char('j') | KeyCode::Down => self.help.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.help.scroll_up(),
            _ => {}
        }
    }

    fn show_help(&mut self) {
        self.key_state.reset();
        self.help.show(
            "arbor Help",
            vec![
                HelpEntry::new("j / k", "Move down / up"),
                HelpEntry::new("gg / G", "Go to top / bottom"),
                HelpEntry::new("Ctrl-d/u", "Half-page down / up"),
                HelpEntry::new("Enter", "Expand / collapse branch"),
                HelpEntry::new("click", "Select row, expand / collapse"),
                HelpEntry::new("a", "New node under selection"),
                HelpEntry::new("e", "Rename node"),
                HelpEntry::new("dd", "Delete node (confirms)"),
                HelpEntry::new("r", "Reload tree"),
                HelpEntry::new("q", "Quit"),
            ],
        );
    }

    fn visible_lines(&self) -> usize {
        self.content_inner.height as usize
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let (title_area, banner_area, content_area, status_area) = ui::standard_layout(area);

        ui::render_title_bar(frame, title_area, "arbor", &self.tree_name);
        ui::render_error_banner(frame, banner_area, self.error.as_deref());

        self.content_inner = content_area.inner(Margin::new(1, 1));
        render_tree(frame, content_area, &self.view, "Nodes");

        let spinner = self
            .loading
            .then(|| ui::SPINNER_FRAMES[(self.spinner_tick / 2) % ui::SPINNER_FRAMES.len()]);
        let info = match self.mode() {
            InputMode::Normal => "Enter:toggle  a:add  e:rename  dd:delete  r:reload  ?:help  q:quit",
            InputMode::Edit => "Enter: save   Esc: cancel",
            InputMode::Confirm => "y: confirm   n: cancel",
        };
        ui::render_status_bar(frame, status_area, self.mode(), spinner, info);

        // Overlays (rendered last, on top)
        self.edit_dialog.render(frame, area);
        self.confirm_dialog.render(frame, area);
        self.help.render(frame, area);
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_api::TreeRoot;
    use std::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<ApiCommand>, mpsc::Sender<ApiEvent>) {
        let (api, cmd_rx, event_tx) = ApiExecutor::detached();
        (App::new(api, "myTree"), cmd_rx, event_tx)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn node(id: i64, name: &str, children: Vec<Node>) -> Node {
        Node {
            id,
            name: name.to_string(),
            children,
        }
    }

    fn sample_root() -> TreeRoot {
        TreeRoot {
            id: 100,
            children: vec![
                node(1, "docs", vec![node(2, "intro", vec![])]),
                node(3, "assets", vec![]),
            ],
        }
    }

    fn deliver(app: &mut App, event_tx: &mpsc::Sender<ApiEvent>, event: ApiEvent) {
        event_tx.send(event).unwrap();
        app.tick();
    }

    #[test]
    fn fetch_sends_command_and_populates_view() {
        let (mut app, cmd_rx, event_tx) = test_app();

        app.fetch_tree();
        assert!(app.loading);
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::FetchTree {
                tree_name: "myTree".to_string()
            }
        );

        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));
        assert!(!app.loading);
        assert_eq!(app.root_id, Some(100));
        assert_eq!(app.view.rows.len(), 2);
        assert_eq!(app.view.rows[0].name, "docs");
        assert!(!app.confirm_dialog.visible);
    }

    #[test]
    fn fetch_failure_sets_banner_and_stays_interactive() {
        let (mut app, _cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        deliver(
            &mut app,
            &event_tx,
            ApiEvent::FetchFailed("timeout".to_string()),
        );

        assert!(!app.loading);
        assert_eq!(app.error.as_deref(), Some("Failed to load tree"));
        assert_eq!(app.mode(), InputMode::Normal);
    }

    #[test]
    fn empty_tree_stages_create_first_node() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();

        deliver(
            &mut app,
            &event_tx,
            ApiEvent::TreeFetched(TreeRoot {
                id: 42,
                children: vec![],
            }),
        );
        assert_eq!(
            app.pending,
            Some(PendingConfirm::CreateFirstNode { parent_id: 42 })
        );
        assert!(app.confirm_dialog.visible);

        // Confirming opens the create dialog targeting the root id.
        app.handle_event(key(KeyCode::Char('y')));
        assert!(app.pending.is_none());
        assert!(!app.confirm_dialog.visible);
        assert!(app.edit_dialog.visible);
        assert_eq!(app.editing, Some(EditTarget::Create { parent_id: 42 }));

        for c in "first".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::CreateNode {
                tree_name: "myTree".to_string(),
                parent_id: 42,
                name: "first".to_string(),
            }
        );
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn save_dispatches_rename_for_existing_node() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('e')));
        assert!(app.edit_dialog.visible);
        assert_eq!(app.edit_dialog.buffer, "docs");
        assert_eq!(app.editing, Some(EditTarget::Rename { node_id: 1 }));

        app.handle_event(key(KeyCode::Char('!')));
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::RenameNode {
                tree_name: "myTree".to_string(),
                node_id: 1,
                new_name: "docs!".to_string(),
            }
        );
        // A rename never also sends a create.
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn create_targets_selected_node_as_parent() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('j'))); // select "assets" (id 3)
        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.editing, Some(EditTarget::Create { parent_id: 3 }));

        for c in "logo".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::CreateNode {
                tree_name: "myTree".to_string(),
                parent_id: 3,
                name: "logo".to_string(),
            }
        );
    }

    #[test]
    fn failed_save_keeps_dialog_and_buffer() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('a')));
        for c in "draft".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
        let _ = cmd_rx.try_recv();

        deliver(
            &mut app,
            &event_tx,
            ApiEvent::SaveFailed("name already exists".to_string()),
        );
        assert!(app.edit_dialog.visible);
        assert_eq!(app.edit_dialog.buffer, "draft");
        assert_eq!(
            app.error.as_deref(),
            Some("Failed to save node: name already exists")
        );
        // Resubmitting is a fresh save with the same buffer.
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::CreateNode { name, .. } if name == "draft"
        ));
    }

    #[test]
    fn successful_save_closes_dialog_and_refetches() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('a')));
        app.handle_event(key(KeyCode::Char('x')));
        app.handle_event(key(KeyCode::Enter));
        let _ = cmd_rx.try_recv();

        deliver(&mut app, &event_tx, ApiEvent::NodeSaved);
        assert!(!app.edit_dialog.visible);
        assert!(app.editing.is_none());
        assert!(matches!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::FetchTree { .. }
        ));
    }

    #[test]
    fn delete_flow_confirms_then_sends() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('d')));
        app.handle_event(key(KeyCode::Char('d')));
        assert_eq!(app.pending, Some(PendingConfirm::DeleteNode { node_id: 1 }));
        assert!(app.confirm_dialog.visible);

        app.handle_event(key(KeyCode::Char('y')));
        assert!(app.pending.is_none());
        assert!(!app.confirm_dialog.visible);
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::DeleteNode {
                tree_name: "myTree".to_string(),
                node_id: 1,
            }
        );

        // Success triggers a re-fetch.
        deliver(&mut app, &event_tx, ApiEvent::NodeDeleted);
        assert!(matches!(
            cmd_rx.try_recv().unwrap(),
            ApiCommand::FetchTree { .. }
        ));
    }

    #[test]
    fn cancelled_delete_clears_pending_and_sends_nothing() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('d')));
        app.handle_event(key(KeyCode::Char('d')));
        app.handle_event(key(KeyCode::Esc));
        assert!(app.pending.is_none());
        assert!(!app.confirm_dialog.visible);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn failed_delete_only_sets_banner() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Char('d')));
        app.handle_event(key(KeyCode::Char('d')));
        app.handle_event(key(KeyCode::Char('y')));
        let _ = cmd_rx.try_recv();

        deliver(
            &mut app,
            &event_tx,
            ApiEvent::DeleteFailed("not found".to_string()),
        );
        assert_eq!(app.error.as_deref(), Some("Failed to delete node"));
        assert!(app.pending.is_none());
        assert_eq!(app.mode(), InputMode::Normal);
    }

    #[test]
    fn enter_toggles_expansion_idempotently() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        assert_eq!(app.view.rows.len(), 2);
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.view.rows.len(), 3); // "intro" now visible
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.view.rows.len(), 2);
        // Pure local transition: no network traffic.
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn expansion_survives_refetch() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        app.handle_event(key(KeyCode::Enter)); // expand "docs"
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));
        assert_eq!(app.view.rows.len(), 3);
        assert!(app.view.rows[0].is_open);
    }

    #[test]
    fn last_queued_response_wins() {
        let (mut app, _cmd_rx, event_tx) = test_app();
        app.fetch_tree();

        event_tx
            .send(ApiEvent::TreeFetched(sample_root()))
            .unwrap();
        event_tx
            .send(ApiEvent::TreeFetched(TreeRoot {
                id: 200,
                children: vec![node(9, "only", vec![])],
            }))
            .unwrap();
        app.tick();

        assert_eq!(app.root_id, Some(200));
        assert_eq!(app.view.rows.len(), 1);
        assert_eq!(app.view.rows[0].name, "only");
    }

    #[test]
    fn confirm_with_nothing_staged_is_noop() {
        let (mut app, cmd_rx, _event_tx) = test_app();
        app.confirm_pending();
        assert!(cmd_rx.try_recv().is_err());
        assert!(!app.edit_dialog.visible);
    }

    #[test]
    fn action_keys_do_not_toggle_expansion() {
        let (mut app, cmd_rx, event_tx) = test_app();
        app.fetch_tree();
        let _ = cmd_rx.try_recv();
        deliver(&mut app, &event_tx, ApiEvent::TreeFetched(sample_root()));

        // Rename on a branch row opens the dialog without expanding it.
        app.handle_event(key(KeyCode::Char('e')));
        assert!(app.edit_dialog.visible);
        assert_eq!(app.view.rows.len(), 2);
        assert!(app.view.open.is_empty());
    }
}
