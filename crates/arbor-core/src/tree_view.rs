use std::collections::HashSet;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

// ── TreeItem trait ───────────────────────────────────────────────────

/// Trait for node types renderable by the TreeView. Nodes arrive from
/// the server already nested, so children are part of the value.
pub trait TreeItem {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

// ── FlatRow ──────────────────────────────────────────────────────────

/// One visible line in the tree: a node projected for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub id: i64,
    pub depth: usize,
    pub name: String,
    pub has_children: bool,
    pub is_open: bool,
    /// For each depth level 0..depth, whether a vertical guide line (│)
    /// should be drawn at that level.
    pub guide_depths: Vec<bool>,
}

// ── TreeView ─────────────────────────────────────────────────────────

/// Tree view state: the last-fetched nodes, the set of open node ids,
/// and the flattened rows derived from both.
///
/// Open/closed state is deliberately kept outside the nodes themselves
/// so it survives wholesale replacement of the tree on re-fetch.
pub struct TreeView<T: TreeItem> {
    /// Top-level nodes from the last successful fetch.
    pub roots: Vec<T>,
    /// Ids of currently expanded nodes. Ids that no longer exist in the
    /// tree are harmless: they are simply never rendered.
    pub open: HashSet<i64>,
    /// Flattened visible rows for rendering and navigation.
    pub rows: Vec<FlatRow>,
    /// Currently selected index into `rows`.
    pub selected: usize,
}

impl<T: TreeItem> Default for TreeView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TreeItem> TreeView<T> {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            open: HashSet::new(),
            rows: Vec::new(),
            selected: 0,
        }
    }

    /// Replace the tree wholesale with freshly fetched nodes. The open
    /// set is kept so expand state survives a refresh.
    pub fn set_roots(&mut self, roots: Vec<T>) {
        self.roots = roots;
        self.rebuild_rows();
    }

    /// Rebuild the flattened rows, preserving selection by id if possible.
    pub fn rebuild_rows(&mut self) {
        let old_id = self.selected_id();
        self.rows.clear();
        flatten(&self.roots, &self.open, 0, &[], &mut self.rows);

        if let Some(id) = old_id {
            if let Some(pos) = self.rows.iter().position(|r| r.id == id) {
                self.selected = pos;
                return;
            }
        }

        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    /// Flip the open/closed state of a node id at any depth. This is a
    /// pure local transition; membership of other ids is untouched.
    pub fn toggle_open(&mut self, id: i64) {
        if !self.open.remove(&id) {
            self.open.insert(id);
        }
        self.rebuild_rows();
    }

    /// Toggle the selected row if it has children (the expand
    /// affordance). Returns the toggled id.
    pub fn toggle_selected(&mut self) -> Option<i64> {
        let row = self.selected_row()?;
        if !row.has_children {
            return None;
        }
        let id = row.id;
        self.toggle_open(id);
        Some(id)
    }

    pub fn selected_row(&self) -> Option<&FlatRow> {
        self.rows.get(self.selected)
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_row().map(|r| r.id)
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn goto_top(&mut self) {
        self.selected = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    pub fn half_page_down(&mut self, visible_lines: usize) {
        let half = visible_lines / 2;
        self.selected = (self.selected + half).min(self.rows.len().saturating_sub(1));
    }

    pub fn half_page_up(&mut self, visible_lines: usize) {
        let half = visible_lines / 2;
        self.selected = self.selected.saturating_sub(half);
    }

    /// Scroll offset so the selected row stays visible.
    pub fn scroll_offset(&self, visible_lines: usize) -> usize {
        if visible_lines == 0 {
            return 0;
        }
        if self.selected >= visible_lines {
            self.selected - visible_lines + 1
        } else {
            0
        }
    }

    /// Map a content-relative line (e.g. from a mouse click) to a row
    /// index, accounting for the current scroll offset.
    pub fn row_at(&self, line: usize, visible_lines: usize) -> Option<usize> {
        let idx = self.scroll_offset(visible_lines) + line;
        (idx < self.rows.len()).then_some(idx)
    }
}

/// Flatten the visible part of the tree: a node's children appear only
/// when its id is in the open set.
fn flatten<T: TreeItem>(
    nodes: &[T],
    open: &HashSet<i64>,
    depth: usize,
    parent_guides: &[bool],
    out: &mut Vec<FlatRow>,
) {
    for node in nodes {
        let has_children = !node.children().is_empty();
        let is_open = open.contains(&node.id());

        out.push(FlatRow {
            id: node.id(),
            depth,
            name: node.name().to_string(),
            has_children,
            is_open,
            guide_depths: parent_guides.to_vec(),
        });

        if is_open && has_children {
            let mut child_guides = parent_guides.to_vec();
            child_guides.push(true);
            flatten(node.children(), open, depth + 1, &child_guides, out);
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

const GUIDE_STYLE: Style = Style::new().fg(Color::DarkGray);
const SELECTED_BG: Color = Color::Gray;

/// Render the tree view inside a bordered block.
pub fn render_tree<T: TreeItem>(frame: &mut Frame, area: Rect, view: &TreeView<T>, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" {} ", title));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if view.rows.is_empty() {
        let empty = Paragraph::new("  No nodes yet. Press 'a' to create one.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_lines = inner.height as usize;
    let scroll_offset = view.scroll_offset(visible_lines);

    let lines: Vec<Line<'_>> = (scroll_offset..view.rows.len().min(scroll_offset + visible_lines))
        .map(|idx| render_row_line(&view.rows[idx], idx == view.selected, inner.width))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_row_line(row: &FlatRow, is_selected: bool, area_width: u16) -> Line<'static> {
    let base_style = if is_selected {
        Style::default()
            .bg(SELECTED_BG)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if row.has_children {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans: Vec<Span<'static>> = Vec::new();

    for d in 0..row.depth {
        let has_guide = row.guide_depths.get(d).copied().unwrap_or(false);
        if has_guide {
            let guide_style = if is_selected {
                GUIDE_STYLE.bg(SELECTED_BG)
            } else {
                GUIDE_STYLE
            };
            spans.push(Span::styled("\u{2502} ", guide_style));
        } else {
            spans.push(Span::styled("  ", base_style));
        }
    }

    let icon: &str = if row.has_children {
        if row.is_open {
            "\u{25BC} "
        } else {
            "\u{25B6} "
        }
    } else {
        "\u{25CF} "
    };
    spans.push(Span::styled(icon.to_string(), base_style));
    spans.push(Span::styled(row.name.clone(), base_style));

    if is_selected {
        let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
        let remaining = (area_width as usize).saturating_sub(content_width);
        if remaining > 0 {
            spans.push(Span::styled(
                " ".repeat(remaining),
                Style::default().bg(SELECTED_BG),
            ));
        }
    }

    Line::from(spans)
}

// ── Tests ────────────────────────────────────────────────────────────
