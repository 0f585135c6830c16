//! Application state and TUI event loop
//!
//! Manages the sidebar state and handles user input: moving the selection,
//! expanding and collapsing nodes, navigating, and driving the action menu
//! and add-node dialog.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::config::SidebarConfig;
use crate::error::TreeError;
use crate::overlay::{FormField, MenuAction, MenuPosition, Overlay};
use crate::router::{self, HistoryRouter};
use crate::tree::{FlattenedNode, Forest, NodeDraft};

/// Virtual scroll state for efficient rendering of large trees
#[derive(Debug, Default, Clone)]
pub struct VirtualScrollState {
    /// First visible row index
    pub offset: usize,
    /// Number of visible rows in the viewport
    pub viewport_height: usize,
}

impl VirtualScrollState {
    /// Create a new virtual scroll state
    pub fn new() -> Self {
        Self {
            offset: 0,
            viewport_height: 0,
        }
    }

    /// Update the viewport height
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    /// Calculate the visible range for the given selection and total items
    pub fn visible_range(&self, selected: usize, total: usize) -> (usize, usize) {
        if total == 0 || self.viewport_height == 0 {
            return (0, 0);
        }

        let mut offset = self.offset;

        if selected < offset {
            offset = selected;
        } else if selected >= offset + self.viewport_height {
            offset = selected.saturating_sub(self.viewport_height - 1);
        }

        let start = offset;
        let end = (offset + self.viewport_height).min(total);

        (start, end)
    }

    /// Update offset to ensure selection is visible
    pub fn ensure_visible(&mut self, selected: usize, total: usize) {
        if total == 0 || self.viewport_height == 0 {
            return;
        }

        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + self.viewport_height {
            self.offset = selected.saturating_sub(self.viewport_height - 1);
        }
    }
}

/// Application state
pub struct App {
    /// The sidebar forest
    pub forest: Forest,
    /// Currently selected index in the visible rows
    pub selected_index: usize,
    /// Visible rows of the forest
    pub rows: Vec<FlattenedNode>,
    /// Filtered rows (when search is active)
    pub filtered: Vec<FlattenedNode>,
    /// Whether the application should quit
    pub should_quit: bool,
    /// List state for ratatui
    list_state: ListState,
    /// Whether search mode is active
    pub search_active: bool,
    /// Current search query
    pub search_query: String,
    /// Virtual scroll state for performance with large trees
    pub scroll_state: VirtualScrollState,
    /// Action menu / dialog state
    pub overlay: Overlay,
    /// Receives navigation targets
    pub router: HistoryRouter,
    pub config: SidebarConfig,
    /// One-line message shown in the footer
    pub status: Option<String>,
}

impl App {
    /// Create a new application over the given forest
    pub fn new(forest: Forest, config: SidebarConfig) -> Self {
        let mut app = Self {
            forest,
            selected_index: 0,
            rows: Vec::new(),
            filtered: Vec::new(),
            should_quit: false,
            list_state: ListState::default(),
            search_active: false,
            search_query: String::new(),
            scroll_state: VirtualScrollState::new(),
            overlay: Overlay::Idle,
            router: HistoryRouter::new(),
            config,
            status: None,
        };
        app.refresh_rows();
        app.list_state.select(Some(0));
        app
    }

    /// Re-flatten the forest after a change, keeping the filter applied
    pub fn refresh_rows(&mut self) {
        self.rows = self.forest.rows();
        if !self.search_query.is_empty() {
            self.filtered = self
                .rows
                .iter()
                .filter(|row| fuzzy_match(&row.name, &self.search_query))
                .cloned()
                .collect();
        }

        let total = self.current_list_len();
        if total > 0 && self.selected_index >= total {
            self.selected_index = total - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// The rows currently on screen (filtered or full)
    pub fn visible_rows(&self) -> &[FlattenedNode] {
        if !self.search_query.is_empty() {
            &self.filtered
        } else {
            &self.rows
        }
    }

    /// The row under the cursor
    pub fn selected_row(&self) -> Option<&FlattenedNode> {
        self.visible_rows().get(self.selected_index)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_row().map(|row| row.id.clone())
    }

    /// Move the cursor to the row with `id`, if it is visible
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.visible_rows().iter().position(|row| row.id == id) {
            Some(index) => {
                self.selected_index = index;
                self.list_state.select(Some(index));
                self.scroll_state
                    .ensure_visible(index, self.current_list_len());
                true
            }
            None => false,
        }
    }

    /// Move selection to the next item
    pub fn select_next(&mut self) {
        let total = self.current_list_len();
        if total > 0 {
            self.selected_index = (self.selected_index + 1).min(total - 1);
            self.list_state.select(Some(self.selected_index));
            self.scroll_state.ensure_visible(self.selected_index, total);
        }
    }

    /// Move selection to the previous item
    pub fn select_previous(&mut self) {
        let total = self.current_list_len();
        if total > 0 && self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
            self.scroll_state.ensure_visible(self.selected_index, total);
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self) {
        let total = self.current_list_len();
        if total > 0 {
            let page_size = self.scroll_state.viewport_height.max(1);
            self.selected_index = (self.selected_index + page_size).min(total - 1);
            self.list_state.select(Some(self.selected_index));
            self.scroll_state.ensure_visible(self.selected_index, total);
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self) {
        let total = self.current_list_len();
        if total > 0 {
            let page_size = self.scroll_state.viewport_height.max(1);
            self.selected_index = self.selected_index.saturating_sub(page_size);
            self.list_state.select(Some(self.selected_index));
            self.scroll_state.ensure_visible(self.selected_index, total);
        }
    }

    /// Jump to the first item
    pub fn select_first(&mut self) {
        let total = self.current_list_len();
        if total > 0 {
            self.selected_index = 0;
            self.list_state.select(Some(0));
            self.scroll_state.offset = 0;
        }
    }

    /// Jump to the last item
    pub fn select_last(&mut self) {
        let total = self.current_list_len();
        if total > 0 {
            self.selected_index = total - 1;
            self.list_state.select(Some(self.selected_index));
            self.scroll_state.ensure_visible(self.selected_index, total);
        }
    }

    /// Get the current list length (filtered or full)
    fn current_list_len(&self) -> usize {
        self.visible_rows().len()
    }

    /// Toggle expansion of the selected item
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if self.forest.toggle(&id) {
                self.refresh_rows();
                self.select_id(&id);
            }
        }
    }

    /// Expand the selected item
    pub fn expand_selected(&mut self) {
        self.set_selected_expanded(true);
    }

    /// Collapse the selected item
    pub fn collapse_selected(&mut self) {
        self.set_selected_expanded(false);
    }

    fn set_selected_expanded(&mut self, expanded: bool) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !row.has_children {
            return;
        }
        let id = row.id.clone();
        if self.forest.set_expanded(&id, expanded) {
            self.refresh_rows();
            self.select_id(&id);
        }
    }

    /// Expand or collapse every interior node
    pub fn set_all_expanded(&mut self, expanded: bool) {
        let id = self.selected_id();
        self.forest.set_all_expanded(expanded);
        self.refresh_rows();
        if let Some(id) = id {
            self.select_id(&id);
        }
    }

    /// Hand the selected node's url to the router
    pub fn navigate_selected(&mut self) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        let Some(node) = self.forest.find(&id) else {
            return false;
        };
        if router::navigate(&mut self.router, node) {
            self.status = node.navigation_target().map(|url| format!("Navigated to {}", url));
            true
        } else {
            false
        }
    }

    /// Enter on a row: interior nodes toggle, leaves navigate
    pub fn activate_selected(&mut self) {
        match self.selected_row() {
            Some(row) if row.has_children => self.toggle_selected(),
            Some(_) => {
                self.navigate_selected();
            }
            None => {}
        }
    }

    /// Open the action menu on the selected row
    pub fn open_menu(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let position = MenuPosition::new(
            (row.depth * 4) as u16,
            self.selected_index.saturating_sub(self.scroll_state.offset) as u16,
        );
        let id = row.id.clone();
        self.overlay.open_menu(id, position);
    }

    /// Pick the highlighted menu entry
    pub fn choose_menu_entry(&mut self) {
        if let Some(action) = self.overlay.menu_selection() {
            self.choose(action);
        }
    }

    fn choose(&mut self, action: MenuAction) {
        if let Err(err) = self.overlay.choose(action, &self.forest) {
            self.status = Some(err.to_string());
        }
    }

    /// Open the dialog for a new root node
    pub fn open_root_dialog(&mut self) {
        if let Err(err) = self.overlay.open_root_dialog() {
            self.status = Some(err.to_string());
        }
    }

    /// Submit the open dialog and apply the result to the forest
    pub fn submit_dialog(&mut self) {
        let submission = match self.overlay.submit(&self.config.default_icon) {
            Ok(submission) => submission,
            // The dialog stays open and shows the field error
            Err(TreeError::MissingRequiredField { .. }) => return,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };

        let is_delete = matches!(submission, crate::overlay::Submission::Delete { .. });
        match submission.apply(&mut self.forest) {
            Some(id) if is_delete => {
                self.refresh_rows();
                self.status = Some(format!("Deleted {}", id));
            }
            Some(id) => {
                self.refresh_rows();
                self.select_id(&id);
                self.status = Some(format!("Added {}", id));
            }
            None => {
                self.status = Some("Target node no longer exists".to_string());
            }
        }
    }

    /// Add a node without going through the dialog
    pub fn add_root(&mut self, draft: &NodeDraft) -> String {
        let id = self.forest.add_root(draft);
        self.refresh_rows();
        id
    }

    /// Signal that the application should quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Start search mode
    pub fn start_search(&mut self) {
        self.search_active = true;
        self.search_query.clear();
    }

    /// Clear search and return to normal mode
    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.filtered.clear();
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Add a character to the search query
    pub fn search_push(&mut self, c: char) {
        self.search_query.push(c);
        self.update_filter();
    }

    /// Remove the last character from the search query
    pub fn search_pop(&mut self) {
        self.search_query.pop();
        self.update_filter();
    }

    /// Update the filtered view based on the current search query
    fn update_filter(&mut self) {
        if self.search_query.is_empty() {
            self.filtered.clear();
        } else {
            self.filtered = self
                .rows
                .iter()
                .filter(|row| fuzzy_match(&row.name, &self.search_query))
                .cloned()
                .collect();
        }
        self.selected_index = 0;
        self.list_state.select(Some(self.selected_index));
    }

    /// Dispatch one key press according to the current mode
    pub fn handle_key(&mut self, code: KeyCode) {
        match &self.overlay {
            Overlay::DialogOpen(_) => self.handle_dialog_key(code),
            Overlay::MenuOpen { .. } => self.handle_menu_key(code),
            Overlay::Idle if self.search_active => self.handle_search_key(code),
            Overlay::Idle => self.handle_normal_key(code),
        }
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.overlay.cancel(),
            KeyCode::Enter => self.submit_dialog(),
            _ => {
                let Some(dialog) = self.overlay.dialog_mut() else {
                    return;
                };
                if !dialog.kind.has_form() {
                    return;
                }
                match code {
                    KeyCode::Tab | KeyCode::Down => dialog.form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => dialog.form.focus_previous(),
                    KeyCode::Backspace => dialog.form.pop(),
                    KeyCode::Char(c) => dialog.form.push(c),
                    _ => {}
                }
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('m') => {
                self.overlay.pointer_leave()
            }
            KeyCode::Char('j') | KeyCode::Down => self.overlay.menu_next(),
            KeyCode::Char('k') | KeyCode::Up => self.overlay.menu_previous(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.choose_menu_entry(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.clear_search(),
            // Exit search mode but keep the filter active
            KeyCode::Enter => self.search_active = false,
            KeyCode::Backspace => self.search_pop(),
            KeyCode::Char(c) => self.search_push(c),
            KeyCode::Down | KeyCode::Tab => self.select_next(),
            KeyCode::Up | KeyCode::BackTab => self.select_previous(),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.clear_search();
                } else {
                    self.quit();
                }
            }
            KeyCode::Char('/') => self.start_search(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('l') | KeyCode::Right => self.expand_selected(),
            KeyCode::Char('h') | KeyCode::Left => self.collapse_selected(),
            KeyCode::Char('o') => {
                self.navigate_selected();
            }
            KeyCode::Char('m') => self.open_menu(),
            KeyCode::Char('a') => self.open_root_dialog(),
            KeyCode::Char('E') => self.set_all_expanded(true),
            KeyCode::Char('C') => self.set_all_expanded(false),
            KeyCode::PageDown | KeyCode::Char('d') => self.page_down(),
            KeyCode::PageUp | KeyCode::Char('u') => self.page_up(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            _ => {}
        }
    }
}

/// Perform fuzzy matching of query against text (case-insensitive)
/// A match requires all characters of the query to appear in order in the text
fn fuzzy_match(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    let mut query_chars = query_lower.chars().peekable();
    for c in text_lower.chars() {
        if let Some(&q) = query_chars.peek() {
            if c == q {
                query_chars.next();
            }
        }
        if query_chars.peek().is_none() {
            return true;
        }
    }
    query_chars.peek().is_none()
}

/// Base color for a row: sections, navigable entries, inert entries
fn get_row_color(row: &FlattenedNode) -> Color {
    if row.has_children {
        Color::Cyan
    } else if row.is_navigable() {
        Color::Green
    } else {
        Color::White
    }
}

/// Maximum depth for color gradient calculations
const MAX_DEPTH_FOR_COLOR: usize = 10;

/// Get color intensity based on depth (brighter = closer to root)
///
/// Returns a brightness factor from 0.0 to 1.0 where:
/// - Depth 0 (root): 1.0 (brightest)
/// - Max depth: 0.4 (dimmer but still visible)
fn get_depth_brightness(depth: usize) -> f32 {
    let clamped_depth = depth.min(MAX_DEPTH_FOR_COLOR);
    let ratio = clamped_depth as f32 / MAX_DEPTH_FOR_COLOR as f32;
    1.0 - (ratio * 0.6)
}

/// Apply brightness modifier to a color based on depth
fn apply_depth_color(base_color: Color, depth: usize) -> Color {
    let brightness = get_depth_brightness(depth);
    let scale = |v: f32| (v * brightness) as u8;

    match base_color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r as f32), scale(g as f32), scale(b as f32)),
        Color::Green => Color::Rgb(0, scale(255.0), 0),
        Color::Cyan => Color::Rgb(0, scale(255.0), scale(255.0)),
        Color::White => {
            let val = scale(255.0);
            Color::Rgb(val, val, val)
        }
        other => other,
    }
}

/// Terminal glyph for a Bootstrap icon name
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "bi-folder" | "bi-folder2" => "▣ ",
        "bi-file" | "bi-file-earmark" => "▤ ",
        "bi-speedometer2" | "bi-speedometer" => "◷ ",
        "bi-gear" => "⚙ ",
        "bi-house" => "⌂ ",
        _ => "• ",
    }
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &mut App) {
    let screen = frame.area();
    let show_search = app.search_active || !app.search_query.is_empty();

    let chunks = if show_search {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Tree
                Constraint::Length(3), // Footer
            ])
            .split(screen)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Tree
                Constraint::Length(3), // Footer
            ])
            .split(screen)
    };

    let tree_area = if show_search {
        render_header(frame, chunks[0]);
        render_search_bar(frame, app, chunks[1]);
        render_tree(frame, app, chunks[2]);
        render_footer(frame, app, chunks[3]);
        chunks[2]
    } else {
        render_header(frame, chunks[0]);
        render_tree(frame, app, chunks[1]);
        render_footer(frame, app, chunks[2]);
        chunks[1]
    };

    match &app.overlay {
        Overlay::MenuOpen { position, cursor, .. } => {
            render_menu(frame, *position, *cursor, tree_area)
        }
        Overlay::DialogOpen(_) => render_dialog(frame, app, screen),
        Overlay::Idle => {}
    }
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("Sidebar")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the search bar
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (border_color, title) = if app.search_active {
        (Color::Yellow, "Search (Enter to confirm, Esc to cancel)")
    } else {
        (Color::Gray, "Filter (/ to edit, Esc to clear)")
    };

    let search_display = format!("/{}", app.search_query);
    let cursor = if app.search_active { "_" } else { "" };

    let result_count = if !app.search_query.is_empty() {
        format!(" ({} matches)", app.filtered.len())
    } else {
        String::new()
    };

    let content = Line::from(vec![
        Span::styled(&search_display, Style::default().fg(Color::White)),
        Span::styled(cursor, Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)),
        Span::styled(&result_count, Style::default().fg(Color::DarkGray)),
    ]);

    let search_bar = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search_bar, area);
}

/// Render the sidebar tree with virtual scrolling
///
/// Only renders visible rows, and updates the scroll state viewport height
/// based on the available area.
pub fn render_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let has_search = !app.search_query.is_empty();
    let search_query = app.search_query.clone();

    let viewport_height = (area.height as usize).saturating_sub(2);
    app.scroll_state.set_viewport_height(viewport_height);

    let total_rows = app.current_list_len();
    app.scroll_state.ensure_visible(app.selected_index, total_rows);
    let (start_idx, end_idx) = app.scroll_state.visible_range(app.selected_index, total_rows);

    let items: Vec<ListItem> = app.visible_rows()[start_idx..end_idx]
        .iter()
        .map(|row| {
            // Branch lines make no sense once rows are filtered
            let prefix = if has_search {
                String::new()
            } else {
                row.tree_prefix()
            };
            let color = apply_depth_color(get_row_color(row), row.depth);

            let name_spans = if has_search {
                highlight_matches(&row.name, &search_query, color)
            } else {
                vec![Span::styled(row.name.clone(), Style::default().fg(color))]
            };

            let mut content_spans = vec![
                Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(row.expansion_indicator(), Style::default().fg(Color::Yellow)),
                Span::styled(icon_glyph(&row.icon), Style::default().fg(color)),
            ];
            content_spans.extend(name_spans);
            content_spans.push(Span::styled(
                row.action_marker(),
                Style::default().fg(Color::DarkGray),
            ));
            if let Some(url) = row.url.as_deref().filter(|url| !url.is_empty()) {
                content_spans.push(Span::styled(
                    format!("  {}", url),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(content_spans))
        })
        .collect();

    let relative_selection = app.selected_index.saturating_sub(start_idx);
    app.list_state.select(Some(relative_selection));

    let title = if has_search {
        format!("Menu (filtered: {} matches)", total_rows)
    } else if total_rows > viewport_height {
        format!("Menu ({}-{} of {})", start_idx + 1, end_idx, total_rows)
    } else {
        format!("Menu ({} nodes)", app.forest.len())
    };

    let tree_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let tree_list = List::new(items)
        .block(tree_block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    frame.render_stateful_widget(tree_list, area, &mut app.list_state);
}

/// Render the action menu next to the row it was opened on
fn render_menu(frame: &mut Frame, position: MenuPosition, cursor: usize, tree_area: Rect) {
    let width = 22u16.min(tree_area.width);
    let height = (MenuAction::ALL.len() as u16 + 2).min(tree_area.height);

    // Row y is relative to the list; +1 skips the border, +1 opens below the row
    let x = (tree_area.x + 2 + position.x).min(tree_area.right().saturating_sub(width));
    let y = (tree_area.y + 2 + position.y).min(tree_area.bottom().saturating_sub(height));
    let area = Rect::new(x, y, width, height);

    let items: Vec<ListItem> = MenuAction::ALL
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(cursor));

    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(menu, area, &mut state);
}

/// Render the add / delete dialog centered on screen
fn render_dialog(frame: &mut Frame, app: &App, screen: Rect) {
    let Some(dialog) = app.overlay.dialog() else {
        return;
    };

    let mut lines = Vec::new();
    if let Some(target) = &dialog.target {
        lines.push(Line::from(vec![
            Span::styled("Target: ", Style::default().fg(Color::DarkGray)),
            Span::raw(target.name.clone()),
        ]));
        lines.push(Line::raw(""));
    }

    if dialog.kind.has_form() {
        for field in FormField::ALL {
            let focused = dialog.form.focus == field;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut value = dialog.form.value(field).to_string();
            if focused {
                value.push('_');
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{:>5}: ", field.label()), label_style),
                Span::raw(value),
            ]));
        }
    } else if let Some(target) = &dialog.target {
        lines.push(Line::raw(format!(
            "Delete '{}' and everything below it?",
            target.name
        )));
    }

    if let Some(error) = &dialog.error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Confirm  "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Next field  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]));

    let width = 50u16.min(screen.width);
    let height = (lines.len() as u16 + 2).min(screen.height);
    let area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    );

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(dialog.kind.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Highlight matching characters in a string based on fuzzy search
fn highlight_matches(text: &str, query: &str, base_color: Color) -> Vec<Span<'static>> {
    if query.is_empty() {
        return vec![Span::styled(text.to_string(), Style::default().fg(base_color))];
    }

    let match_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let query_lower = query.to_lowercase();
    let mut result = Vec::new();
    let mut current_segment = String::new();
    let mut current_is_match = false;
    let mut query_chars = query_lower.chars().peekable();

    for c in text.chars() {
        let c_lower = c.to_lowercase().next().unwrap_or(c);
        let is_match = query_chars.peek().is_some_and(|&q| c_lower == q);

        if is_match {
            query_chars.next();
        }

        if is_match != current_is_match && !current_segment.is_empty() {
            let style = if current_is_match {
                match_style
            } else {
                Style::default().fg(base_color)
            };
            result.push(Span::styled(current_segment.clone(), style));
            current_segment.clear();
        }

        current_segment.push(c);
        current_is_match = is_match;
    }

    if !current_segment.is_empty() {
        let style = if current_is_match {
            match_style
        } else {
            Style::default().fg(base_color)
        };
        result.push(Span::styled(current_segment, style));
    }

    result
}

/// Render the footer with help text and the current route
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = if app.search_active {
        vec![
            key("Type"),
            Span::raw(" to search  "),
            key("↑/↓"),
            Span::raw(" Navigate  "),
            key("Enter"),
            Span::raw(" Confirm  "),
            key("Esc"),
            Span::raw(" Cancel"),
        ]
    } else {
        vec![
            key("/"),
            Span::raw(" Search  "),
            key("j/k"),
            Span::raw(" Nav  "),
            key("Enter"),
            Span::raw(" Open  "),
            key("h/l"),
            Span::raw(" Fold  "),
            key("m"),
            Span::raw(" Menu  "),
            key("a"),
            Span::raw(" Add  "),
            key("E/C"),
            Span::raw(" All  "),
            key("q"),
            Span::raw(" Quit"),
        ]
    };

    let route = app.router.current().unwrap_or("-");
    spans.push(Span::raw("  │  "));
    spans.push(Span::styled(
        format!("route: {}", route),
        Style::default().fg(Color::Green),
    ));
    if let Some(status) = &app.status {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::White)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
