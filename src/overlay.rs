//! Interaction overlay: the action menu and the add/delete dialog.
//!
//! The overlay is a small state machine layered over the forest:
//!
//! ```text
//! Idle ──open_menu──▶ MenuOpen ──choose──▶ DialogOpen ──submit/cancel──▶ Idle
//!   ▲                    │                     ▲
//!   └───pointer_leave────┘                     │
//!   └──────────────open_root_dialog────────────┘
//! ```
//!
//! Nothing here touches the forest. A successful [`Overlay::submit`] yields a
//! [`Submission`] that the owner applies with [`Submission::apply`].

use std::fmt;

use crate::error::{TreeError, TreeResult};
use crate::tree::{Forest, NodeDraft, TreeNode};

/// Where the menu was opened, in presentation coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuPosition {
    pub x: u16,
    pub y: u16,
}

impl MenuPosition {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Entries of the per-node action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddSibling,
    AddChild,
    Delete,
}

impl MenuAction {
    /// Menu entries in display order
    pub const ALL: [MenuAction; 3] = [MenuAction::AddSibling, MenuAction::AddChild, MenuAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddSibling => "Add Sibling Node",
            MenuAction::AddChild => "Add Child Node",
            MenuAction::Delete => "Delete Node",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a dialog will do when submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    AddChild,
    AddSibling,
    AddRoot,
    Delete,
}

impl DialogKind {
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::AddChild => "Add Child Node",
            DialogKind::AddSibling => "Add Sibling Node",
            DialogKind::AddRoot => "Add New Node",
            DialogKind::Delete => "Delete Node",
        }
    }

    /// Whether the dialog collects node fields
    pub fn has_form(&self) -> bool {
        !matches!(self, DialogKind::Delete)
    }
}

impl From<MenuAction> for DialogKind {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::AddSibling => DialogKind::AddSibling,
            MenuAction::AddChild => DialogKind::AddChild,
            MenuAction::Delete => DialogKind::Delete,
        }
    }
}

/// Input fields of the add-node form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Icon,
    Url,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Icon, FormField::Url];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Icon => "Icon",
            FormField::Url => "URL",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Icon,
            FormField::Icon => FormField::Url,
            FormField::Url => FormField::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Name => FormField::Url,
            FormField::Icon => FormField::Name,
            FormField::Url => FormField::Icon,
        }
    }
}

/// The add-node form as typed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeForm {
    pub name: String,
    pub icon: String,
    pub url: String,
    pub focus: FormField,
}

impl NodeForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Icon => &self.icon,
            FormField::Url => &self.url,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Icon => &mut self.icon,
            FormField::Url => &mut self.url,
        }
    }

    /// Type a character into the focused field
    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Delete the last character of the focused field
    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Turn the form into a draft.
    ///
    /// The name is required. A blank icon falls back to `default_icon` and a
    /// blank url means the node is not navigable.
    pub fn to_draft(&self, default_icon: &str) -> TreeResult<NodeDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TreeError::MissingRequiredField { field: "name" });
        }

        let icon = match self.icon.trim() {
            "" => default_icon,
            icon => icon,
        };
        let url = Some(self.url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(NodeDraft {
            name: name.to_string(),
            icon: icon.to_string(),
            url,
        })
    }
}

/// An open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    /// Snapshot of the node the menu was opened on; `None` for a new root
    pub target: Option<TreeNode>,
    pub form: NodeForm,
    /// Field-level error from the last rejected submission
    pub error: Option<String>,
}

impl Dialog {
    fn new(kind: DialogKind, target: Option<TreeNode>) -> Self {
        Self {
            kind,
            target,
            form: NodeForm::default(),
            error: None,
        }
    }
}

/// A validated dialog result, ready to apply to the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    AddChild { parent_id: String, draft: NodeDraft },
    AddSibling { anchor_id: String, draft: NodeDraft },
    AddRoot { draft: NodeDraft },
    Delete { node_id: String },
}

impl Submission {
    /// Apply to `forest`.
    ///
    /// Returns the id of the inserted node for additions, or the removed id
    /// for deletions. `None` means the target no longer exists and nothing
    /// changed.
    pub fn apply(self, forest: &mut Forest) -> Option<String> {
        match self {
            Submission::AddChild { parent_id, draft } => forest.add_child(&parent_id, &draft),
            Submission::AddSibling { anchor_id, draft } => forest.add_sibling(&anchor_id, &draft),
            Submission::AddRoot { draft } => Some(forest.add_root(&draft)),
            Submission::Delete { node_id } => forest.remove(&node_id).then_some(node_id),
        }
    }
}

/// Overlay state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Idle,
    MenuOpen {
        node_id: String,
        position: MenuPosition,
        /// Highlighted entry in [`MenuAction::ALL`]
        cursor: usize,
    },
    DialogOpen(Dialog),
}

impl Overlay {
    pub fn state_name(&self) -> &'static str {
        match self {
            Overlay::Idle => "idle",
            Overlay::MenuOpen { .. } => "a menu is open",
            Overlay::DialogOpen(_) => "a dialog is open",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Overlay::Idle)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        match self {
            Overlay::DialogOpen(dialog) => Some(dialog),
            _ => None,
        }
    }

    pub fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        match self {
            Overlay::DialogOpen(dialog) => Some(dialog),
            _ => None,
        }
    }

    /// Open the action menu on `node_id`.
    ///
    /// Reopening while a menu is shown retargets it. Ignored while a dialog
    /// is open.
    pub fn open_menu(&mut self, node_id: impl Into<String>, position: MenuPosition) {
        if matches!(self, Overlay::DialogOpen(_)) {
            return;
        }
        *self = Overlay::MenuOpen {
            node_id: node_id.into(),
            position,
            cursor: 0,
        };
    }

    /// The pointer left the menu region: close it without side effects
    pub fn pointer_leave(&mut self) {
        if matches!(self, Overlay::MenuOpen { .. }) {
            *self = Overlay::Idle;
        }
    }

    pub fn menu_next(&mut self) {
        if let Overlay::MenuOpen { cursor, .. } = self {
            *cursor = (*cursor + 1).min(MenuAction::ALL.len() - 1);
        }
    }

    pub fn menu_previous(&mut self) {
        if let Overlay::MenuOpen { cursor, .. } = self {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// The highlighted menu entry
    pub fn menu_selection(&self) -> Option<MenuAction> {
        match self {
            Overlay::MenuOpen { cursor, .. } => MenuAction::ALL.get(*cursor).copied(),
            _ => None,
        }
    }

    /// Pick a menu entry: close the menu and open the matching dialog on the
    /// targeted node, looked up in `forest`.
    ///
    /// If the node has disappeared the overlay returns to idle.
    pub fn choose(&mut self, action: MenuAction, forest: &Forest) -> TreeResult<()> {
        let Overlay::MenuOpen { node_id, .. } = self else {
            return Err(TreeError::InvalidTransition {
                state: self.state_name(),
                event: "choose a menu action",
            });
        };

        *self = match forest.find(node_id) {
            Some(target) => Overlay::DialogOpen(Dialog::new(action.into(), Some(target.clone()))),
            None => {
                tracing::debug!(node_id = %node_id, "menu target vanished");
                Overlay::Idle
            }
        };
        Ok(())
    }

    /// Open the add dialog for a new root. Only valid from idle.
    pub fn open_root_dialog(&mut self) -> TreeResult<()> {
        if !self.is_idle() {
            return Err(TreeError::InvalidTransition {
                state: self.state_name(),
                event: "open the add-root dialog",
            });
        }
        *self = Overlay::DialogOpen(Dialog::new(DialogKind::AddRoot, None));
        Ok(())
    }

    /// Close the dialog without side effects
    pub fn cancel(&mut self) {
        if matches!(self, Overlay::DialogOpen(_)) {
            *self = Overlay::Idle;
        }
    }

    /// Submit the open dialog.
    ///
    /// On success the overlay returns to idle. A missing required field
    /// keeps the dialog open with the error recorded on it.
    pub fn submit(&mut self, default_icon: &str) -> TreeResult<Submission> {
        let Overlay::DialogOpen(dialog) = self else {
            return Err(TreeError::InvalidTransition {
                state: self.state_name(),
                event: "submit a dialog",
            });
        };

        let target_id = dialog.target.as_ref().map(|node| node.id.clone());
        let submission = match (dialog.kind, target_id) {
            (DialogKind::Delete, Some(node_id)) => Submission::Delete { node_id },
            (DialogKind::AddRoot, _) | (_, None) => Submission::AddRoot {
                draft: Self::draft(dialog, default_icon)?,
            },
            (DialogKind::AddChild, Some(parent_id)) => Submission::AddChild {
                parent_id,
                draft: Self::draft(dialog, default_icon)?,
            },
            (DialogKind::AddSibling, Some(anchor_id)) => Submission::AddSibling {
                anchor_id,
                draft: Self::draft(dialog, default_icon)?,
            },
        };

        *self = Overlay::Idle;
        Ok(submission)
    }

    fn draft(dialog: &mut Dialog, default_icon: &str) -> TreeResult<NodeDraft> {
        dialog.form.to_draft(default_icon).map_err(|err| {
            dialog.error = Some(err.to_string());
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_forest() -> Forest {
        let mut category = TreeNode::new("2", "Category", "bi-folder");
        category.add_child(TreeNode::new("2-1", "Subcategory 1", "bi-folder"));
        Forest::new(vec![TreeNode::new("1", "Dashboard", "bi-speedometer2"), category]).unwrap()
    }

    fn type_str(form: &mut NodeForm, s: &str) {
        for c in s.chars() {
            form.push(c);
        }
    }

    #[test]
    fn test_menu_open_and_leave() {
        let mut overlay = Overlay::default();
        assert!(overlay.is_idle());

        overlay.open_menu("2-1", MenuPosition::new(10, 4));
        assert!(matches!(overlay, Overlay::MenuOpen { ref node_id, .. } if node_id == "2-1"));

        overlay.pointer_leave();
        assert!(overlay.is_idle());
    }

    #[test]
    fn test_menu_retarget() {
        let mut overlay = Overlay::default();
        overlay.open_menu("1", MenuPosition::default());
        overlay.menu_next();
        overlay.open_menu("2-1", MenuPosition::default());

        assert!(matches!(
            overlay,
            Overlay::MenuOpen { ref node_id, cursor: 0, .. } if node_id == "2-1"
        ));
    }

    #[test]
    fn test_menu_cursor_is_clamped() {
        let mut overlay = Overlay::default();
        overlay.open_menu("1", MenuPosition::default());

        overlay.menu_previous();
        assert_eq!(overlay.menu_selection(), Some(MenuAction::AddSibling));

        for _ in 0..10 {
            overlay.menu_next();
        }
        assert_eq!(overlay.menu_selection(), Some(MenuAction::Delete));
    }

    #[test]
    fn test_choose_opens_dialog_with_target() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();
        overlay.open_menu("2-1", MenuPosition::default());

        overlay.choose(MenuAction::AddChild, &forest).unwrap();

        let dialog = overlay.dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::AddChild);
        assert_eq!(dialog.target.as_ref().unwrap().name, "Subcategory 1");
    }

    #[test]
    fn test_choose_on_vanished_node_returns_to_idle() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();
        overlay.open_menu("gone", MenuPosition::default());

        overlay.choose(MenuAction::AddChild, &forest).unwrap();
        assert!(overlay.is_idle());
    }

    #[test]
    fn test_choose_while_idle_is_invalid() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();

        let err = overlay.choose(MenuAction::AddChild, &forest).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTransition { state: "idle", .. }));
    }

    #[test]
    fn test_dialog_ignores_menu_events() {
        let mut overlay = Overlay::default();
        overlay.open_root_dialog().unwrap();

        overlay.open_menu("1", MenuPosition::default());
        overlay.pointer_leave();
        assert!(overlay.dialog().is_some());

        overlay.cancel();
        assert!(overlay.is_idle());
    }

    #[test]
    fn test_submit_add_child() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();
        overlay.open_menu("2-1", MenuPosition::default());
        overlay.choose(MenuAction::AddChild, &forest).unwrap();

        let form = &mut overlay.dialog_mut().unwrap().form;
        type_str(form, "X");
        form.focus_next();
        form.focus_next();
        type_str(form, "/x");

        let submission = overlay.submit("bi-file").unwrap();
        assert!(overlay.is_idle());
        assert_eq!(
            submission,
            Submission::AddChild {
                parent_id: "2-1".to_string(),
                draft: NodeDraft::new("X", "bi-file").with_url("/x"),
            }
        );
    }

    #[test]
    fn test_submit_empty_name_keeps_dialog_open() {
        let mut overlay = Overlay::default();
        overlay.open_root_dialog().unwrap();
        type_str(&mut overlay.dialog_mut().unwrap().form, "   ");

        let err = overlay.submit("bi-file").unwrap_err();
        assert!(matches!(err, TreeError::MissingRequiredField { field: "name" }));

        let dialog = overlay.dialog().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("Missing required field: name"));
    }

    #[test]
    fn test_submit_delete_needs_no_fields() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();
        overlay.open_menu("1", MenuPosition::default());
        overlay.choose(MenuAction::Delete, &forest).unwrap();

        let submission = overlay.submit("bi-file").unwrap();
        assert_eq!(
            submission,
            Submission::Delete {
                node_id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_submit_while_idle_is_invalid() {
        let mut overlay = Overlay::default();
        assert!(matches!(
            overlay.submit("bi-file"),
            Err(TreeError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_add_sibling_and_child_differ() {
        let mut forest = create_test_forest();
        let draft = NodeDraft::new("New", "bi-file");

        Submission::AddChild {
            parent_id: "2-1".to_string(),
            draft: draft.clone(),
        }
        .apply(&mut forest);
        Submission::AddSibling {
            anchor_id: "2-1".to_string(),
            draft,
        }
        .apply(&mut forest);

        assert_eq!(forest.find("2-1").unwrap().children.len(), 1);
        assert_eq!(forest.find("2").unwrap().children.len(), 2);
    }

    #[test]
    fn test_apply_delete_missing() {
        let mut forest = create_test_forest();
        let result = Submission::Delete {
            node_id: "missing".to_string(),
        }
        .apply(&mut forest);

        assert!(result.is_none());
        assert_eq!(forest.len(), 3);
    }

    #[test]
    fn test_form_editing() {
        let mut form = NodeForm::default();
        type_str(&mut form, "Reportz");
        form.pop();
        form.push('s');
        form.focus_previous();
        type_str(&mut form, "/reports");

        assert_eq!(form.value(FormField::Name), "Reports");
        assert_eq!(form.value(FormField::Url), "/reports");
        assert_eq!(form.value(FormField::Icon), "");
    }

    #[test]
    fn test_form_to_draft_defaults() {
        let form = NodeForm {
            name: "  Reports ".to_string(),
            icon: " ".to_string(),
            url: String::new(),
            focus: FormField::Name,
        };

        let draft = form.to_draft("bi-file").unwrap();
        assert_eq!(draft.name, "Reports");
        assert_eq!(draft.icon, "bi-file");
        assert_eq!(draft.url, None);
    }

    #[test]
    fn test_overlay_is_reusable() {
        let forest = create_test_forest();
        let mut overlay = Overlay::default();

        for _ in 0..3 {
            overlay.open_menu("1", MenuPosition::default());
            overlay.choose(MenuAction::AddSibling, &forest).unwrap();
            overlay.cancel();
            assert!(overlay.is_idle());
        }
    }
}
