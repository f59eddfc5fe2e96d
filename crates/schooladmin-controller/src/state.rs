//! Observable controller state.

use serde::Serialize;

use schooladmin_core::types::FormFields;

/// The page of entities currently shown, with pagination and search
/// metadata.
///
/// Replaced wholesale by every accepted load. Forms never touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState<T> {
    /// Rows to render, after client-side filters.
    pub items: Vec<T>,
    /// Current page, 1-based.
    pub page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Known page count, at least 1.
    pub total_pages: u64,
    /// Total row count, when the server reports it.
    pub total_items: Option<u64>,
    /// Search term as typed, including one whose load is still pending.
    pub search_term: String,
    /// A load is in flight.
    pub is_loading: bool,
    /// At least one load has finished, successfully or not.
    pub has_loaded: bool,
    /// Message from the most recent failed load.
    pub last_error: Option<String>,
}

impl<T> ListState<T> {
    /// Initial state at mount: empty and loading.
    pub fn new(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size,
            total_pages: 1,
            total_items: None,
            search_term: String::new(),
            is_loading: true,
            has_loaded: false,
            last_error: None,
        }
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Nothing to show after a finished load.
    pub fn is_empty(&self) -> bool {
        self.has_loaded && !self.is_loading && self.items.is_empty()
    }
}

/// Whether a draft creates a new entity or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormMode {
    /// POST to the collection.
    Create,
    /// PUT to the entity.
    Edit,
}

/// An open create/edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDraft {
    /// Create or edit.
    pub mode: FormMode,
    /// Entity being edited; `None` in create mode.
    pub target_id: Option<u64>,
    /// Raw field input.
    pub fields: FormFields,
    /// A submit is in flight.
    pub is_submitting: bool,
    /// Message from the last failed submit.
    pub error: Option<String>,
}

impl FormDraft {
    /// A blank create draft.
    pub fn create(fields: FormFields) -> Self {
        Self {
            mode: FormMode::Create,
            target_id: None,
            fields,
            is_submitting: false,
            error: None,
        }
    }

    /// An edit draft for entity `id`.
    pub fn edit(id: u64, fields: FormFields) -> Self {
        Self {
            mode: FormMode::Edit,
            target_id: Some(id),
            fields,
            is_submitting: false,
            error: None,
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A one-line message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Everything a renderer needs, published after every state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot<T> {
    /// The list.
    pub list: ListState<T>,
    /// The open form, if any.
    pub form: Option<FormDraft>,
    /// Latest notice.
    pub notice: Option<Notice>,
    /// No credential is stored; the renderer should route to login.
    pub auth_required: bool,
}

impl<T> ControllerSnapshot<T> {
    /// Snapshot at mount.
    pub fn initial(page_size: u64) -> Self {
        Self {
            list: ListState::new(page_size),
            form: None,
            notice: None,
            auth_required: false,
        }
    }
}
