//! Per-resource controller configuration.

use std::fmt;
use std::time::Duration;

use schooladmin_client::envelope::ItemExtractor;
use schooladmin_core::config::controller::ControllerConfig;
use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::action::{BulkAction, GuardedAction};

/// Where paging happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Send `page`/`limit`/`search`, trust `totalPages` from the server.
    Server,
    /// Fetch up to `bulk_limit` rows once and slice pages locally.
    Client {
        /// `limit` sent with the single fetch.
        bulk_limit: u64,
    },
}

/// How a [`ListResourceController`](crate::ListResourceController) talks
/// to one collection.
pub struct ResourceConfig<T: Resource> {
    /// Collection endpoint relative to the API base.
    pub resource_path: String,
    /// Rows per page.
    pub page_size: u64,
    /// Quiet period before a search is issued.
    pub search_debounce: Duration,
    /// Server or client pagination.
    pub pagination: PaginationMode,
    /// Collection envelope extraction.
    pub extractor: ItemExtractor,
    /// Upper bound on one load.
    pub load_watchdog: Duration,
    /// Initial fields of a create draft.
    pub create_form: FormFields,
    /// Question asked before a delete.
    pub delete_confirmation: String,
    /// Per-row extra actions.
    pub actions: Vec<GuardedAction<T>>,
    /// Collection-level actions.
    pub bulk_actions: Vec<BulkAction>,
}

impl<T: Resource> ResourceConfig<T> {
    /// Configuration for `T` using the built-in controller defaults.
    pub fn new() -> Self {
        Self::from_settings(&ControllerConfig::default())
    }

    /// Configuration for `T` using the `[controller]` settings.
    pub fn from_settings(settings: &ControllerConfig) -> Self {
        Self {
            resource_path: T::PATH.to_string(),
            page_size: settings.page_size.max(1),
            search_debounce: settings.search_debounce(),
            pagination: PaginationMode::Server,
            extractor: ItemExtractor::for_resource::<T>(),
            load_watchdog: settings.load_watchdog(),
            create_form: FormFields::new(),
            delete_confirmation: format!(
                "Delete this {}? This cannot be undone.",
                T::LABEL.to_lowercase()
            ),
            actions: Vec::new(),
            bulk_actions: Vec::new(),
        }
    }

    /// Override the collection endpoint.
    pub fn resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Override rows per page.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Override the search debounce.
    pub fn search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Set the pagination mode.
    pub fn pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = mode;
        self
    }

    /// Shorthand for client-side pagination over one bulk fetch.
    pub fn client_side(self, bulk_limit: u64) -> Self {
        self.pagination(PaginationMode::Client { bulk_limit })
    }

    /// Override envelope extraction.
    pub fn extractor(mut self, extractor: ItemExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Override the load watchdog.
    pub fn load_watchdog(mut self, watchdog: Duration) -> Self {
        self.load_watchdog = watchdog;
        self
    }

    /// Initial fields for create drafts.
    pub fn create_form(mut self, fields: FormFields) -> Self {
        self.create_form = fields;
        self
    }

    /// Question asked before deleting.
    pub fn delete_confirmation(mut self, message: impl Into<String>) -> Self {
        self.delete_confirmation = message.into();
        self
    }

    /// Register a per-row action.
    pub fn action(mut self, action: GuardedAction<T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Register a collection-level action.
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Look up a per-row action by name.
    pub fn find_action(&self, name: &str) -> Option<&GuardedAction<T>> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Look up a collection-level action by name.
    pub fn find_bulk_action(&self, name: &str) -> Option<&BulkAction> {
        self.bulk_actions.iter().find(|a| a.name == name)
    }
}

impl<T: Resource> Default for ResourceConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> fmt::Debug for ResourceConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfig")
            .field("resource_path", &self.resource_path)
            .field("page_size", &self.page_size)
            .field("search_debounce", &self.search_debounce)
            .field("pagination", &self.pagination)
            .field("extractor", &self.extractor)
            .field("load_watchdog", &self.load_watchdog)
            .field("actions", &self.actions)
            .field("bulk_actions", &self.bulk_actions)
            .finish()
    }
}
