//! The generic list controller.
//!
//! One [`ListResourceController`] drives one collection screen. It owns
//! the list state, at most one form draft, and the latest notice, and
//! publishes a [`ControllerSnapshot`] after every change. Operations never
//! surface an error the caller must handle to stay consistent: failures
//! land in the snapshot, and write operations also return the message.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use schooladmin_client::api::ApiClient;
use schooladmin_client::envelope::PageMeta;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{ApiRequest, ConfirmGate, Resource};
use schooladmin_core::types::{
    ApiErrorBody, FieldValue, FormFields, PageRequest, clamp_page, page_slice, total_pages_for,
};

use crate::config::{PaginationMode, ResourceConfig};
use crate::debounce::Debouncer;
use crate::sequence::{LoadSequencer, LoadTicket};
use crate::state::{ControllerSnapshot, FormDraft, FormMode, ListState, Notice};

/// Fallback when a load fails without a server message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";
/// Fallback when a submit fails without a server message.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save.";
/// Fallback when a delete fails without a server message.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete.";
/// Fallback when an extra action fails without a server message.
pub const ACTION_FAILED_MESSAGE: &str = "Action failed.";
/// Returned by writes attempted without a stored credential.
pub const SIGNED_OUT_MESSAGE: &str = "You are not signed in.";

/// Result of one collection fetch.
struct Fetched<T> {
    items: Vec<T>,
    meta: PageMeta,
}

/// Mutable state behind the controller's lock.
struct Core<T> {
    list: ListState<T>,
    /// Everything the last accepted load returned, before filters and
    /// client-side slicing.
    fetched: Vec<T>,
    filters: BTreeMap<String, String>,
    form: Option<FormDraft>,
    notice: Option<Notice>,
    auth_required: bool,
}

impl<T: Resource> Core<T> {
    fn new(page_size: u64) -> Self {
        Self {
            list: ListState::new(page_size),
            fetched: Vec::new(),
            filters: BTreeMap::new(),
            form: None,
            notice: None,
            auth_required: false,
        }
    }

    fn snapshot(&self) -> ControllerSnapshot<T> {
        ControllerSnapshot {
            list: self.list.clone(),
            form: self.form.clone(),
            notice: self.notice.clone(),
            auth_required: self.auth_required,
        }
    }

    /// Recompute the rendered rows from `fetched`, filters, and page.
    fn refresh_view(&mut self, mode: PaginationMode) {
        let visible: Vec<T> = self
            .fetched
            .iter()
            .filter(|row| {
                self.filters
                    .iter()
                    .all(|(key, want)| row.filter_value(key).as_deref() == Some(want.as_str()))
            })
            .cloned()
            .collect();

        match mode {
            PaginationMode::Server => self.list.items = visible,
            PaginationMode::Client { .. } => {
                let size = self.list.page_size;
                let count = visible.len() as u64;
                self.list.total_items = Some(count);
                self.list.total_pages = total_pages_for(count, size);
                self.list.page = clamp_page(self.list.page, self.list.total_pages);
                self.list.items = page_slice(&visible, self.list.page, size).to_vec();
            }
        }
    }

    /// Record a failed write. Missing credentials flag the login route
    /// without a notice; anything else becomes an error notice.
    fn record_write_failure(&mut self, err: &AppError, fallback: &str) -> String {
        if err.is_auth_missing() {
            self.auth_required = true;
            return SIGNED_OUT_MESSAGE.to_string();
        }
        let message = err.user_message(fallback);
        self.notice = Some(Notice::error(message.clone()));
        message
    }
}

struct Inner<T: Resource> {
    client: ApiClient,
    confirm: Arc<dyn ConfirmGate>,
    config: ResourceConfig<T>,
    core: Mutex<Core<T>>,
    sequencer: LoadSequencer,
    debouncer: Debouncer,
    tx: watch::Sender<ControllerSnapshot<T>>,
}

/// Generic list/search/paginate/form controller for one collection.
///
/// Cheap to clone; clones share state. Must be driven from a tokio
/// runtime because [`search`](Self::search) spawns its debounce timer.
pub struct ListResourceController<T: Resource> {
    inner: Arc<Inner<T>>,
}

impl<T: Resource> Clone for ListResourceController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Resource> fmt::Debug for ListResourceController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListResourceController")
            .field("resource", &T::LABEL)
            .field("config", &self.inner.config)
            .field("latest_load", &self.inner.sequencer.latest())
            .finish()
    }
}

impl<T: Resource> ListResourceController<T> {
    /// Create a controller. The initial snapshot is empty and loading;
    /// call [`load`](Self::load) (or [`reload`](Self::reload)) to mount.
    pub fn new(
        client: ApiClient,
        confirm: Arc<dyn ConfirmGate>,
        config: ResourceConfig<T>,
    ) -> Self {
        let core = Core::new(config.page_size);
        let (tx, _) = watch::channel(core.snapshot());
        Self {
            inner: Arc::new(Inner {
                client,
                confirm,
                config,
                core: Mutex::new(core),
                sequencer: LoadSequencer::new(),
                debouncer: Debouncer::new(),
                tx,
            }),
        }
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &ResourceConfig<T> {
        &self.inner.config
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ControllerSnapshot<T> {
        self.inner.tx.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot<T>> {
        self.inner.tx.subscribe()
    }

    /// Apply `f` under the lock, then publish the new snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut Core<T>) -> R) -> R {
        let mut core = self
            .inner
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut core);
        self.inner.tx.send_replace(core.snapshot());
        out
    }

    /// Read under the lock without publishing.
    fn peek<R>(&self, f: impl FnOnce(&Core<T>) -> R) -> R {
        let core = self
            .inner
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&core)
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load `page` (0 is treated as 1) filtered by `search_term`.
    ///
    /// Only the most recently issued load may change the list; older
    /// completions are dropped. A failed load keeps the previous rows and
    /// records `last_error`. A load that outlives the watchdog counts as a
    /// network failure.
    pub async fn load(&self, page: u64, search_term: &str) {
        let mut page = page.max(1);
        loop {
            let ticket = self.update(|core| {
                core.list.is_loading = true;
                core.list.search_term = search_term.to_string();
                self.inner.sequencer.issue(page, search_term)
            });
            debug!(
                seq = ticket.seq,
                page,
                search = search_term,
                path = %self.inner.config.resource_path,
                "Load issued"
            );

            let watchdog = self.inner.config.load_watchdog;
            let result = match tokio::time::timeout(watchdog, self.fetch(&ticket)).await {
                Ok(result) => result,
                Err(_) => Err(AppError::network(format!(
                    "Load did not finish within {}s",
                    watchdog.as_secs()
                ))),
            };

            match self.update(|core| self.apply_load(core, &ticket, result)) {
                Some(last_page) => page = last_page,
                None => break,
            }
        }
    }

    /// Reload the current page with the current search term.
    pub async fn reload(&self) {
        let (page, term) = self.peek(|core| (core.list.page, core.list.search_term.clone()));
        self.load(page, &term).await;
    }

    async fn fetch(&self, ticket: &LoadTicket) -> AppResult<Fetched<T>> {
        let config = &self.inner.config;
        let params = match config.pagination {
            PaginationMode::Server => {
                PageRequest::new(ticket.page, config.page_size, ticket.search.clone()).to_params()
            }
            PaginationMode::Client { bulk_limit } => {
                let mut params = vec![("limit".to_string(), bulk_limit.to_string())];
                if !ticket.search.is_empty() {
                    params.push(("search".to_string(), ticket.search.clone()));
                }
                params
            }
        };

        let response = self.inner.client.get(&config.resource_path, params).await?;
        Ok(Fetched {
            items: config.extractor.extract(&response.body),
            meta: PageMeta::from_body(&response.body),
        })
    }

    /// Apply a finished load. Returns a page to fetch instead when the
    /// requested page turned out to be past the end.
    fn apply_load(
        &self,
        core: &mut Core<T>,
        ticket: &LoadTicket,
        result: AppResult<Fetched<T>>,
    ) -> Option<u64> {
        if !self.inner.sequencer.is_current(ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.inner.sequencer.latest(),
                page = ticket.page,
                search = %ticket.search,
                "Discarding superseded load"
            );
            return None;
        }

        core.list.is_loading = false;
        core.list.has_loaded = true;

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(err) if err.is_auth_missing() => {
                info!(path = %self.inner.config.resource_path, "No credential stored, login required");
                core.auth_required = true;
                return None;
            }
            Err(err) => {
                warn!(
                    path = %self.inner.config.resource_path,
                    page = ticket.page,
                    error = %err,
                    "Load failed, keeping previous rows"
                );
                core.list.last_error = Some(err.user_message(LOAD_FAILED_MESSAGE));
                return None;
            }
        };

        core.auth_required = false;
        core.list.last_error = None;
        core.fetched = fetched.items;

        let mode = self.inner.config.pagination;
        if mode == PaginationMode::Server {
            let total_pages = fetched.meta.total_pages.unwrap_or(1).max(1);
            core.list.total_pages = total_pages;
            core.list.total_items = fetched.meta.total_items;

            if ticket.page > total_pages && core.fetched.is_empty() {
                info!(
                    requested = ticket.page,
                    total_pages, "Requested page is past the end, loading last page"
                );
                core.list.is_loading = true;
                return Some(total_pages);
            }

            let page_size = core.list.page_size as usize;
            if core.fetched.len() > page_size {
                warn!(
                    returned = core.fetched.len(),
                    page_size, "Server returned more rows than requested, truncating"
                );
                core.fetched.truncate(page_size);
            }
            core.list.page = clamp_page(ticket.page, total_pages);
        } else {
            core.list.page = ticket.page;
        }

        core.refresh_view(mode);
        debug!(
            seq = ticket.seq,
            rows = core.list.items.len(),
            page = core.list.page,
            total_pages = core.list.total_pages,
            "Load applied"
        );
        None
    }

    // ── Search & paging ──────────────────────────────────────────────

    /// Set the search term and schedule a load of page 1 once input has
    /// been quiet for the debounce window. The term shows in the snapshot
    /// immediately; a newer call supersedes a pending one.
    pub fn search(&self, term: impl Into<String>) {
        let term = term.into();
        self.update(|core| {
            core.list.search_term = term.clone();
            core.list.page = 1;
        });

        let controller = self.clone();
        self.inner
            .debouncer
            .schedule(self.inner.config.search_debounce, async move {
                controller.load(1, &term).await;
            });
    }

    /// Go to `page`, clamped into `[1, total_pages]`.
    ///
    /// Server pagination loads the page; client pagination re-slices the
    /// rows already fetched.
    pub async fn set_page(&self, page: u64) {
        let next = self.update(|core| {
            let target = clamp_page(page, core.list.total_pages);
            if target != page {
                debug!(requested = page, target, "Page clamped");
            }
            match self.inner.config.pagination {
                PaginationMode::Server => Some((target, core.list.search_term.clone())),
                mode @ PaginationMode::Client { .. } => {
                    core.list.page = target;
                    core.refresh_view(mode);
                    None
                }
            }
        });

        if let Some((page, term)) = next {
            self.load(page, &term).await;
        }
    }

    // ── Client-side filters ──────────────────────────────────────────

    /// Show only rows whose `key` equals `value`. No refetch.
    ///
    /// Client pagination goes back to page 1 of the filtered rows. Server
    /// pagination filters the page already shown and stays on it, since
    /// its rows belong to that page.
    pub fn set_filter(&self, key: &str, value: impl Into<String>) {
        let mode = self.inner.config.pagination;
        self.update(|core| {
            core.filters.insert(key.to_string(), value.into());
            if matches!(mode, PaginationMode::Client { .. }) {
                core.list.page = 1;
            }
            core.refresh_view(mode);
        });
    }

    /// Remove the filter on `key`. No refetch.
    pub fn clear_filter(&self, key: &str) {
        let mode = self.inner.config.pagination;
        self.update(|core| {
            core.filters.remove(key);
            core.refresh_view(mode);
        });
    }

    /// Active filters.
    pub fn filters(&self) -> BTreeMap<String, String> {
        self.peek(|core| core.filters.clone())
    }

    // ── Forms ────────────────────────────────────────────────────────

    /// Open a blank create draft, replacing any open draft.
    pub fn open_create(&self) {
        let fields = self.inner.config.create_form.clone();
        self.update(|core| core.form = Some(FormDraft::create(fields)));
    }

    /// Open an edit draft pre-populated from `entity`.
    pub fn open_edit(&self, entity: &T) {
        let draft = FormDraft::edit(entity.id(), entity.form_fields());
        self.update(|core| core.form = Some(draft));
    }

    /// Change one field of the open draft. Returns `false` when no draft
    /// is open.
    pub fn set_field(&self, name: &str, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        self.update(|core| match core.form.as_mut() {
            Some(form) => {
                form.fields.set(name, value);
                true
            }
            None => {
                debug!(field = name, "Ignoring field edit with no open form");
                false
            }
        })
    }

    /// Change one field of the open draft from raw text input. A checkbox
    /// field takes `true`/`false`; everything else is kept as typed.
    /// Returns `false` when no draft is open.
    pub fn set_field_raw(&self, name: &str, raw: &str) -> bool {
        self.update(|core| match core.form.as_mut() {
            Some(form) => {
                form.fields.set_raw(name, raw);
                true
            }
            None => {
                debug!(field = name, "Ignoring field edit with no open form");
                false
            }
        })
    }

    /// Discard the open draft.
    pub fn close_form(&self) {
        self.update(|core| core.form = None);
    }

    /// Submit the open draft.
    ///
    /// Create drafts POST to the collection, edit drafts PUT to the
    /// entity, with the fields as a flat JSON object. On success the draft
    /// closes and the current page reloads. On failure the draft stays
    /// open with the user's input untouched and the message is returned.
    pub async fn submit(&self) -> Result<(), String> {
        let draft = self.update(|core| match core.form.as_mut() {
            None => Err("No form is open".to_string()),
            Some(form) if form.is_submitting => Err("A submit is already in progress".to_string()),
            Some(form) => {
                form.is_submitting = true;
                form.error = None;
                Ok(form.clone())
            }
        })?;

        let path = &self.inner.config.resource_path;
        let body = draft.fields.to_json();
        let result = match (draft.mode, draft.target_id) {
            (FormMode::Create, _) => self.inner.client.post(path, body).await,
            (FormMode::Edit, Some(id)) => self.inner.client.put(&format!("{path}/{id}"), body).await,
            (FormMode::Edit, None) => Err(AppError::internal("Edit draft has no target id")),
        };

        match result {
            Ok(_) => {
                let verb = match draft.mode {
                    FormMode::Create => "created",
                    FormMode::Edit => "updated",
                };
                info!(path = %path, id = ?draft.target_id, "{} {verb}", T::LABEL);
                let (page, term) = self.update(|core| {
                    if core.form.as_ref().is_some_and(|f| f.is_submitting) {
                        core.form = None;
                    }
                    core.notice = Some(Notice::success(format!("{} {verb}", T::LABEL)));
                    (core.list.page, core.list.search_term.clone())
                });
                self.load(page, &term).await;
                Ok(())
            }
            Err(err) => {
                warn!(path = %path, error = %err, "Submit failed");
                Err(self.update(|core| {
                    let message = core.record_write_failure(&err, SAVE_FAILED_MESSAGE);
                    if let Some(form) = core.form.as_mut().filter(|f| f.is_submitting) {
                        form.is_submitting = false;
                        form.error = Some(message.clone());
                    }
                    message
                }))
            }
        }
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Delete entity `id` after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent. The
    /// row disappears only through the reload that follows a success.
    pub async fn remove(&self, id: u64) -> Result<bool, String> {
        if !self.inner.confirm.confirm(&self.inner.config.delete_confirmation) {
            debug!(id, "Delete cancelled");
            return Ok(false);
        }

        let path = format!("{}/{id}", self.inner.config.resource_path);
        match self.inner.client.delete(&path).await {
            Ok(_) => {
                info!(path = %path, "{} deleted", T::LABEL);
                self.finish_write(Notice::success(format!("{} deleted", T::LABEL)))
                    .await;
                Ok(true)
            }
            Err(err) => {
                warn!(path = %path, error = %err, "Delete failed");
                Err(self.update(|core| core.record_write_failure(&err, DELETE_FAILED_MESSAGE)))
            }
        }
    }

    /// Run the per-row action `name` on entity `id` with `params` as the
    /// request body.
    ///
    /// The row must be among the currently loaded rows and pass the
    /// action's guard; otherwise nothing is sent and the refusal becomes
    /// an error notice. Returns `Ok(false)` when the user declines.
    pub async fn run_action(&self, name: &str, id: u64, params: FormFields) -> Result<bool, String> {
        let Some(action) = self.inner.config.find_action(name) else {
            return Err(self.refuse(format!("Unknown action '{name}'")));
        };

        let row = self.peek(|core| core.fetched.iter().find(|r| r.id() == id).cloned());
        let Some(row) = row else {
            return Err(self.refuse(format!("{} #{id} is not in the current list", T::LABEL)));
        };

        if !action.allows(&row) {
            return Err(self.refuse(action.refusal.clone()));
        }

        let missing = action.required_params.iter().find(|p| match params.get(p) {
            None => true,
            Some(value) => value.as_text().is_some_and(|t| t.trim().is_empty()),
        });
        if let Some(param) = missing {
            return Err(self.refuse(format!("Missing required value '{param}'")));
        }

        if let Some(ask) = &action.confirmation {
            if !self.inner.confirm.confirm(&ask(&row)) {
                debug!(action = name, id, "Action cancelled");
                return Ok(false);
            }
        }

        let path = format!("{}/{id}/{}", self.inner.config.resource_path, action.suffix);
        let request = ApiRequest::new(action.method, path.clone()).body(params.to_json());
        match self.inner.client.send(request).await {
            Ok(_) => {
                info!(action = name, path = %path, "Action succeeded");
                self.finish_write(Notice::success((action.success)(&row)))
                    .await;
                Ok(true)
            }
            Err(err) => {
                warn!(action = name, path = %path, error = %err, "Action failed");
                Err(self.update(|core| core.record_write_failure(&err, ACTION_FAILED_MESSAGE)))
            }
        }
    }

    /// Run the collection-level action `name` after confirmation.
    ///
    /// A `message` in the response body becomes the success notice.
    pub async fn run_bulk(&self, name: &str) -> Result<bool, String> {
        let Some(action) = self.inner.config.find_bulk_action(name) else {
            return Err(self.refuse(format!("Unknown action '{name}'")));
        };

        if !self.inner.confirm.confirm(&action.confirmation) {
            debug!(action = name, "Bulk action cancelled");
            return Ok(false);
        }

        let base = &self.inner.config.resource_path;
        let path = match &action.suffix {
            Some(suffix) => format!("{base}/{suffix}"),
            None => base.clone(),
        };
        match self.inner.client.send(ApiRequest::new(action.method, path.clone())).await {
            Ok(response) => {
                let message =
                    ApiErrorBody::message_from(&response.body).unwrap_or_else(|| action.success.clone());
                info!(action = name, path = %path, "Bulk action succeeded");
                self.finish_write(Notice::success(message)).await;
                Ok(true)
            }
            Err(err) => {
                warn!(action = name, path = %path, error = %err, "Bulk action failed");
                Err(self.update(|core| core.record_write_failure(&err, ACTION_FAILED_MESSAGE)))
            }
        }
    }

    /// Clear the current notice.
    pub fn dismiss_notice(&self) {
        self.update(|core| core.notice = None);
    }

    /// Post a success notice and reload the current page.
    async fn finish_write(&self, notice: Notice) {
        let (page, term) = self.update(|core| {
            core.notice = Some(notice);
            (core.list.page, core.list.search_term.clone())
        });
        self.load(page, &term).await;
    }

    /// Refuse a request locally with an error notice.
    fn refuse(&self, message: String) -> String {
        warn!(resource = T::LABEL, reason = %message, "Request refused");
        self.update(|core| core.notice = Some(Notice::error(message.clone())));
        message
    }
}
