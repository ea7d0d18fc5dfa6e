use crate::alert::Alert;
use crate::api::{ApiClient, Transport};
use crate::errors::ApiError;
use crate::models::{DocumentRow, RowField};
use crate::store::{AuthState, TableState};

use super::row_modal::{ModalMode, RowEditModal};

pub const SAVE_FAILED: &str = "Failed to save data!";
pub const DELETE_FAILED: &str = "Failed to delete the row";
pub const LOAD_FAILED: &str = "Failed to load the table";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Loading,
    Ready,
    LoadFailed(String),
}

/// User actions on the table page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    RowCreateOpened,
    RowEditOpened { id: String },
    FieldEdited { field: RowField, value: String },
    ModalCancelled,
    RowSaveRequested,
    RowDeleteRequested { id: String },
    DeleteConfirmed,
    DeleteCancelled,
    ReloadRequested,
}

/// A remote call the page has committed to, carrying everything it needs so
/// it can run without access to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCall {
    Load { token: String },
    Create { token: String, row: DocumentRow },
    Update { token: String, row: DocumentRow },
    Delete { token: String, id: String },
}

/// Result of a [`PendingCall`], handed back to [`TablePage::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Loaded(Result<Vec<DocumentRow>, ApiError>),
    Saved { row: DocumentRow, editing: bool, result: Result<(), ApiError> },
    Deleted { id: String, result: Result<(), ApiError> },
}

impl PendingCall {
    pub async fn run<T: Transport>(self, api: &ApiClient<T>) -> CallOutcome {
        match self {
            PendingCall::Load { token } => CallOutcome::Loaded(api.list_rows(&token).await),
            PendingCall::Create { token, row } => {
                let result = api.create_row(&token, &row).await.map(|_| ());
                CallOutcome::Saved { row, editing: false, result }
            }
            PendingCall::Update { token, row } => {
                let result = api.update_row(&token, &row.id, &row).await.map(|_| ());
                CallOutcome::Saved { row, editing: true, result }
            }
            PendingCall::Delete { token, id } => {
                let result = api.delete_row(&token, &id).await.map(|_| ());
                CallOutcome::Deleted { id, result }
            }
        }
    }
}

/// Orchestrates the table: initial load, the edit modal, delete
/// confirmation and reconciliation of [`TableState`] after remote calls.
///
/// Remote work is split in three steps so callers sharing the page need not
/// hold it across the network: [`TablePage::begin`] (or
/// [`TablePage::begin_load`]) applies the local effect and returns the call,
/// [`PendingCall::run`] performs it, [`TablePage::finish`] reconciles.
/// [`TablePage::handle`] and [`TablePage::load`] chain all three.
#[derive(Debug, Clone, Default)]
pub struct TablePage {
    state: PageState,
    load_in_flight: bool,
    mutating: bool,
    modal: RowEditModal,
    pending_delete: Option<String>,
    alert: Alert,
}

impl TablePage {
    /// Fetch all rows. Runs only while in `Loading`.
    pub async fn load<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        auth: &AuthState,
        table: &mut TableState,
    ) {
        if let Some(call) = self.begin_load(auth) {
            let outcome = call.run(api).await;
            self.finish(outcome, table);
        }
    }

    pub async fn handle<T: Transport>(
        &mut self,
        intent: TableIntent,
        api: &ApiClient<T>,
        auth: &AuthState,
        table: &mut TableState,
    ) {
        if let Some(call) = self.begin(intent, auth, table) {
            let outcome = call.run(api).await;
            self.finish(outcome, table);
        }
    }

    /// Start the row fetch if the page is `Loading` and no fetch is running.
    pub fn begin_load(&mut self, auth: &AuthState) -> Option<PendingCall> {
        if self.state != PageState::Loading || self.load_in_flight {
            return None;
        }
        match auth.token() {
            Some(token) => {
                self.load_in_flight = true;
                Some(PendingCall::Load { token: token.to_string() })
            }
            None => {
                log::warn!("Row load attempted without a session token");
                self.state = PageState::LoadFailed(LOAD_FAILED.to_string());
                None
            }
        }
    }

    /// Apply the local part of `intent`; returns the remote call it needs, if any.
    pub fn begin(
        &mut self,
        intent: TableIntent,
        auth: &AuthState,
        table: &TableState,
    ) -> Option<PendingCall> {
        match intent {
            TableIntent::RowCreateOpened => self.modal.open_for_create(table),
            TableIntent::RowEditOpened { id } => match table.get(&id) {
                Some(row) => self.modal.open_for_edit(row),
                None => log::debug!("Edit requested for unknown row {id}"),
            },
            TableIntent::FieldEdited { field, value } => self.modal.edit_field(field, &value),
            TableIntent::ModalCancelled => self.modal.cancel(),
            TableIntent::RowSaveRequested => return self.begin_save(auth),
            TableIntent::RowDeleteRequested { id } => self.pending_delete = Some(id),
            TableIntent::DeleteCancelled => self.pending_delete = None,
            TableIntent::DeleteConfirmed => return self.begin_delete(auth),
            TableIntent::ReloadRequested => {
                if !self.load_in_flight {
                    self.state = PageState::Loading;
                }
                return self.begin_load(auth);
            }
        }
        None
    }

    fn begin_save(&mut self, auth: &AuthState) -> Option<PendingCall> {
        if !self.modal.is_open() {
            return None;
        }
        if self.mutating {
            log::debug!("Save ignored while another change is in flight");
            return None;
        }
        let editing = self.modal.mode() == ModalMode::OpenForEdit;
        let row = self.modal.save().ok()?;
        let Some(token) = auth.token() else {
            log::warn!("Save attempted without a session token");
            self.alert.raise(SAVE_FAILED);
            return None;
        };

        self.mutating = true;
        let token = token.to_string();
        Some(if editing {
            PendingCall::Update { token, row }
        } else {
            PendingCall::Create { token, row }
        })
    }

    fn begin_delete(&mut self, auth: &AuthState) -> Option<PendingCall> {
        if self.mutating {
            log::debug!("Delete ignored while another change is in flight");
            return None;
        }
        let id = self.pending_delete.take()?;
        let Some(token) = auth.token() else {
            log::warn!("Delete attempted without a session token");
            self.alert.raise(DELETE_FAILED);
            return None;
        };
        self.mutating = true;
        Some(PendingCall::Delete { token: token.to_string(), id })
    }

    /// Reconcile the page and `table` with a finished call. Outcomes the
    /// page is not waiting for (e.g. after a logout reset) are dropped.
    pub fn finish(&mut self, outcome: CallOutcome, table: &mut TableState) {
        match outcome {
            CallOutcome::Loaded(result) => {
                if !self.load_in_flight {
                    log::debug!("Dropping row load nobody is waiting for");
                    return;
                }
                self.load_in_flight = false;
                match result {
                    Ok(rows) => {
                        log::info!("Loaded {} rows", rows.len());
                        table.replace_all(rows);
                        self.state = PageState::Ready;
                    }
                    Err(e) => {
                        log::warn!("Initial row load failed: {e}");
                        self.state = PageState::LoadFailed(LOAD_FAILED.to_string());
                    }
                }
            }
            CallOutcome::Saved { row, editing, result } => {
                if !self.mutating {
                    log::debug!("Dropping save of row {} nobody is waiting for", row.id);
                    return;
                }
                self.mutating = false;
                match result {
                    Ok(()) if editing => {
                        log::info!("Updated row {}", row.id);
                        table.replace_one(row);
                    }
                    Ok(()) => {
                        log::info!("Created row {}", row.id);
                        if let Err(e) = table.insert(row) {
                            log::error!("Created row could not be added locally: {e}");
                        }
                    }
                    Err(e) => {
                        log::warn!("Saving row {} failed: {e}", row.id);
                        self.alert.raise(SAVE_FAILED);
                    }
                }
            }
            CallOutcome::Deleted { id, result } => {
                if !self.mutating {
                    log::debug!("Dropping delete of row {id} nobody is waiting for");
                    return;
                }
                self.mutating = false;
                match result {
                    Ok(()) => {
                        log::info!("Deleted row {id}");
                        table.remove(&id);
                        self.alert.dismiss();
                    }
                    Err(e) => {
                        log::warn!("Deleting row {id} failed: {e}");
                        let message = match e {
                            ApiError::Http { .. } => e.to_string(),
                            _ => DELETE_FAILED.to_string(),
                        };
                        self.alert.raise(message);
                    }
                }
            }
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_mutating(&self) -> bool {
        self.mutating
    }

    pub fn modal(&self) -> &RowEditModal {
        &self.modal
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }
}
