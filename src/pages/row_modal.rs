use uuid::Uuid;

use crate::alert::Alert;
use crate::errors::ValidationError;
use crate::models::{DocumentRow, RowField, dates};
use crate::sanitize::sanitize_input;
use crate::store::TableState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit,
}

/// Draft editor for a single row.
///
/// Field edits are sanitized as they arrive; validation happens only when
/// the draft is saved.
#[derive(Debug, Clone)]
pub struct RowEditModal {
    mode: ModalMode,
    draft: DocumentRow,
    alert: Alert,
}

impl Default for RowEditModal {
    fn default() -> Self {
        Self {
            mode: ModalMode::Closed,
            draft: DocumentRow::empty(new_id()),
            alert: Alert::default(),
        }
    }
}

impl RowEditModal {
    /// Open with empty fields and an id not used by any row in `table`.
    pub fn open_for_create(&mut self, table: &TableState) {
        let mut id = new_id();
        while table.contains(&id) {
            id = new_id();
        }
        self.draft = DocumentRow::empty(id);
        self.alert.dismiss();
        self.mode = ModalMode::OpenForCreate;
    }

    pub fn open_for_edit(&mut self, row: &DocumentRow) {
        self.draft = row.clone();
        self.alert.dismiss();
        self.mode = ModalMode::OpenForEdit;
    }

    /// Apply one field edit. Ignored while closed.
    ///
    /// Date fields that parse are stored ISO-8601 encoded; anything else is
    /// kept as typed and rejected by [`RowEditModal::save`].
    pub fn edit_field(&mut self, field: RowField, raw: &str) {
        if self.mode == ModalMode::Closed {
            return;
        }
        let clean = sanitize_input(raw);
        let value = if field.is_date() {
            match dates::normalize(&clean) {
                Some(iso) => iso,
                None => {
                    log::debug!("Unparseable {} kept for save-time check", field.key());
                    clean
                }
            }
        } else {
            clean
        };
        self.draft.set(field, value);
    }

    /// Validate and emit the draft, then close with a fresh empty draft.
    /// On failure the modal stays open and raises its alert.
    pub fn save(&mut self) -> Result<DocumentRow, ValidationError> {
        if let Err(e) = validate(&self.draft) {
            self.alert.raise(e.to_string());
            return Err(e);
        }
        let row = std::mem::replace(&mut self.draft, DocumentRow::empty(new_id()));
        self.mode = ModalMode::Closed;
        Ok(row)
    }

    pub fn cancel(&mut self) {
        self.draft = DocumentRow::empty(new_id());
        self.alert.dismiss();
        self.mode = ModalMode::Closed;
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    pub fn draft(&self) -> &DocumentRow {
        &self.draft
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    /// What a form input shows for `field`; dates as `YYYY-MM-DD`.
    pub fn form_value(&self, field: RowField) -> String {
        let raw = self.draft.get(field);
        if field.is_date() {
            dates::display_day(raw)
        } else {
            raw.to_string()
        }
    }
}

/// Checks run in order: all fields present, then both dates valid.
pub fn validate(row: &DocumentRow) -> Result<(), ValidationError> {
    if !row.is_complete() {
        return Err(ValidationError::AllFieldsRequired);
    }
    if !dates::is_valid(&row.company_sig_date) || !dates::is_valid(&row.employee_sig_date) {
        return Err(ValidationError::InvalidDate);
    }
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
