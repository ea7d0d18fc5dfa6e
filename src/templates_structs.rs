// Template context structures for the askama pages.

use std::time::Instant;

use askama::Template;

use crate::alert::Alert;
use crate::models::{DocumentRow, RowField};
use crate::pages::{AuthPage, ModalMode, PageState, RowEditModal, TablePage};
use crate::store::TableState;

/// A raised alert as the page shows it: the message plus how long it stays
/// fully visible before the stylesheet fades it out.
pub struct AlertView {
    pub message: String,
    pub visible_ms: u64,
}

impl AlertView {
    pub fn from_alert(alert: &Alert, now: Instant) -> Option<Self> {
        alert.message_at(now).map(|message| AlertView {
            message: message.to_string(),
            visible_ms: alert.visible_ms_left_at(now),
        })
    }
}

pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
}

pub struct ModalView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
    pub alert: Option<AlertView>,
}

impl ModalView {
    pub fn from_modal(modal: &RowEditModal, now: Instant) -> Option<Self> {
        let (title, submit_label) = match modal.mode() {
            ModalMode::Closed => return None,
            ModalMode::OpenForCreate => ("Add a new row", "Add"),
            ModalMode::OpenForEdit => ("Edit row", "Save"),
        };
        let fields = RowField::ALL
            .into_iter()
            .map(|field| FieldView {
                key: field.key(),
                label: field.label(),
                input_type: if field.is_date() { "date" } else { "text" },
                value: modal.form_value(field),
            })
            .collect();
        Some(ModalView {
            title,
            submit_label,
            fields,
            alert: AlertView::from_alert(modal.alert(), now),
        })
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub csrf_token: String,
    pub username: String,
    pub username_missing: bool,
    pub password_missing: bool,
    /// A login request for this session is still waiting on the API.
    pub loading: bool,
    pub alert: Option<AlertView>,
}

impl LoginTemplate {
    pub fn build(page: &AuthPage, csrf_token: String, now: Instant) -> Self {
        let alert = AlertView::from_alert(page.alert(), now);
        // Field hints only accompany a live error.
        let show_hints = alert.is_some();
        LoginTemplate {
            csrf_token,
            username: page.username().to_string(),
            username_missing: show_hints && page.username_missing(),
            password_missing: show_hints && page.password_missing(),
            loading: page.is_loading(),
            alert,
        }
    }
}

#[derive(Template)]
#[template(path = "table.html")]
pub struct TableTemplate {
    pub csrf_token: String,
    pub loading: bool,
    pub load_error: Option<String>,
    pub busy: bool,
    pub rows: Vec<DocumentRow>,
    pub modal: Option<ModalView>,
    pub pending_delete: Option<String>,
    pub alert: Option<AlertView>,
}

impl TableTemplate {
    pub fn build(page: &TablePage, table: &TableState, csrf_token: String, now: Instant) -> Self {
        let (loading, load_error) = match page.state() {
            PageState::Loading => (true, None),
            PageState::Ready => (false, None),
            PageState::LoadFailed(msg) => (false, Some(msg.clone())),
        };
        TableTemplate {
            csrf_token,
            loading,
            load_error,
            busy: page.is_mutating(),
            rows: table.rows().to_vec(),
            modal: ModalView::from_modal(page.modal(), now),
            pending_delete: page.pending_delete().map(str::to_string),
            alert: AlertView::from_alert(page.alert(), now),
        }
    }
}
