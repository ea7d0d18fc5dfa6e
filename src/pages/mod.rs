pub mod auth_page;
pub mod row_modal;
pub mod table_page;

pub use auth_page::{AuthIntent, AuthPage, LoginCall};
pub use row_modal::{ModalMode, RowEditModal};
pub use table_page::{CallOutcome, PageState, PendingCall, TableIntent, TablePage};
