pub mod auth;
pub mod table;

pub use auth::AuthState;
pub use table::TableState;
