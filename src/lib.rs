//! docdesk: a browser front-end for a remote document-records API.
//!
//! The pure client logic (stores, row editor, page state machines, API
//! client) lives in [`store`], [`pages`] and [`api`]. The actix-web shell in
//! [`handlers`] and [`routes`] renders it as HTML, one in-memory
//! [`workspace::Workspace`] per browser session.

pub mod alert;
pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod sanitize;
pub mod store;
pub mod templates_structs;
pub mod workspace;
