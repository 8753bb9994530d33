//! taskdesk - Spreadsheet-backed task tracker library
//!
//! This library provides the core functionality behind the taskdesk server:
//! a small-team task tracker whose entire state lives in two flat table
//! files, rewritten in full on every mutation.
//!
//! # Core Concepts
//!
//! - **Variants**: three historical deployments (A/B/C) differing in login
//!   method, status vocabulary, extra columns, and permission quirks; their
//!   differences are preserved, not merged
//! - **Tables**: column-ordered files of string cells; unknown columns
//!   survive every read-modify-write cycle
//! - **Full overwrite**: every mutation rewrites the whole table, so the
//!   last writer wins across concurrent sessions (a kept, tested property)
//! - **Sessions**: the only server state beyond the files is `{email, role}`
//!   per logged-in token
//!
//! # Module Organization
//!
//! - `api`: axum routes serving the browser front end
//! - `auth`: per-variant login plus the single authorization gate
//! - `config`: configuration loading from `taskdesk.toml`
//! - `error`: error types and result aliases
//! - `export`: CSV snapshot of the visible task set
//! - `lock`: file locking and atomic table writes
//! - `model`: typed task/user/session records projected from table rows
//! - `ops`: task mutations (create, status, reassign, reminder, bulk grid)
//! - `report`: dashboard aggregations (summary, aging, performance)
//! - `store`: full-file task and user stores
//! - `table`: the column-ordered table document itself
//! - `variant`: the A/B/C deployment rule sets
//! - `view`: role-based visibility filtering

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod lock;
pub mod model;
pub mod ops;
pub mod report;
pub mod store;
pub mod table;
pub mod variant;
pub mod view;

pub use error::{Error, Result};
