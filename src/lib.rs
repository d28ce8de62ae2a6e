//! Member/team roster persistence with conditional, paginated search.
//!
//! The data layer (`domain`, `models`, `schema`, `repository`) is built on
//! Diesel over SQLite. [`repository::MemberSearch`] is the entry point for
//! the filtered `members LEFT JOIN teams` search.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
