//! Database models shared across the roster repository.

pub mod config;
pub mod member;
pub mod team;
pub mod test_entity;
