//! Domain aggregates exposed by the roster repository layer.

pub mod member;
pub mod search;
pub mod stats;
pub mod team;
pub mod test_entity;
pub mod types;
