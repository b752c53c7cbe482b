//! # keel-core
//! Foundation types and collaborator interfaces for the Keel checkpoint subsystem.

pub mod block_index;
pub mod constants;
pub mod error;
pub mod types;
