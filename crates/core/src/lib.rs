//! Core types for gremio: the partitioned table row model, the generic
//! entity repository contract, and the curriculum entity kinds.
//!
//! This crate is pure: no I/O, no HTTP types. Storage backends and the
//! service surface live in the `gremio` crate.

pub mod curriculum;
pub mod table;
