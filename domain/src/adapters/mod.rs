//! In-process adapters that live inside the domain crate for convenience.
//!
//! The in-memory repository is the only storage backend: the catalog is
//! volatile by design and all records vanish on process restart.

pub mod memory_repo;
