//! Domain library for the Coffee Catalog.
//!
//! This crate is dependency-light (serde derives for the API layer only) and
//! holds the domain types, ports (traits), and error definitions. Keep
//! adapters and IO concerns out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Identifier of a coffee record. Allocated monotonically by the repository;
/// never reused within a process lifetime, even after a delete.
pub type CoffeeId = u64;

/// Cup size of a coffee. The member set is fixed by the external schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Short,
    Tall,
    Grande,
    Venti,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Short => "SHORT",
            Size::Tall => "TALL",
            Size::Grande => "GRANDE",
            Size::Venti => "VENTI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SHORT" => Some(Size::Short),
            "TALL" => Some(Size::Tall),
            "GRANDE" => Some(Size::Grande),
            "VENTI" => Some(Size::Venti),
            _ => None,
        }
    }
}

/// A coffee record as stored in the catalog.
///
/// Value record: `id` is assigned once at creation and immutable afterwards.
/// Updates replace `name`/`size` wholesale under the same id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Coffee {
    pub id: CoffeeId,
    pub name: String,
    pub size: Size,
}

impl Coffee {
    pub fn new(id: CoffeeId, name: String, size: Size) -> Self {
        Self { id, name, size }
    }
}

/// Repository port for the coffee catalog.
///
/// Implementations own id allocation: `create` assigns the next unused id
/// (tracked counter, only increases). `update` and `delete` fail with
/// [`CoffeeError::NotFound`] when the id does not exist; a failed update
/// creates nothing.
pub trait CoffeeRepository: Send + Sync {
    /// All current records in insertion order.
    fn find_all(&self) -> Result<Vec<Coffee>, CoffeeError>;
    /// The record with the given id, if any.
    fn find_one(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeError>;
    /// Allocate a fresh id, append a new record, and return it.
    fn create(&self, name: &str, size: Size) -> Result<Coffee, CoffeeError>;
    /// Replace name/size of the record with the given id, keeping the id.
    fn update(&self, id: CoffeeId, name: &str, size: Size) -> Result<Coffee, CoffeeError>;
    /// Remove the record with the given id and return it.
    fn delete(&self, id: CoffeeId) -> Result<Coffee, CoffeeError>;
}

/// Core domain errors (no external error crates to keep deps minimal).
#[derive(Debug)]
pub enum CoffeeError {
    InvalidName(String),
    InvalidSize(String),
    NotFound,
    Repository(String),
}

impl Display for CoffeeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoffeeError::InvalidName(msg) => write!(f, "invalid name: {}", msg),
            CoffeeError::InvalidSize(msg) => write!(f, "invalid size: {}", msg),
            CoffeeError::NotFound => write!(f, "not found"),
            CoffeeError::Repository(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

impl Error for CoffeeError {}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    // Use env! at compile time; fallback literals kept minimal.
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} — domain library loaded", pkg, ver)
}

// Re-export modules when added
pub mod adapters;
pub mod service;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_parse_is_case_insensitive() {
        assert_eq!(Size::parse("GRANDE"), Some(Size::Grande));
        assert_eq!(Size::parse("grande"), Some(Size::Grande));
        assert_eq!(Size::parse("Venti"), Some(Size::Venti));
        assert_eq!(Size::parse("demitasse"), None);
    }

    #[test]
    fn size_round_trips_through_as_str() {
        for size in [Size::Short, Size::Tall, Size::Grande, Size::Venti] {
            assert_eq!(Size::parse(size.as_str()), Some(size));
        }
    }

    #[test]
    fn coffee_keeps_its_fields() {
        let c = Coffee::new(1, "Caffè Americano".to_string(), Size::Grande);
        assert_eq!(c.id, 1);
        assert_eq!(c.name, "Caffè Americano");
        assert_eq!(c.size, Size::Grande);
    }
}
