use crate::validate::validate_name;
use crate::{Coffee, CoffeeError, CoffeeId, CoffeeRepository, Size};

/// Application service orchestrating catalog reads and mutations.
///
/// It remains generic over the repository port and adds input validation in
/// front of the mutating operations. Lookups pass straight through. This
/// keeps the domain testable without external dependencies.
pub struct CoffeeService<R: CoffeeRepository> {
    repo: R,
}

impl<R: CoffeeRepository> CoffeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All records in insertion order.
    pub fn find_all(&self) -> Result<Vec<Coffee>, CoffeeError> {
        self.repo.find_all()
    }

    /// Look up a single record by id.
    pub fn find_one(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeError> {
        self.repo.find_one(id)
    }

    /// Create a new record under a freshly allocated id.
    pub fn create(&self, name: &str, size: Size) -> Result<Coffee, CoffeeError> {
        validate_name(name)?;
        self.repo.create(name, size)
    }

    /// Replace name/size of an existing record; the id never changes.
    pub fn update(&self, id: CoffeeId, name: &str, size: Size) -> Result<Coffee, CoffeeError> {
        validate_name(name)?;
        self.repo.update(id, name, size)
    }

    /// Remove a record and return it.
    pub fn delete(&self, id: CoffeeId) -> Result<Coffee, CoffeeError> {
        self.repo.delete(id)
    }
}
