use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{Coffee, CoffeeError, CoffeeId, CoffeeRepository, Size};

/// In-memory coffee repository. All operations serialize behind the internal
/// mutex; each one is a single locked step, so id allocation and insertion
/// in `create` are atomic.
///
/// Ids are allocated from `next_id`, which only increases. Iterating the
/// `BTreeMap` yields ascending ids, which equals insertion order because ids
/// are monotonic.
pub struct InMemoryRepo {
    inner: Mutex<Inner>,
}

struct Inner {
    coffees: BTreeMap<CoffeeId, Coffee>,
    next_id: CoffeeId,
}

impl InMemoryRepo {
    /// An empty catalog; the first created record gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                coffees: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// The catalog seeded with the fixed startup menu (ids 1-3).
    pub fn with_seed_menu() -> Self {
        let mut coffees = BTreeMap::new();
        let mut next_id: CoffeeId = 1;
        for (name, size) in [
            ("Caffè Americano", Size::Grande),
            ("Caffè Latte", Size::Venti),
            ("Caffè Mocha", Size::Tall),
        ] {
            let id = next_id;
            next_id += 1;
            coffees.insert(id, Coffee::new(id, name.to_string(), size));
        }
        Self {
            inner: Mutex::new(Inner { coffees, next_id }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, CoffeeError> {
        self.inner
            .lock()
            .map_err(|_| CoffeeError::Repository("mutex poisoned".into()))
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl CoffeeRepository for InMemoryRepo {
    fn find_all(&self) -> Result<Vec<Coffee>, CoffeeError> {
        let inner = self.lock()?;
        Ok(inner.coffees.values().cloned().collect())
    }

    fn find_one(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeError> {
        let inner = self.lock()?;
        Ok(inner.coffees.get(&id).cloned())
    }

    fn create(&self, name: &str, size: Size) -> Result<Coffee, CoffeeError> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let coffee = Coffee::new(id, name.to_string(), size);
        inner.coffees.insert(id, coffee.clone());
        Ok(coffee)
    }

    fn update(&self, id: CoffeeId, name: &str, size: Size) -> Result<Coffee, CoffeeError> {
        let mut inner = self.lock()?;
        match inner.coffees.get_mut(&id) {
            Some(coffee) => {
                coffee.name = name.to_string();
                coffee.size = size;
                Ok(coffee.clone())
            }
            None => Err(CoffeeError::NotFound),
        }
    }

    fn delete(&self, id: CoffeeId) -> Result<Coffee, CoffeeError> {
        let mut inner = self.lock()?;
        inner.coffees.remove(&id).ok_or(CoffeeError::NotFound)
    }
}
