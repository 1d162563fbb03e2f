use crate::Result;
use crate::backend::Backend;
use std::any::Any;
use std::collections::HashMap;
use std::sync::RwLock;

/// A simple in-memory backend implementation using a `HashMap` for storage.
///
/// This backend is suitable for testing, development, or scenarios where
/// data persistence is not required. Nothing survives the process; use
/// [`OnDisk`] when collections must be restored on the next startup.
///
/// [`OnDisk`]: crate::backend::OnDisk
#[derive(Debug)]
pub struct InMemory {
    /// Value storage with read-write lock for shared access
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemory {
    /// Creates a new, empty `InMemory` backend.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a vector containing all keys currently stored in the backend.
    pub fn keys(&self) -> Vec<String> {
        let values = self.values.read().unwrap();
        values.keys().cloned().collect()
    }
}

impl Backend for InMemory {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.read().unwrap();
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), bytes);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.remove(key);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
