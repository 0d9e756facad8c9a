//! In-memory storage implementation.

use super::{BoxFuture, SharedDesign, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sharing.
#[derive(Default)]
pub struct MemoryStorage {
    designs: RwLock<HashMap<String, SharedDesign>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, design: &SharedDesign) -> BoxFuture<'_, StorageResult<()>> {
        let design = design.clone();
        Box::pin(async move {
            let mut designs = self.designs.write().map_err(lock_error)?;
            designs.insert(design.id.clone(), design);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SharedDesign>> {
        let id = id.to_string();
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            designs.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut designs = self.designs.write().map_err(lock_error)?;
            designs.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            Ok(designs.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            Ok(designs.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let design = SharedDesign::from_document(&Document::new());

        block_on(storage.save(&design)).unwrap();
        let loaded = block_on(storage.load(&design.id)).unwrap();

        assert_eq!(loaded, design);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(id)) if id == "nonexistent"));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let design = SharedDesign::from_document(&Document::new());

        assert!(!block_on(storage.exists(&design.id)).unwrap());
        block_on(storage.save(&design)).unwrap();
        assert!(block_on(storage.exists(&design.id)).unwrap());
        block_on(storage.delete(&design.id)).unwrap();
        assert!(!block_on(storage.exists(&design.id)).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let a = SharedDesign::from_document(&Document::new());
        let b = SharedDesign::from_document(&Document::new());
        block_on(storage.save(&a)).unwrap();
        block_on(storage.save(&b)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a.id));
        assert!(list.contains(&b.id));
    }
}
