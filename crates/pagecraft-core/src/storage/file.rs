//! File-based storage implementation for native platforms.

use super::{BoxFuture, SharedDesign, Storage, StorageError, StorageResult};
use std::fs;
use std::path::PathBuf;

/// File-based storage for native platforms.
///
/// Stores each shared design as a JSON file in a directory.
pub struct FileStorage {
    /// Base directory for design storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/pagecraft/designs/`
    /// On Windows: `%LOCALAPPDATA%\pagecraft\designs\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("pagecraft").join("designs"))
    }

    fn design_path(&self, id: &str) -> PathBuf {
        // Share IDs end up in file names.
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, design: &SharedDesign) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.design_path(&design.id);
        let json = design.to_json();

        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::debug!("Wrote shared design to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SharedDesign>> {
        let path = self.design_path(id);
        let id_owned = id.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id_owned));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            SharedDesign::from_json(&json).map_err(|e| {
                log::warn!("Unreadable shared design {}: {}", path.display(), e);
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.design_path(id);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let ids = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .collect();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.design_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::element::{Element, ElementKind};
    use crate::storage::block_on;
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_design() -> SharedDesign {
        let doc = Document::from_parts(
            vec![Element::new(ElementKind::Star, Point::new(40.0, 60.0))],
            "#f8f9fa",
        );
        SharedDesign::from_document(&doc)
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let design = sample_design();

        block_on(storage.save(&design)).unwrap();
        let loaded = block_on(storage.load(&design.id)).unwrap();

        assert_eq!(loaded, design);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let a = sample_design();
        let b = sample_design();
        block_on(storage.save(&a)).unwrap();
        block_on(storage.save(&b)).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a.id));
        assert!(list.contains(&b.id));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let design = sample_design();

        block_on(storage.save(&design)).unwrap();
        assert!(block_on(storage.exists(&design.id)).unwrap());

        block_on(storage.delete(&design.id)).unwrap();
        assert!(!block_on(storage.exists(&design.id)).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let mut design = sample_design();
        design.id = "shared/design:with*special".to_string();

        block_on(storage.save(&design)).unwrap();

        let loaded = block_on(storage.load("shared/design:with*special")).unwrap();
        assert_eq!(loaded.elements, design.elements);
    }
}
