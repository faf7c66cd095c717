// ============================================================================
// Stockage : fichier JSON
// ============================================================================
// Un seul fichier contient tout le registre (people.json)
//
// Écriture : fichier temporaire voisin puis rename, pour ne jamais laisser un
// document à moitié écrit à la place de l'ancien.
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::StorageError;
use crate::models::Person;
use crate::storage::{schema, LedgerStore};

/// Stockage du registre dans un fichier JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Crée un stockage pointant vers `path` (le fichier peut ne pas exister)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "people.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl LedgerStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<Person>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Premier lancement : aucun registre sauvegardé
                info!("No data file yet, starting with an empty ledger");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        let people = schema::decode(&text)?;
        info!(people = people.len(), "Ledger loaded from disk");
        Ok(people)
    }

    #[instrument(skip(self, people), fields(path = %self.path.display(), people = people.len()))]
    fn save(&mut self, people: &[Person]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }

        let text = schema::encode(people)?;
        let temp = self.temp_path();

        fs::write(&temp, text).map_err(|e| Self::io_error(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            // Pas de .tmp orphelin à côté du fichier de données
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!(error = %cleanup, temp = %temp.display(), "Failed to remove temp file");
            }
            return Err(Self::io_error(&self.path, e));
        }

        debug!("Ledger written to disk");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonId, Transaction, TransactionKind};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("people.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("people.json");
        let mut store = JsonFileStore::new(&path);

        let people = vec![Person::restore(
            PersonId::from("a"),
            "Ana".to_string(),
            12.5,
            vec![Transaction::new(TransactionKind::Recharge, 12.5, Utc::now())],
        )];

        store.save(&people).unwrap();
        assert!(path.exists());
        assert!(!store.temp_path().exists());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), people);
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("people.json"));

        store
            .save(&[Person::new(PersonId::from("a"), "Ana".to_string(), 1.0)])
            .unwrap();
        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        // Un répertoire non vide à la place du fichier : rename échoue
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = JsonFileStore::new(&path);
        let result = store.save(&[Person::new(PersonId::from("a"), "Ana".to_string(), 1.0)]);

        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(!store.temp_path().exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_corrupted_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, "{ broken").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::Parse(_))));
    }
}
