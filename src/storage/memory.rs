// ============================================================================
// Stockage : mémoire
// ============================================================================
// Garde le document encodé (et non les structures) pour que les tests passent
// par le même codec que le stockage fichier.
// ============================================================================

use crate::error::StorageError;
use crate::models::Person;
use crate::storage::{schema, LedgerStore};

/// Stockage en mémoire du registre
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stockage pré-rempli avec un document brut (format courant ou navigateur)
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            saves: 0,
        }
    }

    /// Dernier document sauvegardé
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Nombre d'appels à `save` réussis
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Person>, StorageError> {
        match &self.document {
            Some(text) => schema::decode(text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, people: &[Person]) -> Result<(), StorageError> {
        self.document = Some(schema::encode(people)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonId;

    #[test]
    fn test_empty_store_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let people = vec![Person::new(PersonId::from("a"), "Ana".to_string(), 3.0)];

        store.save(&people).unwrap();

        assert_eq!(store.load().unwrap(), people);
        assert_eq!(store.save_count(), 1);
        assert!(store.document().unwrap().contains("\"version\": 1"));
    }
}
