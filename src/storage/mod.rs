// ============================================================================
// Module : storage
// ============================================================================
// Persistance du registre : on charge TOUT, on sauvegarde TOUT
//
// CONCEPT RUST : Trait comme frontière
// - LedgerStore décrit le contrat (load / save)
// - JsonFileStore : fichier JSON sur disque (application)
// - MemoryStore : document gardé en mémoire (tests, sessions éphémères)
// ============================================================================

pub mod json_file; // Stockage fichier
pub mod memory;    // Stockage mémoire
pub mod schema;    // Format persisté versionné

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;
use crate::models::Person;

/// Contrat de persistance du registre
///
/// `load` renvoie une collection vide quand rien n'a encore été sauvegardé.
/// `save` remplace l'intégralité des données persistées.
pub trait LedgerStore {
    fn load(&self) -> Result<Vec<Person>, StorageError>;

    fn save(&mut self, people: &[Person]) -> Result<(), StorageError>;
}
