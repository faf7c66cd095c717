// ============================================================================
// DaleTracker - Library
// ============================================================================
// Suivi des soldes Dale de plusieurs personnes : recharges, retraits et gains
// ============================================================================

pub mod app;        // État de l'interface
pub mod commands;   // Commandes envoyées au registre
pub mod config;     // Emplacements des données et des logs
pub mod error;      // Erreurs typées
pub mod input;      // Conversion de la saisie utilisateur
pub mod ledger;     // Le registre (modèle)
pub mod models;     // Structures de données
pub mod repository; // Registre + stockage + flush
pub mod storage;    // Persistance JSON
pub mod ui;         // Interface utilisateur

pub use commands::{Command, Outcome};
pub use error::{LedgerError, StorageError};
pub use ledger::Ledger;
pub use repository::LedgerRepository;
