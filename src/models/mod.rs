// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod person;      // Personne + identifiant
pub mod summary;     // Totaux dérivés
pub mod transaction; // Recharge / retrait

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use daletracker::models::person::Person;
// On peut faire : use daletracker::models::Person;
pub use person::{Person, PersonId};
pub use summary::{compute_summary, Summary};
pub use transaction::{Transaction, TransactionKind};
