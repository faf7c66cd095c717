// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées du modèle (LedgerError) et du stockage (StorageError)
//
// CONCEPT RUST : thiserror
// - #[derive(thiserror::Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère l'implémentation de Display
// - Le binaire enveloppe ces erreurs dans anyhow::Error avec du contexte
// ============================================================================

use std::path::PathBuf;

use crate::models::PersonId;

/// Rejet d'une opération du registre
///
/// Aucune de ces erreurs n'est fatale : l'opération demandée est refusée
/// et le registre reste intact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// Montant non fini, nul ou négatif (ou solde négatif)
    #[error("Montant invalide : {0}")]
    InvalidAmount(String),

    /// Nom vide après suppression des espaces
    #[error("Le nom ne peut pas être vide")]
    InvalidName,

    /// Aucune personne ne porte cet identifiant
    #[error("Personne introuvable : {0}")]
    PersonNotFound(PersonId),
}

/// Erreur de lecture / écriture des données persistées
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Erreur d'entrée/sortie sur le fichier de données
    #[error("Erreur d'accès au fichier {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document persisté mal formé (JSON invalide, champ manquant, valeur incohérente)
    #[error("Données persistées invalides : {0}")]
    Parse(String),

    /// Deux personnes portent le même identifiant
    #[error("Identifiant en double : {0}")]
    DuplicateId(PersonId),

    /// Version de schéma inconnue
    #[error("Version de schéma non supportée : {0}")]
    UnsupportedVersion(u64),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Parse(err.to_string())
    }
}
