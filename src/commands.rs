// ============================================================================
// Commandes du registre
// ============================================================================
// L'interface ne modifie jamais le registre directement : elle construit une
// Command, la confie au LedgerRepository et reçoit un Outcome ou une erreur.
//
// CONCEPT RUST : Command pattern avec enums
// - Chaque variant transporte exactement les données dont il a besoin
// - Le match exhaustif dans le repository garantit qu'aucune commande n'est oubliée
// ============================================================================

use crate::models::{Person, PersonId, Transaction, TransactionKind};

/// Opérations de modification demandées par l'interface
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Ajouter une personne avec un solde Dale initial
    AddPerson { name: String, initial_balance: f64 },

    /// Enregistrer une recharge ou un retrait
    RecordTransaction {
        person_id: PersonId,
        kind: TransactionKind,
        amount: f64,
    },

    /// Réconcilier le solde Dale avec le vrai compte
    SetWalletBalance { person_id: PersonId, new_balance: f64 },
}

/// Résultat d'une commande acceptée
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    PersonAdded(Person),
    TransactionRecorded {
        person_id: PersonId,
        transaction: Transaction,
    },
    WalletBalanceSet { person_id: PersonId, balance: f64 },
}

impl Outcome {
    /// Personne concernée par la commande
    pub fn person_id(&self) -> &PersonId {
        match self {
            Outcome::PersonAdded(person) => person.id(),
            Outcome::TransactionRecorded { person_id, .. } => person_id,
            Outcome::WalletBalanceSet { person_id, .. } => person_id,
        }
    }
}
