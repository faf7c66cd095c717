// ============================================================================
// Structure : Person
// ============================================================================
// Une personne suivie : son solde Dale et l'historique de ses mouvements
//
// CONCEPTS RUST :
// 1. Newtype PersonId : un String qu'on ne peut pas confondre avec un nom
// 2. Composition : Person possède son Vec<Transaction>
// 3. Champs en lecture seule depuis l'extérieur : seules les méthodes
//    pub(crate) du registre peuvent muter le solde et l'historique
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Summary, Transaction};

/// Identifiant opaque et immuable d'une personne
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Génère un nouvel identifiant unique (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Une personne et son compte Dale
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    name: String,
    wallet_balance: f64,

    /// Ordre d'insertion = ordre chronologique
    transactions: Vec<Transaction>,
}

impl Person {
    /// Crée une personne sans mouvement
    pub fn new(id: PersonId, name: String, wallet_balance: f64) -> Self {
        Self {
            id,
            name,
            wallet_balance,
            transactions: Vec::new(),
        }
    }

    /// Reconstruit une personne à partir de données persistées
    pub fn restore(
        id: PersonId,
        name: String,
        wallet_balance: f64,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            id,
            name,
            wallet_balance,
            transactions,
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Solde actuel du compte Dale (peut être négatif)
    pub fn wallet_balance(&self) -> f64 {
        self.wallet_balance
    }

    /// Historique complet, du plus ancien au plus récent
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Historique du plus récent au plus ancien (ordre d'affichage)
    ///
    /// CONCEPT RUST : impl Iterator
    /// - Pas d'allocation, l'appelant itère directement sur le slice inversé
    pub fn recent_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    /// Totaux dérivés (jamais stockés)
    pub fn summary(&self) -> Summary {
        Summary::of(self)
    }

    /// Ajoute un mouvement et répercute son effet sur le solde
    pub(crate) fn apply(&mut self, transaction: Transaction) {
        self.wallet_balance += transaction.balance_delta();
        self.transactions.push(transaction);
    }

    /// Écrase le solde sans toucher à l'historique
    pub(crate) fn overwrite_balance(&mut self, balance: f64) {
        self.wallet_balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::{Duration, Utc};

    #[test]
    fn test_person_new() {
        let person = Person::new(PersonId::from("p1"), "Ana".to_string(), 100.0);
        assert_eq!(person.id().as_str(), "p1");
        assert_eq!(person.name(), "Ana");
        assert_eq!(person.wallet_balance(), 100.0);
        assert!(person.transactions().is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(PersonId::generate(), PersonId::generate());
    }

    #[test]
    fn test_apply_updates_balance_and_history() {
        let mut person = Person::new(PersonId::from("p1"), "Ana".to_string(), 0.0);
        let t0 = Utc::now();
        person.apply(Transaction::new(TransactionKind::Recharge, 40.0, t0));
        person.apply(Transaction::new(TransactionKind::Withdrawal, 60.0, t0 + Duration::minutes(1)));

        // Pas de plancher à zéro
        assert_eq!(person.wallet_balance(), -20.0);
        assert_eq!(person.transactions().len(), 2);

        let newest = person.recent_transactions().next().unwrap();
        assert_eq!(newest.kind, TransactionKind::Withdrawal);
    }
}
