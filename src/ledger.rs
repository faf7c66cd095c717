// ============================================================================
// Structure : Ledger
// ============================================================================
// Le registre : toutes les personnes suivies, dans l'ordre de création
//
// Deux points d'entrée modifient une personne :
// - record_transaction : ajoute un mouvement ET met à jour le solde Dale
// - set_wallet_balance : écrase le solde (réconciliation avec le vrai compte)
//
// Toutes les validations ont lieu AVANT la moindre mutation : une opération
// refusée laisse le registre exactement dans son état précédent.
// ============================================================================

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, StorageError};
use crate::models::{Person, PersonId, Summary, Transaction, TransactionKind};

/// Racine de l'agrégat : la collection ordonnée des personnes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    people: Vec<Person>,
}

impl Ledger {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self { people: Vec::new() }
    }

    /// Reconstruit un registre à partir de personnes persistées
    ///
    /// Refuse les identifiants en double : l'unicité est un invariant du registre.
    pub fn from_people(people: Vec<Person>) -> Result<Self, StorageError> {
        {
            let mut seen = HashSet::with_capacity(people.len());
            for person in &people {
                if !seen.insert(person.id()) {
                    return Err(StorageError::DuplicateId(person.id().clone()));
                }
            }
        }
        Ok(Self { people })
    }

    /// Ajoute une personne à la fin du registre
    ///
    /// Le nom est enregistré sans les espaces de début et de fin.
    pub fn add_person(&mut self, name: &str, initial_balance: f64) -> Result<&Person, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidName);
        }
        if !initial_balance.is_finite() {
            return Err(LedgerError::InvalidAmount(initial_balance.to_string()));
        }

        let mut id = PersonId::generate();
        while self.position(&id).is_some() {
            id = PersonId::generate();
        }

        self.people.push(Person::new(id, name.to_string(), initial_balance));
        let index = self.people.len() - 1;
        Ok(&self.people[index])
    }

    /// Enregistre un mouvement horodaté maintenant
    pub fn record_transaction(
        &mut self,
        person_id: &PersonId,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<Transaction, LedgerError> {
        self.record_transaction_at(person_id, kind, amount, Utc::now())
    }

    /// Enregistre un mouvement avec un horodatage explicite
    ///
    /// Recharge : solde += montant ; retrait : solde -= montant, sans plancher.
    /// Un solde résultant non fini (dépassement) est refusé comme InvalidAmount.
    pub fn record_transaction_at(
        &mut self,
        person_id: &PersonId,
        kind: TransactionKind,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount.to_string()));
        }

        let person = self.person_mut(person_id)?;
        let transaction = Transaction::new(kind, amount, timestamp);
        if !(person.wallet_balance() + transaction.balance_delta()).is_finite() {
            return Err(LedgerError::InvalidAmount(amount.to_string()));
        }

        person.apply(transaction.clone());
        Ok(transaction)
    }

    /// Écrase le solde Dale d'une personne sans créer de mouvement
    pub fn set_wallet_balance(&mut self, person_id: &PersonId, new_balance: f64) -> Result<(), LedgerError> {
        if !new_balance.is_finite() || new_balance < 0.0 {
            return Err(LedgerError::InvalidAmount(new_balance.to_string()));
        }

        self.person_mut(person_id)?.overwrite_balance(new_balance);
        Ok(())
    }

    /// Totaux d'une personne du registre
    pub fn summary(&self, person_id: &PersonId) -> Result<Summary, LedgerError> {
        self.person(person_id)
            .map(Person::summary)
            .ok_or_else(|| LedgerError::PersonNotFound(person_id.clone()))
    }

    /// Cherche une personne par identifiant
    pub fn person(&self, person_id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id() == person_id)
    }

    /// Toutes les personnes, dans l'ordre de création
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Rend la collection (ex: après validation d'un document persisté)
    pub fn into_people(self) -> Vec<Person> {
        self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    fn position(&self, person_id: &PersonId) -> Option<usize> {
        self.people.iter().position(|p| p.id() == person_id)
    }

    fn person_mut(&mut self, person_id: &PersonId) -> Result<&mut Person, LedgerError> {
        self.people
            .iter_mut()
            .find(|p| p.id() == person_id)
            .ok_or_else(|| LedgerError::PersonNotFound(person_id.clone()))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
