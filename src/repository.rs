// ============================================================================
// Structure : LedgerRepository
// ============================================================================
// Possède le registre en mémoire et son stockage
//
// - open()    : charge tout le registre depuis le stockage
// - execute() : applique une Command au registre (rien n'est écrit)
// - flush()   : sauvegarde tout le registre s'il a changé
//
// Pas de singleton global : le binaire crée UN repository et le passe à la
// boucle d'événements.
// ============================================================================

use tracing::{debug, info, warn};

use crate::commands::{Command, Outcome};
use crate::error::{LedgerError, StorageError};
use crate::ledger::Ledger;
use crate::storage::LedgerStore;

/// Registre + stockage, avec une frontière d'écriture explicite
pub struct LedgerRepository<S: LedgerStore> {
    store: S,
    ledger: Ledger,
    dirty: bool,
}

impl<S: LedgerStore> LedgerRepository<S> {
    /// Charge le registre depuis le stockage
    pub fn open(store: S) -> Result<Self, StorageError> {
        let people = store.load()?;
        let ledger = Ledger::from_people(people)?;

        info!(people = ledger.len(), "Ledger repository opened");
        Ok(Self {
            store,
            ledger,
            dirty: false,
        })
    }

    /// Registre courant (lecture seule)
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Vrai si des modifications n'ont pas encore été sauvegardées
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Exécute une commande sur le registre
    ///
    /// CONCEPT RUST : match exhaustif sur Command
    /// - Une commande refusée ne modifie rien et ne marque pas le registre
    pub fn execute(&mut self, command: Command) -> Result<Outcome, LedgerError> {
        debug!(?command, "Executing ledger command");

        let result = match command {
            Command::AddPerson {
                name,
                initial_balance,
            } => self
                .ledger
                .add_person(&name, initial_balance)
                .map(|person| Outcome::PersonAdded(person.clone())),

            Command::RecordTransaction {
                person_id,
                kind,
                amount,
            } => self
                .ledger
                .record_transaction(&person_id, kind, amount)
                .map(|transaction| Outcome::TransactionRecorded {
                    person_id,
                    transaction,
                }),

            Command::SetWalletBalance {
                person_id,
                new_balance,
            } => self
                .ledger
                .set_wallet_balance(&person_id, new_balance)
                .map(|()| Outcome::WalletBalanceSet {
                    person_id,
                    balance: new_balance,
                }),
        };

        match &result {
            Ok(outcome) => {
                self.dirty = true;
                info!(person = %outcome.person_id(), ?outcome, "Ledger command applied");
            }
            Err(e) => warn!(error = %e, "Ledger command rejected"),
        }

        result
    }

    /// Sauvegarde tout le registre s'il a changé
    ///
    /// En cas d'échec le registre reste marqué comme modifié : le prochain
    /// flush réessaiera.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }

        self.store.save(self.ledger.people())?;
        self.dirty = false;
        debug!(people = self.ledger.len(), "Ledger flushed");
        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
