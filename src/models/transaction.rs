// ============================================================================
// Structure : Transaction
// ============================================================================
// Un mouvement d'argent sur le compte Dale : recharge ou retrait
//
// CONCEPTS RUST :
// 1. Enum à deux variants : le compilateur garantit qu'il n'y en a pas d'autre
// 2. #[derive(Copy)] : TransactionKind est petit, on le copie au lieu de le prêter
// 3. DateTime<Utc> : instant absolu, sérialisé en RFC 3339 (triable, parsable)
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type de mouvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Argent ajouté au compte Dale
    Recharge,

    /// Argent sorti du compte Dale
    Withdrawal,
}

impl TransactionKind {
    /// Libellé affiché dans l'interface
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Recharge => "Recharge",
            TransactionKind::Withdrawal => "Retrait",
        }
    }

    /// Passe à l'autre type (touche Tab dans le formulaire)
    pub fn toggle(&self) -> TransactionKind {
        match self {
            TransactionKind::Recharge => TransactionKind::Withdrawal,
            TransactionKind::Withdrawal => TransactionKind::Recharge,
        }
    }
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Recharge
    }
}

/// Mouvement enregistré, immuable une fois ajouté à l'historique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    /// Recharge ou retrait
    pub kind: TransactionKind,

    /// Montant, toujours strictement positif
    pub amount: f64,

    /// Instant d'enregistrement
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Crée un mouvement
    ///
    /// La validation du montant est faite par le registre avant l'appel.
    pub fn new(kind: TransactionKind, amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            amount,
            timestamp,
        }
    }

    /// Effet du mouvement sur le solde Dale
    ///
    /// Recharge : +montant, retrait : -montant
    pub fn balance_delta(&self) -> f64 {
        match self.kind {
            TransactionKind::Recharge => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }

    pub fn is_recharge(&self) -> bool {
        self.kind == TransactionKind::Recharge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_delta() {
        let now = Utc::now();
        assert_eq!(Transaction::new(TransactionKind::Recharge, 50.0, now).balance_delta(), 50.0);
        assert_eq!(Transaction::new(TransactionKind::Withdrawal, 30.0, now).balance_delta(), -30.0);
    }

    #[test]
    fn test_kind_toggle() {
        assert_eq!(TransactionKind::default(), TransactionKind::Recharge);
        assert_eq!(TransactionKind::Recharge.toggle(), TransactionKind::Withdrawal);
        assert_eq!(TransactionKind::Withdrawal.toggle(), TransactionKind::Recharge);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Withdrawal).unwrap();
        assert_eq!(json, "\"withdrawal\"");
    }
}
