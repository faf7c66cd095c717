// ============================================================================
// Structure : Summary
// ============================================================================
// Indicateurs dérivés de l'historique d'une personne
//
// - total_recharged : somme des recharges
// - total_withdrawn : somme des retraits
// - realized_gain   : retraits - recharges (gain déjà sorti du compte)
// - total_gain      : solde Dale + realized_gain (gain total, non retiré inclus)
//
// CONCEPT RUST : Fonction pure
// - Prend &Person, ne modifie rien, toujours Ok
// - L'ordre des mouvements n'a aucune influence (addition commutative)
// ============================================================================

use crate::models::{Person, TransactionKind};

/// Totaux calculés pour une personne
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_recharged: f64,
    pub total_withdrawn: f64,
    pub realized_gain: f64,
    pub total_gain: f64,
}

impl Summary {
    /// Calcule les totaux d'une personne
    ///
    /// CONCEPT RUST : Iterator + fold
    /// - Un seul passage sur l'historique pour les deux sommes
    pub fn of(person: &Person) -> Self {
        let (total_recharged, total_withdrawn) = person.transactions().iter().fold(
            (0.0, 0.0),
            |(recharged, withdrawn), t| match t.kind {
                TransactionKind::Recharge => (recharged + t.amount, withdrawn),
                TransactionKind::Withdrawal => (recharged, withdrawn + t.amount),
            },
        );

        let realized_gain = total_withdrawn - total_recharged;

        Self {
            total_recharged,
            total_withdrawn,
            realized_gain,
            total_gain: person.wallet_balance() + realized_gain,
        }
    }
}

/// Raccourci libre pour `Summary::of`
pub fn compute_summary(person: &Person) -> Summary {
    Summary::of(person)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonId, Transaction};
    use chrono::Utc;

    fn person_with(balance: f64, moves: &[(TransactionKind, f64)]) -> Person {
        let now = Utc::now();
        let transactions = moves
            .iter()
            .map(|&(kind, amount)| Transaction::new(kind, amount, now))
            .collect();
        Person::restore(PersonId::from("p"), "P".to_string(), balance, transactions)
    }

    #[test]
    fn test_empty_history() {
        let summary = Summary::of(&person_with(42.0, &[]));
        assert_eq!(summary.total_recharged, 0.0);
        assert_eq!(summary.total_withdrawn, 0.0);
        assert_eq!(summary.realized_gain, 0.0);
        assert_eq!(summary.total_gain, 42.0);
    }

    #[test]
    fn test_gain_identities() {
        let person = person_with(
            75.0,
            &[
                (TransactionKind::Recharge, 20.0),
                (TransactionKind::Withdrawal, 5.5),
                (TransactionKind::Recharge, 10.0),
                (TransactionKind::Withdrawal, 100.0),
            ],
        );
        let summary = compute_summary(&person);

        assert_eq!(summary.total_recharged, 30.0);
        assert_eq!(summary.total_withdrawn, 105.5);
        assert_eq!(summary.realized_gain, summary.total_withdrawn - summary.total_recharged);
        assert_eq!(summary.total_gain, person.wallet_balance() + summary.realized_gain);
    }

    #[test]
    fn test_order_does_not_matter() {
        let moves = [
            (TransactionKind::Recharge, 12.25),
            (TransactionKind::Withdrawal, 3.5),
            (TransactionKind::Recharge, 7.0),
        ];
        let mut reversed = moves;
        reversed.reverse();

        assert_eq!(
            Summary::of(&person_with(0.0, &moves)),
            Summary::of(&person_with(0.0, &reversed))
        );
    }
}
