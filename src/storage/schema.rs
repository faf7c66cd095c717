// ============================================================================
// Schéma persisté
// ============================================================================
// Deux formats sont reconnus à la lecture :
//
// Version 1 (format courant, seul format écrit) :
//   {"version": 1, "people": [{"id", "name", "wallet_balance",
//     "transactions": [{"kind": "recharge"|"withdrawal", "amount", "timestamp"}]}]}
//
// Version 0 (export de l'application navigateur, tableau nu) :
//   [{"id", "nombre", "saldoDale", "transacciones": [{"tipo": "recarga"|"retiro",
//     "cantidad", "fecha"}]}]
//
// La lecture est stricte : un champ manquant ou une valeur incohérente donne
// StorageError::Parse, jamais une valeur par défaut silencieuse.
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::ledger::Ledger;
use crate::models::{Person, PersonId, Transaction, TransactionKind};

/// Version écrite par `encode`
pub const CURRENT_VERSION: u64 = 1;

// ----------------------------------------------------------------------------
// Version 1
// ----------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentV1 {
    version: u64,
    people: Vec<PersonV1>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PersonV1 {
    id: String,
    name: String,
    wallet_balance: f64,
    transactions: Vec<Transaction>,
}

// ----------------------------------------------------------------------------
// Version 0 (navigateur)
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PersonV0 {
    id: String,
    nombre: String,
    #[serde(rename = "saldoDale")]
    saldo_dale: f64,
    transacciones: Vec<TransactionV0>,
}

#[derive(Debug, Deserialize)]
struct TransactionV0 {
    tipo: KindV0,
    cantidad: f64,
    fecha: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindV0 {
    Recarga,
    Retiro,
}

impl From<KindV0> for TransactionKind {
    fn from(kind: KindV0) -> Self {
        match kind {
            KindV0::Recarga => TransactionKind::Recharge,
            KindV0::Retiro => TransactionKind::Withdrawal,
        }
    }
}

// ----------------------------------------------------------------------------
// Encode / decode
// ----------------------------------------------------------------------------

/// Sérialise toutes les personnes au format courant
///
/// Un montant ou un solde non fini est refusé : serde_json l'écrirait `null`
/// et le document ne serait plus relisible.
pub fn encode(people: &[Person]) -> Result<String, StorageError> {
    for person in people {
        check_numbers(person)?;
    }

    let document = DocumentV1 {
        version: CURRENT_VERSION,
        people: people
            .iter()
            .map(|p| PersonV1 {
                id: p.id().to_string(),
                name: p.name().to_string(),
                wallet_balance: p.wallet_balance(),
                transactions: p.transactions().to_vec(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Désérialise un document persisté, quelle que soit sa version
///
/// CONCEPT RUST : serde_json::Value
/// - On lit d'abord un Value générique pour détecter la version
/// - Puis on le convertit vers la structure typée correspondante
pub fn decode(text: &str) -> Result<Vec<Person>, StorageError> {
    let value: Value = serde_json::from_str(text)?;

    let people = if value.is_array() {
        decode_v0(value)?
    } else if value.is_object() {
        let version = value
            .get("version")
            .ok_or_else(|| StorageError::Parse("champ \"version\" manquant".to_string()))?
            .as_u64()
            .ok_or_else(|| StorageError::Parse("champ \"version\" non entier".to_string()))?;

        match version {
            CURRENT_VERSION => decode_v1(value)?,
            other => return Err(StorageError::UnsupportedVersion(other)),
        }
    } else {
        return Err(StorageError::Parse(
            "le document doit être un objet ou un tableau".to_string(),
        ));
    };

    validate(people)
}

fn decode_v1(value: Value) -> Result<Vec<Person>, StorageError> {
    let document: DocumentV1 = serde_json::from_value(value)?;

    Ok(document
        .people
        .into_iter()
        .map(|p| Person::restore(PersonId::from(p.id), p.name, p.wallet_balance, p.transactions))
        .collect())
}

fn decode_v0(value: Value) -> Result<Vec<Person>, StorageError> {
    let records: Vec<PersonV0> = serde_json::from_value(value)?;

    Ok(records
        .into_iter()
        .map(|p| {
            let transactions = p
                .transacciones
                .into_iter()
                .map(|t| Transaction::new(t.tipo.into(), t.cantidad, t.fecha))
                .collect();
            Person::restore(PersonId::from(p.id), p.nombre, p.saldo_dale, transactions)
        })
        .collect())
}

/// Vérifie les invariants du modèle sur des données venues de l'extérieur
fn validate(people: Vec<Person>) -> Result<Vec<Person>, StorageError> {
    for person in &people {
        if person.name().trim().is_empty() {
            return Err(StorageError::Parse(format!("personne {} : nom vide", person.id())));
        }
        check_numbers(person)?;
    }

    Ledger::from_people(people).map(Ledger::into_people)
}

/// Solde fini, montants finis et strictement positifs
fn check_numbers(person: &Person) -> Result<(), StorageError> {
    if !person.wallet_balance().is_finite() {
        return Err(StorageError::Parse(format!(
            "personne {} : solde non fini",
            person.id()
        )));
    }
    if let Some(bad) = person
        .transactions()
        .iter()
        .find(|t| !t.amount.is_finite() || t.amount <= 0.0)
    {
        return Err(StorageError::Parse(format!(
            "personne {} : montant invalide {}",
            person.id(),
            bad.amount
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<Person> {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        vec![
            Person::restore(
                PersonId::from("a"),
                "Ana".to_string(),
                120.0,
                vec![
                    Transaction::new(TransactionKind::Recharge, 50.0, t),
                    Transaction::new(TransactionKind::Withdrawal, 30.0, t),
                ],
            ),
            Person::new(PersonId::from("b"), "Beto".to_string(), 0.0),
        ]
    }

    #[test]
    fn test_encode_then_decode_is_lossless() {
        let people = sample();
        let text = encode(&people).unwrap();
        assert_eq!(decode(&text).unwrap(), people);
    }

    #[test]
    fn test_encode_writes_current_version() {
        let text = encode(&sample()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["people"][0]["transactions"][1]["kind"], "withdrawal");
    }

    #[test]
    fn test_decode_browser_export() {
        let text = r#"[
            {"id": "1700000000000", "nombre": "Ana", "saldoDale": 120,
             "transacciones": [
                {"tipo": "recarga", "cantidad": 50, "fecha": "2024-03-01T12:30:00.000Z"},
                {"tipo": "retiro", "cantidad": 30, "fecha": "2024-03-02T08:00:00.000Z"}
             ]}
        ]"#;

        let people = decode(text).unwrap();
        assert_eq!(people.len(), 1);

        let ana = &people[0];
        assert_eq!(ana.id().as_str(), "1700000000000");
        assert_eq!(ana.name(), "Ana");
        assert_eq!(ana.wallet_balance(), 120.0);
        assert_eq!(ana.transactions()[0].kind, TransactionKind::Recharge);
        assert_eq!(ana.transactions()[1].kind, TransactionKind::Withdrawal);
        assert_eq!(
            ana.transactions()[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
        );
        assert_eq!(ana.summary().total_gain, 100.0);
    }

    #[test]
    fn test_decode_empty_documents() {
        assert!(decode("[]").unwrap().is_empty());
        assert!(decode(r#"{"version": 1, "people": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_balance_is_an_error() {
        let text = r#"[{"id": "1", "nombre": "Ana", "transacciones": []}]"#;
        assert!(matches!(decode(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let text = r#"{"version": 1, "people": [{"id": "1", "name": "Ana", "wallet_balance": 0,
            "transactions": [{"kind": "transfer", "amount": 5, "timestamp": "2024-03-01T12:30:00Z"}]}]}"#;
        assert!(matches!(decode(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_non_positive_amount_is_an_error() {
        let text = r#"{"version": 1, "people": [{"id": "1", "name": "Ana", "wallet_balance": 0,
            "transactions": [{"kind": "recharge", "amount": 0, "timestamp": "2024-03-01T12:30:00Z"}]}]}"#;
        assert!(matches!(decode(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_duplicate_ids_are_an_error() {
        let text = r#"{"version": 1, "people": [
            {"id": "1", "name": "Ana", "wallet_balance": 0, "transactions": []},
            {"id": "1", "name": "Beto", "wallet_balance": 0, "transactions": []}]}"#;
        assert!(matches!(decode(text), Err(StorageError::DuplicateId(_))));
    }

    #[test]
    fn test_unknown_person_field_is_an_error() {
        let text = r#"{"version": 1, "people": [{"id": "1", "name": "Ana", "wallet_balance": 0,
            "transactions": [], "nickname": "A"}]}"#;
        assert!(matches!(decode(text), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_encode_refuses_non_finite_numbers() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let overflowed = Person::restore(PersonId::from("a"), "Ana".to_string(), f64::INFINITY, vec![]);
        assert!(matches!(encode(&[overflowed]), Err(StorageError::Parse(_))));

        let bad_amount = Person::restore(
            PersonId::from("a"),
            "Ana".to_string(),
            0.0,
            vec![Transaction::new(TransactionKind::Recharge, f64::NAN, t)],
        );
        assert!(matches!(encode(&[bad_amount]), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let text = r#"{"version": 7, "people": []}"#;
        assert!(matches!(decode(text), Err(StorageError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decode("not json"), Err(StorageError::Parse(_))));
        assert!(matches!(decode("42"), Err(StorageError::Parse(_))));
        assert!(matches!(decode(r#"{"people": []}"#), Err(StorageError::Parse(_))));
    }
}
