// ============================================================================
// Saisie utilisateur
// ============================================================================
// Conversion des chaînes tapées dans les formulaires en valeurs du modèle
//
// Les règles reprennent celles du registre pour pouvoir refuser la saisie
// AVANT de construire une commande, et redemander la valeur à l'utilisateur.
// ============================================================================

use crate::error::LedgerError;

/// Nom sans espaces de début / fin, non vide
pub fn parse_name(raw: &str) -> Result<String, LedgerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidName);
    }
    Ok(name.to_string())
}

/// Montant d'un mouvement : nombre fini strictement positif
pub fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    match parse_number(raw) {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(LedgerError::InvalidAmount(raw.trim().to_string())),
    }
}

/// Nouveau solde Dale : nombre fini positif ou nul
pub fn parse_balance(raw: &str) -> Result<f64, LedgerError> {
    match parse_number(raw) {
        Some(value) if value >= 0.0 => Ok(value),
        _ => Err(LedgerError::InvalidAmount(raw.trim().to_string())),
    }
}

/// Solde initial d'une nouvelle personne
///
/// Saisie vide ou non numérique : 0
pub fn parse_initial_balance(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// CONCEPT RUST : Option + filter
/// - parse() échoue sur "abc" → None
/// - "inf" / "NaN" sont acceptés par parse(), filter les écarte
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("  Ana ").unwrap(), "Ana");
        assert_eq!(parse_name(" \t ").unwrap_err(), LedgerError::InvalidName);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50").unwrap(), 50.0);
        assert_eq!(parse_amount(" 12.75 ").unwrap(), 12.75);

        for raw in ["", "0", "-3", "abc", "NaN", "inf"] {
            assert!(
                matches!(parse_amount(raw), Err(LedgerError::InvalidAmount(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("0").unwrap(), 0.0);
        assert_eq!(parse_balance("80.5").unwrap(), 80.5);
        assert!(parse_balance("-1").is_err());
        assert!(parse_balance("x").is_err());
    }

    #[test]
    fn test_parse_initial_balance_defaults_to_zero() {
        assert_eq!(parse_initial_balance("100"), 100.0);
        assert_eq!(parse_initial_balance(""), 0.0);
        assert_eq!(parse_initial_balance("beaucoup"), 0.0);
        assert_eq!(parse_initial_balance("inf"), 0.0);
        assert_eq!(parse_initial_balance("-5"), -5.0);
    }
}
