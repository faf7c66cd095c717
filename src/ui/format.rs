// ============================================================================
// Formatage des montants et des dates
// ============================================================================

use chrono::{DateTime, Local, Utc};

/// Formatte un montant : "$1234.56", "-$20.00"
///
/// Le signe est décidé après arrondi : -0.001 s'affiche "$0.00".
pub fn format_currency(amount: f64) -> String {
    let digits = format!("{:.2}", amount.abs());
    if amount < 0.0 && digits != "0.00" {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Formatte un horodatage en heure locale : "01 Mar 2024 12:30"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d %b %Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(-20.0), "-$20.00");
        assert_eq!(format_currency(-0.0), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-0.004), "$0.00");
        assert_eq!(format_currency(-0.006), "-$0.01");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(&Utc::now());
        // "dd Mon yyyy HH:MM"
        assert_eq!(formatted.len(), 17);
        assert_eq!(formatted.split(' ').count(), 4);
    }
}
