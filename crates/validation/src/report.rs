//! Validation verdict for a single campaign record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of validating one campaign record.
///
/// Entries in `errors` make the record unusable; entries in `warnings`
/// flag suspicious but usable conditions. `valid` holds exactly when
/// `errors` is empty — warnings never affect it.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub campaign_id: Option<String>,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Assemble a report from accumulated findings, stamping it with the
    /// current time.
    pub fn new(campaign_id: Option<String>, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            campaign_id,
            validated_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tracks_errors() {
        let clean = ValidationReport::new(Some("camp_1".to_string()), vec![], vec![]);
        assert!(clean.is_valid());

        let broken = ValidationReport::new(None, vec!["spend is required".to_string()], vec![]);
        assert!(!broken.is_valid());

        let flagged = ValidationReport::new(
            Some("camp_2".to_string()),
            vec![],
            vec!["conversions recorded without revenue".to_string()],
        );
        assert!(flagged.is_valid(), "warnings must not affect validity");
    }

    #[test]
    fn test_serializes_to_json() {
        let report = ValidationReport::new(
            Some("camp_1".to_string()),
            vec!["date is required".to_string()],
            vec![],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["campaign_id"], "camp_1");
        assert_eq!(json["errors"][0], "date is required");
        assert!(json["validated_at"].is_string());
    }
}
