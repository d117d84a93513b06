//! Staged data-quality checks over one raw campaign record: required
//! fields, types/formats, business rules, and anomaly detection.
//!
//! The validator never fails on malformed field content — that is exactly
//! what the report's `errors` list is for. The only fault surfaced as
//! `Err` is an argument that is not a record at all.

use campaign_dq_core::{DqError, DqResult, ValidationConfig};
use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::report::ValidationReport;

/// Fields every record must carry.
const REQUIRED_FIELDS: [&str; 6] = [
    "campaign_id",
    "source",
    "date",
    "spend",
    "impressions",
    "clicks",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates one campaign record per call. Stateless apart from its
/// thresholds, so a single instance can be shared across threads.
pub struct CampaignRecordValidator {
    config: ValidationConfig,
}

/// Field values that survived the type/format stage. Business rules and
/// anomaly detection read from here, never from the raw JSON again; a
/// field that failed its type check stays `None` and its rules are
/// skipped.
#[derive(Debug, Default)]
struct TypedFields {
    date: Option<NaiveDate>,
    spend: Option<f64>,
    impressions: Option<u64>,
    clicks: Option<u64>,
    conversions: Option<u64>,
    revenue: Option<f64>,
}

impl CampaignRecordValidator {
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        info!(
            high_spend_threshold = config.high_spend_threshold,
            max_ctr = config.max_ctr,
            stale_after_days = config.stale_after_days,
            "Campaign record validator initialized"
        );
        Self { config }
    }

    /// Validate a raw record against today's date on the local clock.
    pub fn validate(&self, raw: &Value) -> DqResult<ValidationReport> {
        self.validate_as_of(raw, Utc::now().date_naive())
    }

    /// Validate a raw record with an explicit "today", which anchors the
    /// future-date and stale-date rules.
    pub fn validate_as_of(&self, raw: &Value, today: NaiveDate) -> DqResult<ValidationReport> {
        let record = raw.as_object().ok_or_else(|| {
            DqError::InvalidInput(format!("expected a record object, got {}", json_kind(raw)))
        })?;

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_required(record, &mut errors);
        let fields = check_types(record, &mut errors);
        self.check_business_rules(&fields, today, &mut errors, &mut warnings);
        self.detect_anomalies(&fields, &mut errors, &mut warnings);

        let campaign_id = record
            .get("campaign_id")
            .and_then(Value::as_str)
            .map(str::to_owned);

        debug!(
            campaign_id = ?campaign_id,
            errors = errors.len(),
            warnings = warnings.len(),
            "Record validated"
        );

        Ok(ValidationReport::new(campaign_id, errors, warnings))
    }

    fn check_business_rules(
        &self,
        fields: &TypedFields,
        today: NaiveDate,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        // Safety net: stage 2 only requires spend/revenue to be numeric.
        if let Some(spend) = fields.spend {
            if spend < 0.0 {
                errors.push("spend cannot be negative".to_string());
            }
        }

        if let (Some(clicks), Some(impressions)) = (fields.clicks, fields.impressions) {
            if clicks > impressions {
                errors.push("clicks cannot exceed impressions".to_string());
            }
        }

        if let (Some(conversions), Some(clicks)) = (fields.conversions, fields.clicks) {
            if conversions > clicks {
                errors.push("conversions cannot exceed clicks".to_string());
            }
        }

        if let Some(revenue) = fields.revenue {
            if revenue < 0.0 {
                errors.push("revenue cannot be negative".to_string());
            }
        }

        if let Some(date) = fields.date {
            if date > today {
                errors.push("date cannot be in the future".to_string());
            } else if (today - date).num_days() > self.config.stale_after_days {
                // Stale records are acceptable for backfills, so this one
                // is only a warning.
                warnings.push(format!(
                    "date is more than {} days in the past",
                    self.config.stale_after_days
                ));
            }
        }
    }

    fn detect_anomalies(
        &self,
        fields: &TypedFields,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        if let (Some(impressions), Some(clicks)) = (fields.impressions, fields.clicks) {
            if impressions > 0 && clicks == 0 {
                // Rare but possible: ads shown, none clicked.
                warnings.push("impressions recorded but no clicks".to_string());
            }
            if impressions == 0 && clicks > 0 {
                errors.push("clicks recorded without impressions".to_string());
            }
        }

        if let Some(spend) = fields.spend {
            if spend > self.config.high_spend_threshold {
                warnings.push(format!(
                    "spend {:.2} exceeds single-day threshold {:.0}",
                    spend, self.config.high_spend_threshold
                ));
            }
        }

        if let (Some(impressions), Some(clicks)) = (fields.impressions, fields.clicks) {
            if impressions > 0 {
                let ctr = clicks as f64 / impressions as f64;
                if ctr > self.config.max_ctr {
                    errors.push(format!(
                        "click-through rate {:.1}% is implausibly high",
                        ctr * 100.0
                    ));
                }
            }
        }

        if let Some(conversions) = fields.conversions {
            if conversions > 0 && fields.revenue.unwrap_or(0.0) == 0.0 {
                // Common for non-purchase conversion events.
                warnings.push("conversions recorded without revenue".to_string());
            }
        }
    }
}

impl Default for CampaignRecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// All required fields are checked so the caller sees the complete defect
/// list in one pass; an explicit JSON null counts as absent.
fn check_required(record: &Map<String, Value>, errors: &mut Vec<String>) {
    for field in REQUIRED_FIELDS {
        if present(record, field).is_none() {
            errors.push(format!("{field} is required"));
        }
    }
}

/// Type/format checks for the fields that are present, in the order of the
/// record schema. Returns the typed view the later stages work from.
fn check_types(record: &Map<String, Value>, errors: &mut Vec<String>) -> TypedFields {
    let mut fields = TypedFields::default();

    if let Some(value) = present(record, "campaign_id") {
        match value.as_str() {
            Some("") => errors.push("campaign_id must not be empty".to_string()),
            Some(_) => {}
            None => errors.push("campaign_id must be a string".to_string()),
        }
    }
    check_string(record, "campaign_name", errors);
    check_string(record, "source", errors);
    fields.date = take_date(record, errors);
    fields.spend = take_number(record, "spend", errors);
    fields.impressions = take_count(record, "impressions", errors);
    fields.clicks = take_count(record, "clicks", errors);
    fields.conversions = take_count(record, "conversions", errors);
    fields.revenue = take_number(record, "revenue", errors);
    check_string(record, "currency", errors);

    fields
}

/// The field's value, with explicit null treated the same as missing.
fn present<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

fn check_string(record: &Map<String, Value>, field: &str, errors: &mut Vec<String>) {
    if let Some(value) = present(record, field) {
        if !value.is_string() {
            errors.push(format!("{field} must be a string"));
        }
    }
}

/// Money-like values arrive as integers or floats depending on the source
/// serializer; both are accepted.
fn take_number(record: &Map<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<f64> {
    let value = present(record, field)?;
    match value.as_f64() {
        Some(amount) => Some(amount),
        None => {
            errors.push(format!("{field} must be a number"));
            None
        }
    }
}

/// Count fields must be non-negative integers. A float with a zero
/// fractional part (`5.0`) is tolerated as a serialization round-trip
/// artifact; negative counts are never meaningful and are rejected here
/// rather than deferred to business rules.
fn take_count(record: &Map<String, Value>, field: &str, errors: &mut Vec<String>) -> Option<u64> {
    let value = present(record, field)?;
    let count = match value.as_u64() {
        Some(count) => Some(count),
        None => match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
            _ => None,
        },
    };
    if count.is_none() {
        errors.push(format!("{field} must be a non-negative integer"));
    }
    count
}

/// An unparseable date is an error entry, never a panic, and the
/// date-dependent business rules are skipped for that record.
fn take_date(record: &Map<String, Value>, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let value = present(record, "date")?;
    let parsed = value
        .as_str()
        .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok());
    if parsed.is_none() {
        errors.push("date must be in YYYY-MM-DD format".to_string());
    }
    parsed
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
