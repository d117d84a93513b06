//! Typed campaign performance record and derived metrics.
//!
//! One record is one row of metrics for one campaign on one day from one
//! advertising source. Raw records arrive as JSON and are checked by
//! `campaign-dq-validation`; this struct is the shape a record takes once
//! it has passed structural validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DqResult;

/// Advertising platforms records are known to originate from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdSource {
    GoogleAds,
    FacebookAds,
    TiktokAds,
    Shopify,
}

impl AdSource {
    pub fn parse(source: &str) -> Option<Self> {
        match source {
            "google_ads" => Some(Self::GoogleAds),
            "facebook_ads" => Some(Self::FacebookAds),
            "tiktok_ads" => Some(Self::TiktokAds),
            "shopify" => Some(Self::Shopify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleAds => "google_ads",
            Self::FacebookAds => "facebook_ads",
            Self::TiktokAds => "tiktok_ads",
            Self::Shopify => "shopify",
        }
    }
}

/// One day of performance metrics for one campaign from one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_name: Option<String>,
    pub source: String,
    pub date: NaiveDate,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl CampaignRecord {
    /// Deserialize a raw record. Intended for records that already passed
    /// validation; stricter than the validator (no float-count tolerance).
    pub fn from_value(raw: &serde_json::Value) -> DqResult<Self> {
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// The source as a known platform, if it is one.
    pub fn source_kind(&self) -> Option<AdSource> {
        AdSource::parse(&self.source)
    }

    /// Click-through rate as a percentage.
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        self.clicks as f64 / self.impressions as f64 * 100.0
    }

    /// Conversion rate as a percentage of clicks.
    pub fn conversion_rate(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.conversions.unwrap_or(0) as f64 / self.clicks as f64 * 100.0
    }

    /// Cost per click.
    pub fn cpc(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.spend / self.clicks as f64
    }

    /// Cost per acquisition.
    pub fn cpa(&self) -> f64 {
        match self.conversions {
            Some(conversions) if conversions > 0 => self.spend / conversions as f64,
            _ => 0.0,
        }
    }

    /// Return on ad spend, when both spend and revenue are meaningful.
    pub fn roas(&self) -> Option<f64> {
        if self.spend == 0.0 {
            return None;
        }
        self.revenue.map(|revenue| revenue / self.spend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> CampaignRecord {
        CampaignRecord {
            campaign_id: "camp_123".to_string(),
            campaign_name: Some("Summer Sale 2024".to_string()),
            source: "google_ads".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            spend: 5000.0,
            impressions: 100_000,
            clicks: 2500,
            conversions: Some(50),
            revenue: Some(7500.0),
            currency: Some("USD".to_string()),
        }
    }

    #[test]
    fn test_derived_metrics() {
        let record = record();
        assert!((record.ctr() - 2.5).abs() < 1e-9);
        assert!((record.conversion_rate() - 2.0).abs() < 1e-9);
        assert!((record.cpc() - 2.0).abs() < 1e-9);
        assert!((record.cpa() - 100.0).abs() < 1e-9);
        assert!((record.roas().unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_with_zero_denominators() {
        let mut record = record();
        record.impressions = 0;
        record.clicks = 0;
        record.conversions = Some(0);
        record.spend = 0.0;

        assert_eq!(record.ctr(), 0.0);
        assert_eq!(record.conversion_rate(), 0.0);
        assert_eq!(record.cpc(), 0.0);
        assert_eq!(record.cpa(), 0.0);
        assert_eq!(record.roas(), None);
    }

    #[test]
    fn test_roas_missing_revenue() {
        let mut record = record();
        record.revenue = None;
        assert_eq!(record.roas(), None);
    }

    #[test]
    fn test_source_kind() {
        let mut record = record();
        assert_eq!(record.source_kind(), Some(AdSource::GoogleAds));
        record.source = "billboard".to_string();
        assert_eq!(record.source_kind(), None);
    }

    #[test]
    fn test_from_value() {
        let raw = json!({
            "campaign_id": "camp_1",
            "source": "facebook_ads",
            "date": "2024-10-15",
            "spend": 100.0,
            "impressions": 1000,
            "clicks": 50
        });
        let record = CampaignRecord::from_value(&raw).unwrap();
        assert_eq!(record.campaign_id, "camp_1");
        assert_eq!(record.conversions, None);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
    }

    #[test]
    fn test_from_value_rejects_wrong_types() {
        let raw = json!({
            "campaign_id": "camp_1",
            "source": "facebook_ads",
            "date": "2024-10-15",
            "spend": 100.0,
            "impressions": "1000",
            "clicks": 50
        });
        assert!(CampaignRecord::from_value(&raw).is_err());
    }
}
