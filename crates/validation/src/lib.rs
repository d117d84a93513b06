//! Data-quality validation for campaign performance records before they
//! enter the analytics pipeline.

pub mod report;
pub mod validator;

pub use report::ValidationReport;
pub use validator::CampaignRecordValidator;
