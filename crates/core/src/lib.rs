pub mod config;
pub mod error;
pub mod record;

pub use config::{AppConfig, ValidationConfig};
pub use error::{DqError, DqResult};
pub use record::{AdSource, CampaignRecord};
