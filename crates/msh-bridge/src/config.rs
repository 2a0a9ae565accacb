//! Bridge configuration

use serde::{Deserialize, Serialize};

use crate::property::{self, dispid};
use crate::{BridgeError, BridgeResult};

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First DISPID handed out for dynamically resolved members
    pub custom_dispid_min: i32,

    /// Let `item("name")` resolve through the dynamic name scan;
    /// when off it reports `NotImplemented`
    pub item_by_name: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_dispid_min: dispid::CUSTOM_MIN,
            item_by_name: true,
        }
    }
}

impl Config {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Dynamic DISPIDs must start above every built-in member's DISPID
    pub fn validate(&self) -> BridgeResult<()> {
        let max = property::max_static_dispid();
        if self.custom_dispid_min <= max {
            return Err(BridgeError::invalid(format!(
                "custom_dispid_min {} overlaps built-in DISPIDs (up to {max})",
                self.custom_dispid_min
            )));
        }
        Ok(())
    }
}
