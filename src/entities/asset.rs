//! Asset entity type - a tracked communication node (site, mobile unit, aircraft)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Platform class of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Site,
    Mobile,
    Aircraft,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Site => "site",
            Platform::Mobile => "mobile",
            Platform::Aircraft => "aircraft",
        }
    }

    /// All platform classes, in display order
    pub fn all() -> &'static [Platform] {
        &[Platform::Site, Platform::Mobile, Platform::Aircraft]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "site" => Ok(Platform::Site),
            "mobile" => Ok(Platform::Mobile),
            "aircraft" => Ok(Platform::Aircraft),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Operational status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AssetStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Inactive => "inactive",
            AssetStatus::Maintenance => "maintenance",
        }
    }

    pub fn all() -> &'static [AssetStatus] {
        &[
            AssetStatus::Active,
            AssetStatus::Inactive,
            AssetStatus::Maintenance,
        ]
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AssetStatus::Active),
            "inactive" => Ok(AssetStatus::Inactive),
            "maintenance" => Ok(AssetStatus::Maintenance),
            _ => Err(format!("Unknown asset status: {}", s)),
        }
    }
}

/// Geographic position with motion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub alt_m: f64,
    pub heading_deg: f64,
    pub speed_kts: f64,
    pub timestamp: DateTime<Utc>,
}

/// VoIP service details preserved from a contact-directory import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoipService {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extension: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub codec: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transport: String,
}

/// XMPP service details preserved from a contact-directory import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmppService {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encryption: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub conference: String,
}

/// A custom service entry preserved from a contact-directory import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomService {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Free-form asset metadata.
///
/// The voip/xmpp/custom_services fields are side-channel data captured
/// during XML import so a later export can reconstruct the original
/// contact entry; the store itself never reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub department: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voip: Option<VoipService>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmpp: Option<XmppService>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_services: Vec<CustomService>,
}

/// A tracked communication asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique, stable identifier (e.g. "asset-001")
    pub id: String,

    pub name: String,

    pub callsign: String,

    pub platform: Platform,

    pub position: Position,

    #[serde(default)]
    pub status: AssetStatus,

    /// Ids of the comm links this asset participates in, in insertion order.
    /// Maintained by the store: every id here names a live link whose
    /// endpoints include this asset.
    #[serde(default)]
    pub commlinks: Vec<String>,

    /// Key of the matching entry in the external contact directory
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub addressbook_ref: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    #[serde(default)]
    pub metadata: AssetMetadata,
}

impl Entity for Asset {
    const STORE_KEY: &'static str = "assets";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_asset() -> Asset {
        Asset {
            id: "asset-900".to_string(),
            name: "Relay Station Kilo".to_string(),
            callsign: "KILO-RLY".to_string(),
            platform: Platform::Site,
            position: Position {
                lat: 34.1,
                lon: -118.2,
                alt_m: 120.0,
                heading_deg: 0.0,
                speed_kts: 0.0,
                timestamp: "2026-02-10T14:00:00Z".parse().unwrap(),
            },
            status: AssetStatus::Active,
            commlinks: vec!["link-001".to_string()],
            addressbook_ref: "c900-relay-kilo".to_string(),
            icon: "site".to_string(),
            metadata: AssetMetadata {
                department: "Operations".to_string(),
                notes: "Backup relay".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_asset_roundtrip() {
        let asset = sample_asset();
        let json = serde_json::to_string(&asset).unwrap();
        let parsed: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, parsed);
    }

    #[test]
    fn test_asset_serializes_platform_lowercase() {
        let json = serde_json::to_string(&sample_asset()).unwrap();
        assert!(json.contains("\"platform\":\"site\""));
    }

    #[test]
    fn test_side_channel_absent_by_default() {
        let json = serde_json::to_string(&sample_asset()).unwrap();
        assert!(!json.contains("voip"));
        assert!(!json.contains("xmpp"));
        assert!(!json.contains("custom_services"));
    }

    #[test]
    fn test_side_channel_roundtrip() {
        let mut asset = sample_asset();
        asset.metadata.voip = Some(VoipService {
            ip: "10.0.0.5".to_string(),
            port: "5060".to_string(),
            ..Default::default()
        });
        asset.metadata.custom_services = vec![CustomService {
            name: "NTP".to_string(),
            ip: "10.0.0.6".to_string(),
            ..Default::default()
        }];

        let json = serde_json::to_string(&asset).unwrap();
        let parsed: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, parsed);
        assert_eq!(parsed.metadata.voip.unwrap().ip, "10.0.0.5");
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!("AIRCRAFT".parse::<Platform>().unwrap(), Platform::Aircraft);
        assert!("submarine".parse::<Platform>().is_err());
    }
}
