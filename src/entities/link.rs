//! CommLink entity type - a communication channel between exactly two assets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Link technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Satellite,
    LosRadio,
    Voip,
    Xmpp,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Satellite => "satellite",
            LinkType::LosRadio => "los_radio",
            LinkType::Voip => "voip",
            LinkType::Xmpp => "xmpp",
        }
    }

    pub fn all() -> &'static [LinkType] {
        &[
            LinkType::Satellite,
            LinkType::LosRadio,
            LinkType::Voip,
            LinkType::Xmpp,
        ]
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "satellite" => Ok(LinkType::Satellite),
            "los_radio" => Ok(LinkType::LosRadio),
            "voip" => Ok(LinkType::Voip),
            "xmpp" => Ok(LinkType::Xmpp),
            _ => Err(format!("Unknown link type: {}", s)),
        }
    }
}

/// Operational status of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LinkStatus {
    #[default]
    Active,
    Degraded,
    Unavailable,
    Scheduled,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Degraded => "degraded",
            LinkStatus::Unavailable => "unavailable",
            LinkStatus::Scheduled => "scheduled",
        }
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(LinkStatus::Active),
            "degraded" => Ok(LinkStatus::Degraded),
            "unavailable" => Ok(LinkStatus::Unavailable),
            "scheduled" => Ok(LinkStatus::Scheduled),
            _ => Err(format!("Unknown link status: {}", s)),
        }
    }
}

/// RF carrier details. Every field is independently absent for links that
/// have no radio component (VoIP, XMPP).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyInfo {
    #[serde(default)]
    pub value_mhz: Option<f64>,

    #[serde(default)]
    pub bandwidth_khz: Option<f64>,

    #[serde(default)]
    pub polarization: Option<String>,

    #[serde(default)]
    pub modulation: Option<String>,
}

/// Satellite segment details, present only on satellite links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteInfo {
    pub name: String,

    pub orbit: String,

    /// Geostationary slot; None for non-GEO orbits.
    #[serde(default)]
    pub position_deg_w: Option<f64>,

    pub transponder: String,

    pub provider: String,
}

/// Activation window for a link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub recurrence: String,
}

/// Measured link quality. None means unmeasured, which is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkQuality {
    #[serde(default)]
    pub signal_strength_dbm: Option<f64>,

    #[serde(default)]
    pub ber: Option<f64>,

    #[serde(default)]
    pub latency_ms: Option<f64>,
}

/// A communication link between exactly two assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommLink {
    /// Unique identifier (e.g. "link-001")
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub link_type: LinkType,

    /// Free-form technology refinement (GEO, HF, UHF, ...)
    #[serde(default)]
    pub subtype: Option<String>,

    #[serde(default)]
    pub status: LinkStatus,

    /// Exactly two asset ids. Validated on upsert; the store keeps the
    /// endpoint assets' commlink membership in sync with this list.
    pub endpoints: Vec<String>,

    #[serde(default)]
    pub frequency: FrequencyInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite: Option<SatelliteInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,

    #[serde(default)]
    pub quality: LinkQuality,
}

impl Entity for CommLink {
    const STORE_KEY: &'static str = "commlinks";

    fn id(&self) -> &str {
        &self.id
    }
}
