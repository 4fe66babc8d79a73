//! Frequency entity type - spectrum allocation records

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// A managed frequency allocation.
///
/// `assigned_to` and `link_ids` reference assets and links but are not
/// cascade-maintained by the store; they are treated as reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    /// Unique identifier (e.g. "freq-001")
    pub id: String,

    pub frequency_mhz: f64,

    pub bandwidth_khz: f64,

    /// Human-readable channel designation
    pub designation: String,

    /// Band label (HF, VHF, UHF, L, Ku, ...)
    pub band: String,

    #[serde(default)]
    pub assigned_to: Vec<String>,

    #[serde(default)]
    pub link_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub classification: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Entity for Frequency {
    const STORE_KEY: &'static str = "frequencies";

    fn id(&self) -> &str {
        &self.id
    }
}
