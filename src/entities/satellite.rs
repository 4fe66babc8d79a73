//! Satellite entity type - read-mostly reference data for the space segment

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Orbit regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitType {
    #[serde(rename = "GEO")]
    Geo,
    #[serde(rename = "MEO")]
    Meo,
    #[serde(rename = "LEO")]
    Leo,
}

impl OrbitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitType::Geo => "GEO",
            OrbitType::Meo => "MEO",
            OrbitType::Leo => "LEO",
        }
    }
}

impl std::fmt::Display for OrbitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrbitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GEO" => Ok(OrbitType::Geo),
            "MEO" => Ok(OrbitType::Meo),
            "LEO" => Ok(OrbitType::Leo),
            _ => Err(format!("Unknown orbit type: {}", s)),
        }
    }
}

/// A transponder on a satellite, allocatable to comm links.
///
/// `allocated_to` is reference data: the store never cascades link removal
/// into it, so entries may go stale and consumers must tolerate unknown ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transponder {
    pub id: String,

    pub band: String,

    pub bandwidth_mhz: f64,

    #[serde(default)]
    pub allocated_to: Vec<String>,
}

/// A satellite providing space-segment capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    /// Unique identifier (e.g. "sat-001")
    pub id: String,

    pub name: String,

    pub norad_id: u32,

    pub orbit_type: OrbitType,

    /// Geostationary slot in degrees west; None for MEO/LEO birds.
    /// Must survive serialization as absent, never as 0.0.
    #[serde(default)]
    pub position_deg_w: Option<f64>,

    pub provider: String,

    pub status: String,

    #[serde(default)]
    pub transponders: Vec<Transponder>,
}

impl Entity for Satellite {
    const STORE_KEY: &'static str = "satellites";

    fn id(&self) -> &str {
        &self.id
    }
}
