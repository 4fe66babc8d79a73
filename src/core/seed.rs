//! Embedded seed data
//!
//! The seed collections ship inside the binary as JSON files and decode
//! through the same serde types the persistence layer uses, so
//! `reset_to_seed` restores exactly what a fresh install starts with.

use rust_embed::Embed;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::entities::{Asset, CommLink, Frequency, Satellite};

#[derive(Embed)]
#[folder = "seed/"]
struct SeedFiles;

/// Errors decoding embedded seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file '{0}' is missing from the build")]
    Missing(&'static str),

    #[error("seed file '{file}' is not valid: {reason}")]
    Invalid { file: &'static str, reason: String },
}

/// The full seed snapshot of all four collections
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSnapshot {
    pub assets: Vec<Asset>,
    pub commlinks: Vec<CommLink>,
    pub satellites: Vec<Satellite>,
    pub frequencies: Vec<Frequency>,
}

impl SeedSnapshot {
    /// Decode the embedded seed files
    pub fn load() -> Result<Self, SeedError> {
        Ok(Self {
            assets: load_file("assets.json")?,
            commlinks: load_file("commlinks.json")?,
            satellites: load_file("satellites.json")?,
            frequencies: load_file("frequencies.json")?,
        })
    }
}

fn load_file<T: DeserializeOwned>(file: &'static str) -> Result<Vec<T>, SeedError> {
    let raw = SeedFiles::get(file).ok_or(SeedError::Missing(file))?;
    serde_json::from_slice(&raw.data).map_err(|e| SeedError::Invalid {
        file,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_decodes() {
        let seed = SeedSnapshot::load().unwrap();
        assert_eq!(seed.assets.len(), 10);
        assert_eq!(seed.commlinks.len(), 11);
        assert_eq!(seed.satellites.len(), 4);
        assert_eq!(seed.frequencies.len(), 10);
    }

    #[test]
    fn test_seed_links_are_symmetric() {
        // Seed data quality gate: the shipped snapshot already satisfies
        // the asset<->commlink invariant the store maintains at runtime.
        let seed = SeedSnapshot::load().unwrap();

        for asset in &seed.assets {
            for link_id in &asset.commlinks {
                let link = seed
                    .commlinks
                    .iter()
                    .find(|l| &l.id == link_id)
                    .unwrap_or_else(|| panic!("{} names unknown {}", asset.id, link_id));
                assert!(
                    link.endpoints.contains(&asset.id),
                    "{} lists {} but is not an endpoint",
                    asset.id,
                    link_id
                );
            }
        }

        for link in &seed.commlinks {
            assert_eq!(link.endpoints.len(), 2, "{} endpoint count", link.id);
            for endpoint in &link.endpoints {
                let asset = seed
                    .assets
                    .iter()
                    .find(|a| &a.id == endpoint)
                    .unwrap_or_else(|| panic!("{} names unknown {}", link.id, endpoint));
                assert!(
                    asset.commlinks.contains(&link.id),
                    "{} missing from {}",
                    link.id,
                    endpoint
                );
            }
        }
    }

    #[test]
    fn test_seed_nullables_survive() {
        let seed = SeedSnapshot::load().unwrap();

        // Iridium (LEO) has no geostationary slot
        let iridium = seed.satellites.iter().find(|s| s.id == "sat-002").unwrap();
        assert_eq!(iridium.position_deg_w, None);

        // link-005 is unmeasured across all three quality metrics
        let vhf = seed.commlinks.iter().find(|l| l.id == "link-005").unwrap();
        assert_eq!(vhf.quality.signal_strength_dbm, None);
        assert_eq!(vhf.quality.ber, None);
        assert_eq!(vhf.quality.latency_ms, None);
    }
}
