//! Frequency allocation report - assignments per channel and conflict scan

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::views::asset_map;
use crate::entities::{Asset, Frequency};
use crate::reports::BarSeries;

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyRow {
    pub frequency_mhz: f64,
    pub bandwidth_khz: f64,
    pub designation: String,
    pub band: String,
    /// Callsigns of the assigned assets, comma-joined
    pub assigned_to: String,
    pub link_ids: String,
    pub classification: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyConflict {
    pub freq1: String,
    pub freq2: String,
    pub frequency_mhz: f64,
    pub overlap: bool,
}

#[derive(Debug, Serialize)]
pub struct FrequencyReport {
    pub rows: Vec<FrequencyRow>,
    /// Frequency count per band
    pub chart: Vec<BarSeries>,
    pub conflicts: Vec<FrequencyConflict>,
    pub bands: Vec<String>,
    pub generated: DateTime<Utc>,
}

pub fn generate(freqs: &[Frequency], assets: &[Asset], generated: DateTime<Utc>) -> FrequencyReport {
    let assets = asset_map(assets);
    let bands: Vec<String> = freqs
        .iter()
        .map(|f| f.band.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = freqs
        .iter()
        .map(|f| FrequencyRow {
            frequency_mhz: f.frequency_mhz,
            bandwidth_khz: f.bandwidth_khz,
            designation: f.designation.clone(),
            band: f.band.clone(),
            assigned_to: f
                .assigned_to
                .iter()
                .map(|id| {
                    assets
                        .get(id.as_str())
                        .map(|a| a.callsign.clone())
                        .unwrap_or_else(|| id.clone())
                })
                .collect::<Vec<_>>()
                .join(", "),
            link_ids: f.link_ids.join(", "),
            classification: f.classification.clone(),
            notes: f.notes.clone(),
        })
        .collect();

    let chart = vec![BarSeries {
        name: "frequencies".to_string(),
        x: bands.clone(),
        y: bands
            .iter()
            .map(|b| freqs.iter().filter(|f| &f.band == b).count())
            .collect(),
    }];

    // Proximity heuristic, deliberately asymmetric: a pair conflicts when
    // the spacing is inside half the FIRST frequency's bandwidth (in MHz).
    // Not a true spectral-overlap test.
    let mut conflicts = Vec::new();
    for i in 0..freqs.len() {
        for j in (i + 1)..freqs.len() {
            let spacing = (freqs[i].frequency_mhz - freqs[j].frequency_mhz).abs();
            if spacing < freqs[i].bandwidth_khz / 2000.0 {
                conflicts.push(FrequencyConflict {
                    freq1: freqs[i].designation.clone(),
                    freq2: freqs[j].designation.clone(),
                    frequency_mhz: freqs[i].frequency_mhz,
                    overlap: true,
                });
            }
        }
    }

    FrequencyReport {
        rows,
        chart,
        conflicts,
        bands,
        generated,
    }
}
