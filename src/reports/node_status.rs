//! Node status report - per-asset link health and platform/status breakdown

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::views::link_map;
use crate::entities::{Asset, AssetStatus, CommLink, LinkStatus, Platform};
use crate::reports::BarSeries;

#[derive(Debug, Clone, Serialize)]
pub struct NodeStatusRow {
    pub name: String,
    pub callsign: String,
    pub platform: Platform,
    pub status: AssetStatus,
    pub active_links: usize,
    pub total_links: usize,
    pub last_update: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct NodeStatusReport {
    pub rows: Vec<NodeStatusRow>,
    /// Grouped bars: one series per asset status, categories are platforms
    pub chart: Vec<BarSeries>,
    pub generated: DateTime<Utc>,
}

pub fn generate(assets: &[Asset], links: &[CommLink], generated: DateTime<Utc>) -> NodeStatusReport {
    let links = link_map(links);

    let rows = assets
        .iter()
        .map(|a| NodeStatusRow {
            name: a.name.clone(),
            callsign: a.callsign.clone(),
            platform: a.platform,
            status: a.status,
            active_links: a
                .commlinks
                .iter()
                .filter(|id| {
                    links
                        .get(id.as_str())
                        .is_some_and(|l| l.status == LinkStatus::Active)
                })
                .count(),
            total_links: a.commlinks.len(),
            last_update: a.position.timestamp,
            lat: a.position.lat,
            lon: a.position.lon,
        })
        .collect();

    let platforms: Vec<String> = Platform::all().iter().map(|p| p.to_string()).collect();
    let chart = AssetStatus::all()
        .iter()
        .map(|status| BarSeries {
            name: capitalize(status.as_str()),
            x: platforms.clone(),
            y: Platform::all()
                .iter()
                .map(|p| {
                    assets
                        .iter()
                        .filter(|a| a.platform == *p && a.status == *status)
                        .count()
                })
                .collect(),
        })
        .collect();

    NodeStatusReport {
        rows,
        chart,
        generated,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
