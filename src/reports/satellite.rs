//! Satellite usage report - transponder utilization per bird

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::views::link_map;
use crate::entities::{CommLink, LinkStatus, OrbitType, Satellite};

#[derive(Debug, Clone, Serialize)]
pub struct TransponderRow {
    pub id: String,
    pub band: String,
    pub bandwidth_mhz: f64,
    pub allocated_links: usize,
    pub active_links: usize,
    /// Share of allocated links currently active, in percent
    pub utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SatelliteRow {
    pub id: String,
    pub name: String,
    pub orbit_type: OrbitType,
    pub provider: String,
    pub status: String,
    pub total_transponders: usize,
    pub transponders: Vec<TransponderRow>,
}

/// Flat per-transponder view for gauge rendering and CSV export
#[derive(Debug, Clone, Serialize)]
pub struct GaugeRow {
    pub satellite: String,
    pub transponder: String,
    pub utilization: f64,
    pub band: String,
}

#[derive(Debug, Serialize)]
pub struct SatelliteReport {
    pub rows: Vec<SatelliteRow>,
    pub gauges: Vec<GaugeRow>,
    pub generated: DateTime<Utc>,
}

pub fn generate(sats: &[Satellite], links: &[CommLink], generated: DateTime<Utc>) -> SatelliteReport {
    let links = link_map(links);

    let rows: Vec<SatelliteRow> = sats
        .iter()
        .map(|sat| {
            let transponders = sat
                .transponders
                .iter()
                .map(|t| {
                    let active = t
                        .allocated_to
                        .iter()
                        .filter(|id| {
                            links
                                .get(id.as_str())
                                .is_some_and(|l| l.status == LinkStatus::Active)
                        })
                        .count();
                    // allocation lists may reference removed links; an empty
                    // allocation reads as 0% rather than dividing by zero
                    let utilization = if t.allocated_to.is_empty() {
                        0.0
                    } else {
                        (active as f64 / t.allocated_to.len().max(1) as f64) * 100.0
                    };
                    TransponderRow {
                        id: t.id.clone(),
                        band: t.band.clone(),
                        bandwidth_mhz: t.bandwidth_mhz,
                        allocated_links: t.allocated_to.len(),
                        active_links: active,
                        utilization,
                    }
                })
                .collect::<Vec<_>>();

            SatelliteRow {
                id: sat.id.clone(),
                name: sat.name.clone(),
                orbit_type: sat.orbit_type,
                provider: sat.provider.clone(),
                status: sat.status.clone(),
                total_transponders: sat.transponders.len(),
                transponders,
            }
        })
        .collect();

    let gauges = rows
        .iter()
        .flat_map(|sat| {
            sat.transponders.iter().map(|t| GaugeRow {
                satellite: sat.name.clone(),
                transponder: t.id.clone(),
                utilization: t.utilization,
                band: t.band.clone(),
            })
        })
        .collect();

    SatelliteReport {
        rows,
        gauges,
        generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommsStore;

    fn now() -> DateTime<Utc> {
        "2026-08-07T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_utilization_over_seed() {
        let store = CommsStore::in_memory().unwrap();
        let report = generate(store.satellites(), store.commlinks(), now());

        // MUOS-5/T3-K carries link-001 which is active
        let muos = report.rows.iter().find(|s| s.name == "MUOS-5").unwrap();
        assert_eq!(muos.transponders[0].utilization, 100.0);

        // WGS-6/X-2 carries only link-011 which is unavailable
        let wgs = report.rows.iter().find(|s| s.name == "WGS-6").unwrap();
        let x2 = wgs.transponders.iter().find(|t| t.id == "X-2").unwrap();
        assert_eq!(x2.active_links, 0);
        assert_eq!(x2.utilization, 0.0);

        // WGS-6/Ka-1 has no allocations at all: 0%, no division by zero
        let ka1 = wgs.transponders.iter().find(|t| t.id == "Ka-1").unwrap();
        assert_eq!(ka1.allocated_links, 0);
        assert_eq!(ka1.utilization, 0.0);
    }

    #[test]
    fn test_stale_allocations_read_as_inactive() {
        let mut store = CommsStore::in_memory().unwrap();
        // removing the link does not cascade into transponder allocations
        store.remove_commlink("link-001");

        let report = generate(store.satellites(), store.commlinks(), now());
        let muos = report.rows.iter().find(|s| s.name == "MUOS-5").unwrap();
        assert_eq!(muos.transponders[0].allocated_links, 1);
        assert_eq!(muos.transponders[0].active_links, 0);
        assert_eq!(muos.transponders[0].utilization, 0.0);
    }

    #[test]
    fn test_gauges_flatten_all_transponders() {
        let store = CommsStore::in_memory().unwrap();
        let report = generate(store.satellites(), store.commlinks(), now());

        // seed carries 5 transponders across 4 satellites
        assert_eq!(report.gauges.len(), 5);
        assert!(report
            .gauges
            .iter()
            .any(|g| g.satellite == "WGS-6" && g.transponder == "Ka-1"));

        let csv = crate::reports::to_csv(&report.gauges).unwrap();
        assert!(csv.starts_with("satellite,transponder,utilization,band"));
    }
}
