//! Link availability report - uptime derived from schedule and status

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{CommLink, LinkStatus, LinkType};

/// Hours assumed for links with no schedule
const DEFAULT_SCHEDULED_HOURS: f64 = 24.0;

/// Share of scheduled time a degraded link is counted available
const DEGRADED_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub subtype: Option<String>,
    pub status: LinkStatus,
    pub scheduled_hours: f64,
    pub available_hours: f64,
    pub unavailable_hours: f64,
    pub uptime_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilitySummary {
    pub mean_uptime: f64,
    pub best_link: Option<String>,
    pub best_uptime: f64,
    pub worst_link: Option<String>,
    pub worst_uptime: f64,
    pub total_downtime_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityReport {
    pub rows: Vec<AvailabilityRow>,
    pub summary: AvailabilitySummary,
    pub generated: DateTime<Utc>,
}

pub fn generate(links: &[CommLink], generated: DateTime<Utc>) -> AvailabilityReport {
    let rows: Vec<AvailabilityRow> = links
        .iter()
        .map(|l| {
            let scheduled = l
                .schedule
                .as_ref()
                .map(|s| (s.end - s.start).num_milliseconds() as f64 / 3_600_000.0)
                .unwrap_or(DEFAULT_SCHEDULED_HOURS);
            let available = match l.status {
                LinkStatus::Active => scheduled,
                LinkStatus::Degraded => scheduled * DEGRADED_FACTOR,
                LinkStatus::Unavailable | LinkStatus::Scheduled => 0.0,
            };
            let uptime = if scheduled > 0.0 {
                available / scheduled * 100.0
            } else {
                0.0
            };

            AvailabilityRow {
                id: l.id.clone(),
                name: l.name.clone(),
                link_type: l.link_type,
                subtype: l.subtype.clone(),
                status: l.status,
                scheduled_hours: round1(scheduled),
                available_hours: round1(available),
                unavailable_hours: round1(scheduled - available),
                uptime_percent: round1(uptime),
            }
        })
        .collect();

    let summary = summarize(&rows);

    AvailabilityReport {
        rows,
        summary,
        generated,
    }
}

fn summarize(rows: &[AvailabilityRow]) -> AvailabilitySummary {
    if rows.is_empty() {
        return AvailabilitySummary {
            mean_uptime: 0.0,
            best_link: None,
            best_uptime: 0.0,
            worst_link: None,
            worst_uptime: 0.0,
            total_downtime_hours: 0.0,
        };
    }

    let mean = rows.iter().map(|r| r.uptime_percent).sum::<f64>() / rows.len() as f64;

    // ties keep the earliest row
    let best = rows
        .iter()
        .skip(1)
        .fold(&rows[0], |best, r| {
            if r.uptime_percent > best.uptime_percent {
                r
            } else {
                best
            }
        });
    let worst = rows
        .iter()
        .skip(1)
        .fold(&rows[0], |worst, r| {
            if r.uptime_percent < worst.uptime_percent {
                r
            } else {
                worst
            }
        });

    AvailabilitySummary {
        mean_uptime: round1(mean),
        best_link: Some(best.name.clone()),
        best_uptime: best.uptime_percent,
        worst_link: Some(worst.name.clone()),
        worst_uptime: worst.uptime_percent,
        total_downtime_hours: round1(rows.iter().map(|r| r.unavailable_hours).sum()),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
