//! Derived views over store snapshots
//!
//! Everything here is a pure function of a snapshot plus UI selection
//! state; nothing holds a mutable reference into the store. `ViewCache`
//! adds optional memoization keyed on the store's collection version
//! counters for consumers that poll.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::core::store::{Collection, CommsStore};
use crate::entities::{Asset, AssetStatus, CommLink, LinkStatus, LinkType, Platform};

/// UI selection state feeding the filtered views
#[derive(Debug, Clone)]
pub struct Selection {
    pub visible_platforms: BTreeSet<Platform>,
    pub visible_link_types: BTreeSet<LinkType>,
    pub selected_asset: Option<String>,
    pub selected_link: Option<String>,
    pub search: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            visible_platforms: Platform::all().iter().copied().collect(),
            visible_link_types: LinkType::all().iter().copied().collect(),
            selected_asset: None,
            selected_link: None,
            search: String::new(),
        }
    }
}

impl Selection {
    /// Toggle a platform in or out of the visible set
    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.visible_platforms.remove(&platform) {
            self.visible_platforms.insert(platform);
        }
    }

    /// Toggle a link type in or out of the visible set
    pub fn toggle_link_type(&mut self, link_type: LinkType) {
        if !self.visible_link_types.remove(&link_type) {
            self.visible_link_types.insert(link_type);
        }
    }
}

/// Assets whose platform is currently visible
pub fn filtered_assets<'a>(assets: &'a [Asset], selection: &Selection) -> Vec<&'a Asset> {
    assets
        .iter()
        .filter(|a| selection.visible_platforms.contains(&a.platform))
        .collect()
}

/// Links whose type is visible AND whose both endpoints currently exist.
///
/// This is the authoritative dangling-link guard: existence is checked at
/// read time rather than enforced destructively at write time, so a
/// transient gap between an asset removal and its cascade is never
/// observable here.
pub fn filtered_links<'a>(
    assets: &[Asset],
    links: &'a [CommLink],
    selection: &Selection,
) -> Vec<&'a CommLink> {
    let live: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    links
        .iter()
        .filter(|l| selection.visible_link_types.contains(&l.link_type))
        .filter(|l| l.endpoints.iter().all(|e| live.contains(e.as_str())))
        .collect()
}

/// id -> asset lookup map; O(1) lookups for render loops
pub fn asset_map(assets: &[Asset]) -> HashMap<&str, &Asset> {
    assets.iter().map(|a| (a.id.as_str(), a)).collect()
}

/// id -> link lookup map
pub fn link_map(links: &[CommLink]) -> HashMap<&str, &CommLink> {
    links.iter().map(|l| (l.id.as_str(), l)).collect()
}

/// Assets matching the selection's search query (case-insensitive on
/// name and callsign); an empty query matches everything.
pub fn search_assets<'a>(assets: &'a [Asset], selection: &Selection) -> Vec<&'a Asset> {
    let query = selection.search.trim().to_lowercase();
    if query.is_empty() {
        return assets.iter().collect();
    }
    assets
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&query) || a.callsign.to_lowercase().contains(&query)
        })
        .collect()
}

/// The currently selected asset, if any and still present
pub fn selected_asset<'a>(assets: &'a [Asset], selection: &Selection) -> Option<&'a Asset> {
    let id = selection.selected_asset.as_deref()?;
    assets.iter().find(|a| a.id == id)
}

/// The currently selected link, if any and still present
pub fn selected_link<'a>(links: &'a [CommLink], selection: &Selection) -> Option<&'a CommLink> {
    let id = selection.selected_link.as_deref()?;
    links.iter().find(|l| l.id == id)
}

/// Asset counts by platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub site: usize,
    pub mobile: usize,
    pub aircraft: usize,
}

/// Link counts by technology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkTypeCounts {
    pub satellite: usize,
    pub los_radio: usize,
    pub voip: usize,
    pub xmpp: usize,
}

/// Aggregate counters over the current assets and links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_assets: usize,
    pub active_assets: usize,
    pub total_links: usize,
    pub active_links: usize,
    pub degraded_links: usize,
    pub unavailable_links: usize,
    pub by_platform: PlatformCounts,
    pub by_link_type: LinkTypeCounts,
}

/// Recompute the full stats summary from a snapshot
pub fn stats(assets: &[Asset], links: &[CommLink]) -> Stats {
    let mut s = Stats {
        total_assets: assets.len(),
        total_links: links.len(),
        ..Default::default()
    };

    for asset in assets {
        if asset.status == AssetStatus::Active {
            s.active_assets += 1;
        }
        match asset.platform {
            Platform::Site => s.by_platform.site += 1,
            Platform::Mobile => s.by_platform.mobile += 1,
            Platform::Aircraft => s.by_platform.aircraft += 1,
        }
    }

    for link in links {
        match link.status {
            LinkStatus::Active => s.active_links += 1,
            LinkStatus::Degraded => s.degraded_links += 1,
            LinkStatus::Unavailable => s.unavailable_links += 1,
            LinkStatus::Scheduled => {}
        }
        match link.link_type {
            LinkType::Satellite => s.by_link_type.satellite += 1,
            LinkType::LosRadio => s.by_link_type.los_radio += 1,
            LinkType::Voip => s.by_link_type.voip += 1,
            LinkType::Xmpp => s.by_link_type.xmpp += 1,
        }
    }

    s
}

/// Memoizes stats on the (assets, commlinks) version pair so unchanged
/// dependencies skip the recompute.
#[derive(Debug, Default)]
pub struct ViewCache {
    stats_key: Option<(u64, u64)>,
    stats: Stats,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stats, recomputed only when assets or links changed
    pub fn stats(&mut self, store: &CommsStore) -> &Stats {
        let key = (
            store.version(Collection::Assets),
            store.version(Collection::CommLinks),
        );
        if self.stats_key != Some(key) {
            self.stats = stats(store.assets(), store.commlinks());
            self.stats_key = Some(key);
        }
        &self.stats
    }
}
