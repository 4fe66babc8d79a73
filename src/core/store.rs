//! The relational store engine
//!
//! `CommsStore` exclusively owns the four entity collections and is the
//! only place they are mutated. Mutation entry points take `&mut self`,
//! so the borrow checker serializes writers and observers can never see a
//! half-applied cascade. Every operation leaves the Asset<->CommLink
//! symmetry invariant intact: a link id listed on an asset always names a
//! live link whose endpoints include that asset.

use thiserror::Error;

use crate::core::entity::find_by_id;
use crate::core::persist::{load_collection, save_collection, KeyValueStore};
use crate::core::seed::{SeedError, SeedSnapshot};
use crate::entities::{Asset, CommLink, Frequency, Satellite};

/// Which collection changed, for observers and version queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Assets,
    CommLinks,
    Satellites,
    Frequencies,
}

/// Change notification callback
pub type Observer = Box<dyn FnMut(Collection)>;

/// Errors raised by the mutation API
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("asset is missing an id")]
    MissingAssetId,

    #[error("comm link is missing an id")]
    MissingLinkId,

    #[error("comm link '{id}' must connect exactly two assets, got {got} endpoint(s)")]
    EndpointCount { id: String, got: usize },

    #[error(transparent)]
    Seed(#[from] SeedError),
}

#[derive(Debug, Default, Clone, Copy)]
struct Versions {
    assets: u64,
    commlinks: u64,
    satellites: u64,
    frequencies: u64,
}

/// The relational store owning assets, comm links, satellites and
/// frequencies.
pub struct CommsStore {
    assets: Vec<Asset>,
    commlinks: Vec<CommLink>,
    satellites: Vec<Satellite>,
    frequencies: Vec<Frequency>,
    versions: Versions,
    kv: Option<Box<dyn KeyValueStore>>,
    observers: Vec<Observer>,
}

impl CommsStore {
    /// Open the store over a persistence backend. Each collection hydrates
    /// from its stored blob when one exists, otherwise from the embedded
    /// seed; the seed default is first persisted on the first mutation.
    pub fn open(kv: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let seed = SeedSnapshot::load()?;
        let assets = load_collection(kv.as_ref()).unwrap_or(seed.assets);
        let commlinks = load_collection(kv.as_ref()).unwrap_or(seed.commlinks);
        let satellites = load_collection(kv.as_ref()).unwrap_or(seed.satellites);
        let frequencies = load_collection(kv.as_ref()).unwrap_or(seed.frequencies);

        Ok(Self {
            assets,
            commlinks,
            satellites,
            frequencies,
            versions: Versions::default(),
            kv: Some(kv),
            observers: Vec::new(),
        })
    }

    /// Open a seed-populated store with no persistence backend
    pub fn in_memory() -> Result<Self, StoreError> {
        let seed = SeedSnapshot::load()?;
        Ok(Self {
            assets: seed.assets,
            commlinks: seed.commlinks,
            satellites: seed.satellites,
            frequencies: seed.frequencies,
            versions: Versions::default(),
            kv: None,
            observers: Vec::new(),
        })
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn commlinks(&self) -> &[CommLink] {
        &self.commlinks
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn frequencies(&self) -> &[Frequency] {
        &self.frequencies
    }

    pub fn find_asset(&self, id: &str) -> Option<&Asset> {
        find_by_id(&self.assets, id)
    }

    pub fn find_commlink(&self, id: &str) -> Option<&CommLink> {
        find_by_id(&self.commlinks, id)
    }

    /// Monotonic change counter for a collection, for memoized views
    pub fn version(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Assets => self.versions.assets,
            Collection::CommLinks => self.versions.commlinks,
            Collection::Satellites => self.versions.satellites,
            Collection::Frequencies => self.versions.frequencies,
        }
    }

    /// Register a change observer. Observers run after a mutation has
    /// fully committed, once per changed collection.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Insert the asset, or replace the full record stored under its id.
    /// The `commlinks` list is taken as-is; membership is reconciled by
    /// link-side writes, not here.
    pub fn upsert_asset(&mut self, asset: Asset) -> Result<(), StoreError> {
        if asset.id.is_empty() {
            return Err(StoreError::MissingAssetId);
        }

        match self.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(slot) => *slot = asset,
            None => self.assets.push(asset),
        }
        self.commit(&[Collection::Assets]);
        Ok(())
    }

    /// Remove an asset. Every link that named it as an endpoint is
    /// cascade-deleted (a link cannot survive with one endpoint), and the
    /// deleted link ids are scrubbed from all surviving assets.
    ///
    /// Returns false when no asset with that id exists.
    pub fn remove_asset(&mut self, id: &str) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        if self.assets.len() == before {
            return false;
        }

        let dead: Vec<String> = self
            .commlinks
            .iter()
            .filter(|l| l.endpoints.iter().any(|e| e == id))
            .map(|l| l.id.clone())
            .collect();

        if dead.is_empty() {
            self.commit(&[Collection::Assets]);
        } else {
            self.commlinks.retain(|l| !dead.contains(&l.id));
            for asset in &mut self.assets {
                asset.commlinks.retain(|lid| !dead.contains(lid));
            }
            self.commit(&[Collection::Assets, Collection::CommLinks]);
        }
        true
    }

    /// Insert or replace a comm link, then reconcile endpoint membership:
    /// each endpoint asset lists the link id exactly once (appended if
    /// missing, order otherwise preserved), and assets that are no longer
    /// endpoints after a replace drop the id. This is the single place
    /// the Asset<->CommLink invariant is established after a link-side
    /// write.
    pub fn upsert_commlink(&mut self, link: CommLink) -> Result<(), StoreError> {
        if link.id.is_empty() {
            return Err(StoreError::MissingLinkId);
        }
        if link.endpoints.len() != 2 {
            return Err(StoreError::EndpointCount {
                id: link.id.clone(),
                got: link.endpoints.len(),
            });
        }

        let link_id = link.id.clone();
        let endpoints = link.endpoints.clone();

        match self.commlinks.iter_mut().find(|l| l.id == link.id) {
            Some(slot) => *slot = link,
            None => self.commlinks.push(link),
        }

        let mut assets_changed = false;
        for asset in &mut self.assets {
            let is_endpoint = endpoints.contains(&asset.id);
            let listed = asset.commlinks.iter().filter(|l| **l == link_id).count();

            if is_endpoint && listed == 0 {
                asset.commlinks.push(link_id.clone());
                assets_changed = true;
            } else if is_endpoint && listed > 1 {
                // collapse duplicates, keeping the first occurrence in place
                let mut seen = false;
                asset.commlinks.retain(|l| {
                    if *l == link_id {
                        if seen {
                            return false;
                        }
                        seen = true;
                    }
                    true
                });
                assets_changed = true;
            } else if !is_endpoint && listed > 0 {
                asset.commlinks.retain(|l| *l != link_id);
                assets_changed = true;
            }
        }

        if assets_changed {
            self.commit(&[Collection::CommLinks, Collection::Assets]);
        } else {
            self.commit(&[Collection::CommLinks]);
        }
        Ok(())
    }

    /// Remove a comm link and strip its id from every asset's membership
    /// list. Returns false when no link with that id exists.
    pub fn remove_commlink(&mut self, id: &str) -> bool {
        let before = self.commlinks.len();
        self.commlinks.retain(|l| l.id != id);
        if self.commlinks.len() == before {
            return false;
        }

        let mut assets_changed = false;
        for asset in &mut self.assets {
            let before = asset.commlinks.len();
            asset.commlinks.retain(|lid| lid != id);
            assets_changed |= asset.commlinks.len() != before;
        }

        if assets_changed {
            self.commit(&[Collection::CommLinks, Collection::Assets]);
        } else {
            self.commit(&[Collection::CommLinks]);
        }
        true
    }

    /// Replace all four collections with the embedded seed snapshot.
    pub fn reset_to_seed(&mut self) -> Result<(), StoreError> {
        let seed = SeedSnapshot::load()?;
        self.assets = seed.assets;
        self.commlinks = seed.commlinks;
        self.satellites = seed.satellites;
        self.frequencies = seed.frequencies;
        self.commit(&[
            Collection::Assets,
            Collection::CommLinks,
            Collection::Satellites,
            Collection::Frequencies,
        ]);
        Ok(())
    }

    /// Bump versions, persist the changed collections (best-effort), and
    /// notify observers. Runs only after a mutation is fully applied.
    fn commit(&mut self, changed: &[Collection]) {
        for collection in changed {
            match collection {
                Collection::Assets => self.versions.assets += 1,
                Collection::CommLinks => self.versions.commlinks += 1,
                Collection::Satellites => self.versions.satellites += 1,
                Collection::Frequencies => self.versions.frequencies += 1,
            }
        }

        if let Some(kv) = &self.kv {
            for collection in changed {
                match collection {
                    Collection::Assets => save_collection(kv.as_ref(), &self.assets),
                    Collection::CommLinks => save_collection(kv.as_ref(), &self.commlinks),
                    Collection::Satellites => save_collection(kv.as_ref(), &self.satellites),
                    Collection::Frequencies => save_collection(kv.as_ref(), &self.frequencies),
                }
            }
        }

        // observers are detached while running so they cannot alias self
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            for collection in changed {
                observer(*collection);
            }
        }
        self.observers = observers;
    }
}
