//! Entity types owned by the relational store

pub mod asset;
pub mod frequency;
pub mod link;
pub mod satellite;

pub use asset::{
    Asset, AssetMetadata, AssetStatus, CustomService, Platform, Position, VoipService, XmppService,
};
pub use frequency::Frequency;
pub use link::{CommLink, FrequencyInfo, LinkQuality, LinkStatus, LinkType, SatelliteInfo, Schedule};
pub use satellite::{OrbitType, Satellite, Transponder};
