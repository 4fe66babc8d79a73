//! Core module - store engine, views, persistence, identity

pub mod config;
pub mod entity;
pub mod identity;
pub mod persist;
pub mod seed;
pub mod store;
pub mod views;

pub use config::Config;
pub use entity::Entity;
pub use identity::EntityKind;
pub use persist::{KeyValueStore, MemoryStore, PersistError, SqliteStore};
pub use seed::{SeedError, SeedSnapshot};
pub use store::{Collection, CommsStore, StoreError};
pub use views::{Selection, Stats, ViewCache};
