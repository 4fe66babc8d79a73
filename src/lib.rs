//! GeoComm: communications asset tracking toolkit
//!
//! A relational in-memory store for communication assets and links with
//! referential integrity, derived views, transparent persistence,
//! contact-directory XML interchange and report aggregation.

pub mod cli;
pub mod core;
pub mod entities;
pub mod interchange;
pub mod reports;
