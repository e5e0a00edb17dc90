//! NetBox inventory client.
//!
//! Fetches devices and their interfaces from the NetBox REST API, following
//! pagination links, and maps wire records into [`netcheck_core::Device`].

pub mod client;
pub mod mapper;
pub mod model;

pub use client::{FetchError, InventorySource, NetboxClient};
