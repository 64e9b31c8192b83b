//! Flutter-facing bindings for GeoRemind core.

pub mod api;
