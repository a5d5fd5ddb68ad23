//! Delivery trips: the single record category feeding both the driver and
//! vendor payment views.
//!
//! This module contains the trip model and draft validation, the wire shape
//! spoken by the remote `/tripdata` endpoints, and the service that wraps
//! the remote CRUD calls and the receipt image upload.

mod core;
mod service;

pub use self::core::{Trip, TripDraft, bags_for_wayment};
pub use service::TripService;

pub(crate) use self::core::TripWire;
