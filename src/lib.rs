//! Back-office client for the hotel booking backend.
//!
//! Paginated admin lists (bookings, check-ins, rooms) with filters,
//! infinite scroll and in-place mutation reconciliation, plus the
//! browser-facing admin relay.

pub mod api;
pub mod config;
pub mod filter;
pub mod gateway;
pub mod list;
pub mod logging;
pub mod models;
pub mod mutation;
pub mod mvi;
pub mod relay;
pub mod resource;
pub mod scroll;
pub mod view;
