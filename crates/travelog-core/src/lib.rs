//! Core types and trait definitions for the Travelog travel-history tracker.
//!
//! This crate has no HTTP or database dependencies. The
//! reporting engine is a set of pure functions over snapshots of visits and
//! places; the only code that talks to storage does so through the
//! [`store::TravelStore`] trait.

pub mod date;
pub mod error;
pub mod place;
pub mod report;
pub mod service;
pub mod store;
pub mod visit;

pub use error::{Error, Result};
