//! Compute layer for spatial lookups.
//!
//! This module separates neighbour search from the statistics built on it.
//! It provides:
//! - An R-tree handle over record bounding boxes
//! - Radius neighbour search with exact distance filtering
//! - Input validation shared by the intensity calculators

pub mod spatial;
pub mod validation;
