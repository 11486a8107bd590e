//! Pipeline conversions module
//!
//! This module contains the per-file CFA to R/G/B extraction and the
//! provenance metadata it stamps on every plane.

mod cfa_to_rgb;
pub mod provenance;


pub use cfa_to_rgb::CfaToRgbPipeline;
