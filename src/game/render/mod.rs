//! Game Render Module
//!
//! GPU-ready extract of placed solids. Drawing itself is the host's job.

pub mod instances;

pub use instances::{EntityInstance, extract_instances, instance_bytes};
