//! # Agronomy Reference Data
//!
//! Static tables behind the diagnosis and crop-rotation features.
//!
//! - [`labels`]: the PlantVillage class table and label parsing
//! - [`catalog`]: built-in disease info, default pesticides, scientific names
//! - [`rotation`]: soil-keyed rotation planner

pub mod labels;
pub mod catalog;
pub mod rotation;

pub use labels::{parse_label, ParsedLabel, CLASS_LABELS};
pub use rotation::{plan_rotation, SoilType};
