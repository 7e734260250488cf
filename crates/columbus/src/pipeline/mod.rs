//! Pipeline module.
//!
//! This module provides the outlier filter and the [`Explorer`] façade that
//! binds every operation to one configuration.

mod builder;
pub mod outliers;

pub use builder::{Explorer, ExplorerBuilder};
pub use outliers::OutlierHandler;
