//! Tested platforms table for docsnip.
//!
//! A project's `ci/options.json` lists the CI matrix: one object per job
//! with an `Image` naming the hosted runner plus other dimensions
//! (architecture, language version, ...). The runner-images readme maps
//! image labels to a display title and a link. This crate joins the two
//! into an HTML table with one row per runner image and the distinct
//! configurations tested on it.
//!
//! Missing data degrades to "unknown" cells instead of failing the table.

mod builder;
mod options;
mod runners;
mod table;

pub use builder::{PlatformsError, TestedVersions};
pub use options::{ConfigKey, Platform, configs_are_equal, group_by_platform, has_config};
pub use runners::{Runner, RunnerCatalog};
pub use table::render_table;

/// Rendered in place of a value that is absent from the data.
pub const UNKNOWN: &str = "unknown";
