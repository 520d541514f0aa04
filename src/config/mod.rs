//! JSON configuration.
//!
//! `IdentifySettings` are the settings of one grid-object assembly and are
//! independent of where data comes from. `RuntimeConfig` wraps them with the
//! file paths used by the `identify_grid` tool.

pub mod runtime;
pub mod settings;

pub use runtime::{load_config, load_grid, OutputConfig, RuntimeConfig};
pub use settings::{ArtifactName, IdentifySettings, LabelMatrixSettings, DO_NOT_SAVE};
