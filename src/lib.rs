#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod assemble;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod image;
pub mod outline;
pub mod pipeline;
pub mod store;

// Building blocks – public so callers can swap in their own capabilities.
pub mod radius;
pub mod regions;
pub mod shape;

// --- High-level re-exports -------------------------------------------------

pub use crate::assemble::{assemble, Assembly, AssemblyStats};
pub use crate::config::IdentifySettings;
pub use crate::error::{GridError, Result};
pub use crate::grid::{CellExtent, GridGeometry, SpotNumbering};
pub use crate::outline::{encode_outline, OutlineMasks};
pub use crate::pipeline::{DisplayFrame, IdentifyObjectsInGrid};
pub use crate::radius::DiameterMode;
pub use crate::shape::{ShapeKind, ShapePolicy};
pub use crate::store::{Entity, MemoryStore, ObjectStore};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use grid_objects::prelude::*;
///
/// # fn main() -> Result<(), GridError> {
/// let grid = GridGeometry::new((200, 100), (2, 4), (50, 50), (25, 25), SpotNumbering::RowsFirst);
/// let mut store = MemoryStore::new().with("Grid", Entity::Grid(grid));
///
/// let module = IdentifyObjectsInGrid::new(IdentifySettings::new("Grid", "Spots", ShapeKind::Rectangle));
/// let report = module.run(&mut store)?;
/// println!("cells={} labelled_px={}", report.stats.cells, report.stats.labelled_pixels);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, LabelImage, Mask};
    pub use crate::{
        DiameterMode, Entity, GridError, GridGeometry, IdentifyObjectsInGrid, IdentifySettings,
        MemoryStore, ObjectStore, ShapeKind, SpotNumbering,
    };
}
