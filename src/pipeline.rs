//! End-to-end assembly against an object store.
//!
//! Reads the grid (and guide objects when the configuration needs them),
//! resolves the disk radius and shape policy, assembles the cells, encodes
//! the outline and finally publishes the results. Every failure happens
//! before the first write, so the store is never left half-updated.
use crate::assemble::{assemble, Assembly};
use crate::config::IdentifySettings;
use crate::diagnostics::{AssemblyReport, GridDescriptor, TimingBreakdown};
use crate::error::{GridError, Result};
use crate::grid::Gridlines;
use crate::image::render::render_label_matrix;
use crate::image::{LabelImage, Mask};
use crate::outline::encode_outline;
use crate::radius::estimate_radius;
use crate::regions::{ComponentLabeler, MomentMeasurer, RegionMeasurer, TwoPassLabeler};
use crate::shape::{NaturalInputs, ShapeKind, ShapePolicy};
use crate::store::{Entity, ObjectStore};
use log::{debug, info};

/// Finished artifacts handed to a display observer after assembly.
#[derive(Clone, Copy, Debug)]
pub struct DisplayFrame<'a> {
    pub labels: &'a LabelImage,
    pub overlay: &'a Mask,
    pub gridlines: &'a Gridlines,
}

/// Grid object identification with pluggable region capabilities.
#[derive(Clone, Debug)]
pub struct IdentifyObjectsInGrid<L = TwoPassLabeler, M = MomentMeasurer> {
    settings: IdentifySettings,
    labeler: L,
    measurer: M,
}

impl IdentifyObjectsInGrid {
    pub fn new(settings: IdentifySettings) -> Self {
        Self::with_regions(settings, TwoPassLabeler::default(), MomentMeasurer)
    }
}

struct Computed {
    assembly: Assembly,
    radius: Option<u32>,
    gridlines: Gridlines,
    descriptor: GridDescriptor,
}

impl<L: ComponentLabeler, M: RegionMeasurer> IdentifyObjectsInGrid<L, M> {
    pub fn with_regions(settings: IdentifySettings, labeler: L, measurer: M) -> Self {
        Self {
            settings,
            labeler,
            measurer,
        }
    }

    pub fn run(&self, store: &mut dyn ObjectStore) -> Result<AssemblyReport> {
        self.run_with_observer(store, |_| {})
    }

    /// Run and hand the finished labels, overlay and gridlines to `observer`
    /// before they are published.
    pub fn run_with_observer<F>(
        &self,
        store: &mut dyn ObjectStore,
        observer: F,
    ) -> Result<AssemblyReport>
    where
        F: FnOnce(&DisplayFrame<'_>),
    {
        let settings = &self.settings;
        let mut timing = TimingBreakdown::default();

        let computed = self.compute(&*store, &mut timing)?;
        let masks = timing.time("outline", || {
            encode_outline(
                &computed.assembly.labels,
                computed.descriptor.rows,
                computed.descriptor.cols,
            )
        });
        let overlay = masks.overlay();

        observer(&DisplayFrame {
            labels: &computed.assembly.labels,
            overlay: &overlay,
            gridlines: &computed.gridlines,
        });

        let mut artifacts = Vec::new();
        if let Some(matrix) = &settings.label_matrix {
            if let Some(name) = matrix.name.get() {
                let rendered = render_label_matrix(&computed.assembly.labels, matrix.mode);
                store.put(name, Entity::Rendered(rendered));
                artifacts.push(name.to_string());
            }
        }
        let outline_pixels = overlay.count_where(|v| v);
        if let Some(name) = settings.outline_name.get() {
            store.put(name, Entity::Outline(overlay));
            artifacts.push(name.to_string());
        }
        let Computed {
            assembly,
            radius,
            descriptor,
            ..
        } = computed;
        store.put(&settings.objects_name, Entity::Labels(assembly.labels));
        artifacts.insert(0, settings.objects_name.clone());

        info!(
            "{}: {} cells as {} ({} labelled px)",
            settings.objects_name,
            assembly.stats.cells,
            settings.shape,
            assembly.stats.labelled_pixels
        );

        Ok(AssemblyReport {
            objects_name: settings.objects_name.clone(),
            shape: settings.shape,
            diameter: settings.diameter,
            radius,
            grid: descriptor,
            stats: assembly.stats,
            outline_pixels,
            artifacts,
            timing,
        })
    }

    fn guide<'s>(&self, store: &'s dyn ObjectStore) -> Result<Option<&'s LabelImage>> {
        if !self.settings.needs_guide_objects() {
            return Ok(None);
        }
        let what = match self.settings.shape {
            ShapeKind::Natural => "natural shape",
            _ => "automatic diameter",
        };
        let name = self
            .settings
            .guide_objects_name
            .as_deref()
            .ok_or(GridError::MissingGuideObjects(what))?;
        store.labels(name).map(Some)
    }

    fn compute(&self, store: &dyn ObjectStore, timing: &mut TimingBreakdown) -> Result<Computed> {
        let settings = &self.settings;
        let grid = store.grid(&settings.grid_name)?;
        let guide = self.guide(store)?;

        let radius = match settings.shape {
            ShapeKind::Circle => Some(timing.time("radius", || {
                estimate_radius(settings.diameter, guide, &self.measurer)
            })?),
            _ => None,
        };
        let natural = guide.map(|guide| NaturalInputs {
            guide,
            labeler: &self.labeler,
            measurer: &self.measurer,
        });
        let policy = ShapePolicy::resolve(settings.shape, radius, natural)?;
        debug!(
            "grid `{}`: {}x{} cells on {}x{} canvas, policy {:?}",
            settings.grid_name,
            grid.rows,
            grid.cols,
            grid.canvas_width,
            grid.canvas_height,
            policy.kind()
        );

        let assembly = timing.time("assemble", || assemble(grid, &policy))?;
        Ok(Computed {
            assembly,
            radius,
            gridlines: grid.gridlines(),
            descriptor: GridDescriptor {
                rows: grid.rows,
                cols: grid.cols,
                canvas_width: grid.canvas_width,
                canvas_height: grid.canvas_height,
            },
        })
    }
}
