use super::timing::TimingBreakdown;
use crate::assemble::AssemblyStats;
use crate::radius::DiameterMode;
use crate::shape::ShapeKind;
use serde::Serialize;

/// Grid shape and canvas of the invocation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDescriptor {
    pub rows: usize,
    pub cols: usize,
    pub canvas_width: usize,
    pub canvas_height: usize,
}

/// Summary of one assembly run, suitable for JSON export.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    pub objects_name: String,
    pub shape: ShapeKind,
    pub diameter: DiameterMode,
    /// Disk radius actually used; only set for circles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    pub grid: GridDescriptor,
    pub stats: AssemblyStats,
    pub outline_pixels: usize,
    /// Names written to the store, in order.
    pub artifacts: Vec<String>,
    pub timing: TimingBreakdown,
}
