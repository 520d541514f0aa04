//! Zeroth and first image moments per label.
use super::{RegionMeasurer, RegionProps, RegionTable};
use crate::image::{ImageView, LabelImage};
use nalgebra::Point2;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default)]
pub struct MomentMeasurer;

impl RegionMeasurer for MomentMeasurer {
    fn properties(&self, labels: &LabelImage) -> RegionTable {
        // id -> (area, sum_x, sum_y)
        let mut acc: BTreeMap<u32, (usize, f64, f64)> = BTreeMap::new();
        for (y, row) in labels.rows().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id == 0 {
                    continue;
                }
                let e = acc.entry(id).or_insert((0, 0.0, 0.0));
                e.0 += 1;
                e.1 += x as f64;
                e.2 += y as f64;
            }
        }
        acc.into_iter()
            .map(|(id, (area, sx, sy))| {
                let n = area as f64;
                (
                    id,
                    RegionProps {
                        area,
                        centroid: Point2::new(sx / n, sy / n),
                    },
                )
            })
            .collect()
    }
}
