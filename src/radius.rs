//! Disk radius selection for the circle policy.
//!
//! A fixed diameter `d` gives `floor(d / 2)`. `Automatic` takes the median
//! area of the guide objects and returns the radius of a disk with that
//! area, `floor(sqrt(median / π))`. One radius is shared by every cell.
use crate::error::{GridError, Result};
use crate::image::LabelImage;
use crate::regions::RegionMeasurer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const AUTOMATIC: &str = "Automatic";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiameterMode {
    /// Derive the radius from the median guide object area.
    Automatic,
    /// Explicit diameter in pixels.
    Fixed(u32),
}

impl DiameterMode {
    pub fn needs_guide_objects(self) -> bool {
        matches!(self, DiameterMode::Automatic)
    }
}

impl FromStr for DiameterMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if token.eq_ignore_ascii_case(AUTOMATIC) {
            return Ok(DiameterMode::Automatic);
        }
        token
            .parse::<u32>()
            .map(DiameterMode::Fixed)
            .map_err(|_| GridError::InvalidDiameter(s.to_string()))
    }
}

impl TryFrom<String> for DiameterMode {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for DiameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiameterMode::Automatic => f.write_str(AUTOMATIC),
            DiameterMode::Fixed(d) => write!(f, "{d}"),
        }
    }
}

impl From<DiameterMode> for String {
    fn from(mode: DiameterMode) -> Self {
        mode.to_string()
    }
}

/// Median of a non-empty sample; the mean of the two middle values for even
/// lengths.
fn median(values: &mut [usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    } else {
        values[mid] as f64
    })
}

/// Radius of the disk whose area equals the median component area.
pub fn radius_from_areas(areas: &[usize]) -> Result<u32> {
    let mut areas = areas.to_vec();
    let median = median(&mut areas).ok_or(GridError::NoComponents)?;
    Ok((median / std::f64::consts::PI).sqrt().floor() as u32)
}

/// Resolve the shared disk radius for one invocation.
pub fn estimate_radius<M>(
    mode: DiameterMode,
    guide: Option<&LabelImage>,
    measurer: &M,
) -> Result<u32>
where
    M: RegionMeasurer + ?Sized,
{
    match mode {
        DiameterMode::Fixed(d) => Ok(d / 2),
        DiameterMode::Automatic => {
            let guide = guide.ok_or(GridError::MissingGuideObjects("automatic diameter"))?;
            let areas: Vec<usize> = measurer
                .properties(guide)
                .values()
                .map(|p| p.area)
                .collect();
            let radius = radius_from_areas(&areas)?;
            debug!(
                "estimated radius {radius} from {} guide components",
                areas.len()
            );
            Ok(radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::MomentMeasurer;

    #[test]
    fn median_area_radius() {
        assert_eq!(radius_from_areas(&[50, 200, 98]).unwrap(), 5);
        // even count: median (98 + 200) / 2 = 149 -> sqrt(47.4) = 6.88
        assert_eq!(radius_from_areas(&[50, 200, 98, 300]).unwrap(), 6);
    }

    #[test]
    fn no_components_is_a_precondition_failure() {
        assert_eq!(radius_from_areas(&[]), Err(GridError::NoComponents));
        let empty = LabelImage::new(8, 8);
        assert_eq!(
            estimate_radius(DiameterMode::Automatic, Some(&empty), &MomentMeasurer),
            Err(GridError::NoComponents)
        );
    }

    #[test]
    fn automatic_without_guide_is_rejected() {
        assert!(matches!(
            estimate_radius(DiameterMode::Automatic, None, &MomentMeasurer),
            Err(GridError::MissingGuideObjects(_))
        ));
    }

    #[test]
    fn fixed_diameter_halves() {
        assert_eq!(
            estimate_radius(DiameterMode::Fixed(11), None, &MomentMeasurer).unwrap(),
            5
        );
    }

    #[test]
    fn automatic_measures_guide_objects() {
        let mut guide = LabelImage::new(20, 20);
        // 7x7 = 49 px -> sqrt(49 / pi) = 3.95
        for y in 2..9 {
            for x in 2..9 {
                let i = guide.idx(x, y);
                guide.data[i] = 3;
            }
        }
        assert_eq!(
            estimate_radius(DiameterMode::Automatic, Some(&guide), &MomentMeasurer).unwrap(),
            3
        );
    }

    #[test]
    fn parses_tokens() {
        assert_eq!("Automatic".parse::<DiameterMode>(), Ok(DiameterMode::Automatic));
        assert_eq!(" 35 ".parse::<DiameterMode>(), Ok(DiameterMode::Fixed(35)));
        assert!(matches!(
            "big".parse::<DiameterMode>(),
            Err(GridError::InvalidDiameter(_))
        ));
        let json = serde_json::to_string(&DiameterMode::Fixed(12)).unwrap();
        assert_eq!(json, "\"12\"");
    }
}
