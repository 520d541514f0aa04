use crate::image::render::RenderMode;
use crate::radius::DiameterMode;
use crate::shape::ShapeKind;
use serde::{Deserialize, Serialize};

/// Sentinel that suppresses an optional artifact.
pub const DO_NOT_SAVE: &str = "Do not save";

/// Name of an optional artifact; `None` when it should not be stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ArtifactName(Option<String>);

impl ArtifactName {
    pub fn named(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    pub fn skip() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<String> for ArtifactName {
    fn from(s: String) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(DO_NOT_SAVE) {
            Self(None)
        } else {
            Self(Some(trimmed.to_string()))
        }
    }
}

impl From<ArtifactName> for String {
    fn from(name: ArtifactName) -> Self {
        name.0.unwrap_or_else(|| DO_NOT_SAVE.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatrixSettings {
    pub name: ArtifactName,
    #[serde(default)]
    pub mode: RenderMode,
}

fn default_diameter() -> DiameterMode {
    DiameterMode::Automatic
}

/// Settings of one assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifySettings {
    /// Grid definition to read.
    pub grid_name: String,
    /// Name under which the assembled objects are stored.
    pub objects_name: String,
    /// Existing objects; needed for natural shapes and automatic diameters.
    #[serde(default)]
    pub guide_objects_name: Option<String>,
    pub shape: ShapeKind,
    #[serde(default = "default_diameter")]
    pub diameter: DiameterMode,
    #[serde(default)]
    pub outline_name: ArtifactName,
    #[serde(default)]
    pub label_matrix: Option<LabelMatrixSettings>,
}

impl IdentifySettings {
    pub fn new(grid_name: &str, objects_name: &str, shape: ShapeKind) -> Self {
        Self {
            grid_name: grid_name.to_string(),
            objects_name: objects_name.to_string(),
            guide_objects_name: None,
            shape,
            diameter: default_diameter(),
            outline_name: ArtifactName::skip(),
            label_matrix: None,
        }
    }

    /// Whether this configuration reads existing guide objects.
    pub fn needs_guide_objects(&self) -> bool {
        self.shape.needs_guide_objects()
            || (self.shape == ShapeKind::Circle && self.diameter.needs_guide_objects())
    }

    pub fn label_matrix_name(&self) -> Option<&str> {
        self.label_matrix.as_ref().and_then(|m| m.name.get())
    }
}
