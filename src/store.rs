//! Typed named-artifact registry.
//!
//! Upstream stages publish grids and label images under string names; this
//! module reads them and publishes the assembled objects and optional
//! artifacts back. The store is passed in explicitly rather than reached
//! through global state.
use crate::error::{GridError, Result};
use crate::grid::GridGeometry;
use crate::image::{LabelImage, Mask};
use image::DynamicImage;
use std::collections::HashMap;

/// A value held by the store.
#[derive(Clone, Debug)]
pub enum Entity {
    Grid(GridGeometry),
    Labels(LabelImage),
    Outline(Mask),
    Rendered(DynamicImage),
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Grid(_) => "grid",
            Entity::Labels(_) => "label image",
            Entity::Outline(_) => "outline mask",
            Entity::Rendered(_) => "rendered image",
        }
    }
}

pub trait ObjectStore {
    fn get(&self, name: &str) -> Result<&Entity>;

    /// Insert or replace `name`.
    fn put(&mut self, name: &str, entity: Entity);

    fn grid(&self, name: &str) -> Result<&GridGeometry> {
        match self.get(name)? {
            Entity::Grid(grid) => Ok(grid),
            other => Err(wrong_kind(name, "grid", other)),
        }
    }

    fn labels(&self, name: &str) -> Result<&LabelImage> {
        match self.get(name)? {
            Entity::Labels(labels) => Ok(labels),
            other => Err(wrong_kind(name, "label image", other)),
        }
    }

    fn outline(&self, name: &str) -> Result<&Mask> {
        match self.get(name)? {
            Entity::Outline(mask) => Ok(mask),
            other => Err(wrong_kind(name, "outline mask", other)),
        }
    }

    fn rendered(&self, name: &str) -> Result<&DynamicImage> {
        match self.get(name)? {
            Entity::Rendered(img) => Ok(img),
            other => Err(wrong_kind(name, "rendered image", other)),
        }
    }
}

fn wrong_kind(name: &str, expected: &'static str, found: &Entity) -> GridError {
    GridError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

/// In-memory store backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Entity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, entity: Entity) -> Self {
        self.put(name, entity);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, name: &str) -> Result<&Entity> {
        self.entries
            .get(name)
            .ok_or_else(|| GridError::NotFound(name.to_string()))
    }

    fn put(&mut self, name: &str, entity: Entity) {
        self.entries.insert(name.to_string(), entity);
    }
}
