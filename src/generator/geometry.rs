//! Boundary to the geometry kernel.
//!
//! The planner never looks inside a solid. It hands grid-unit counts and
//! option flags to a [`GeometryBackend`] and passes whatever comes back to
//! [`GeometryBackend::export`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PlanError, Result};
use crate::model::{BaseplateOptions, ExportFormat, GridFootprint, SpacerMode, SpacerSpec, SplitPlan};

/// Builds and exports solids for planned parts.
pub trait GeometryBackend {
    /// Opaque solid handle.
    type Solid;

    /// Build one baseplate (or baseplate piece) of `footprint` units.
    fn build_baseplate(&self, footprint: GridFootprint, options: &BaseplateOptions) -> Result<Self::Solid>;

    /// Build one of each spacer; printed twice for a drawer.
    fn build_spacer_half_set(&self, spec: &SpacerSpec) -> Result<Self::Solid>;

    /// Build every spacer for a drawer.
    fn build_spacer_full_set(&self, spec: &SpacerSpec) -> Result<Self::Solid>;

    /// Build spacers and baseplate pieces laid out together.
    fn build_spacer_assembly(&self, spec: &SpacerSpec, split: &SplitPlan) -> Result<Self::Solid>;

    /// Write `solid` to `path` in `format`, returning the file actually written.
    fn export(&self, solid: &Self::Solid, path: &Path, format: ExportFormat) -> Result<PathBuf>;

    /// Build the spacer set for `mode`.
    fn build_spacer(&self, spec: &SpacerSpec, mode: SpacerMode) -> Result<Self::Solid> {
        match mode {
            SpacerMode::HalfSet => self.build_spacer_half_set(spec),
            SpacerMode::FullSet => self.build_spacer_full_set(spec),
        }
    }
}

/// Serializable description of a part, standing in for a solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "part", rename_all = "snake_case")]
pub enum PartDescriptor {
    Baseplate {
        units_wide: u32,
        units_deep: u32,
        width_mm: f64,
        depth_mm: f64,
        options: BaseplateOptions,
    },
    Spacer {
        mode: SpacerMode,
        spec: SpacerSpec,
    },
    Assembly {
        spec: SpacerSpec,
        pieces: Vec<GridFootprint>,
    },
}

/// Backend that records part descriptors as JSON instead of meshing them.
///
/// `export` writes `<path>.json` so the output directory shows exactly what a
/// geometry kernel would be asked to produce.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBackend;

impl DescriptorBackend {
    /// Create a descriptor backend.
    pub fn new() -> Self {
        Self
    }

    /// Path the descriptor for `path` is written to.
    pub fn descriptor_path(path: &Path) -> PathBuf {
        let mut file_name = path.as_os_str().to_os_string();
        file_name.push(".json");
        PathBuf::from(file_name)
    }
}

impl GeometryBackend for DescriptorBackend {
    type Solid = PartDescriptor;

    fn build_baseplate(&self, footprint: GridFootprint, options: &BaseplateOptions) -> Result<PartDescriptor> {
        Ok(PartDescriptor::Baseplate {
            units_wide: footprint.units_wide,
            units_deep: footprint.units_deep,
            width_mm: footprint.width_mm(),
            depth_mm: footprint.depth_mm(),
            options: options.clone(),
        })
    }

    fn build_spacer_half_set(&self, spec: &SpacerSpec) -> Result<PartDescriptor> {
        Ok(PartDescriptor::Spacer {
            mode: SpacerMode::HalfSet,
            spec: spec.clone(),
        })
    }

    fn build_spacer_full_set(&self, spec: &SpacerSpec) -> Result<PartDescriptor> {
        Ok(PartDescriptor::Spacer {
            mode: SpacerMode::FullSet,
            spec: spec.clone(),
        })
    }

    fn build_spacer_assembly(&self, spec: &SpacerSpec, split: &SplitPlan) -> Result<PartDescriptor> {
        Ok(PartDescriptor::Assembly {
            spec: spec.clone(),
            pieces: split.pieces().iter().map(|p| p.footprint).collect(),
        })
    }

    fn export(&self, solid: &PartDescriptor, path: &Path, format: ExportFormat) -> Result<PathBuf> {
        let target = Self::descriptor_path(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PlanError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let body = serde_json::json!({
            "format": format,
            "target": path.display().to_string(),
            "solid": solid,
        });
        let json = serde_json::to_string_pretty(&body).map_err(|e| PlanError::Geometry {
            message: format!("cannot serialize descriptor: {e}"),
        })?;

        std::fs::write(&target, json).map_err(|source| PlanError::Io {
            path: target.clone(),
            source,
        })?;

        tracing::debug!("Wrote descriptor {}", target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpacerOptions;

    #[test]
    fn test_descriptor_path_appends_json() {
        assert_eq!(
            DescriptorBackend::descriptor_path(Path::new("out/drawer_330x340_baseplate_7x8.stl")),
            PathBuf::from("out/drawer_330x340_baseplate_7x8.stl.json")
        );
    }

    #[test]
    fn test_build_spacer_dispatches_on_mode() {
        let backend = DescriptorBackend::new();
        let spec = SpacerSpec {
            width_mm: 330.0,
            depth_mm: 340.0,
            options: SpacerOptions::default(),
        };
        let solid = backend.build_spacer(&spec, SpacerMode::FullSet).unwrap();
        assert!(matches!(
            solid,
            PartDescriptor::Spacer {
                mode: SpacerMode::FullSet,
                ..
            }
        ));
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DescriptorBackend::new();
        let solid = backend
            .build_baseplate(GridFootprint::new(4, 4), &BaseplateOptions::default())
            .unwrap();

        let path = dir.path().join("nested").join("plate.stl");
        let target = backend.export(&solid, &path, ExportFormat::Stl).unwrap();
        assert_eq!(target, dir.path().join("nested").join("plate.stl.json"));

        let written = std::fs::read_to_string(&target).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["format"], "stl");
        assert_eq!(value["solid"]["part"], "baseplate");
        assert_eq!(value["solid"]["units_wide"], 4);
        assert_eq!(value["solid"]["width_mm"], 168.0);
    }
}
