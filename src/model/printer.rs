//! Printer build-plate profiles and the preset table they come from.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::config::{float_cmp, DEFAULT_PRINTER};
use crate::error::{PlanError, Result};
use crate::validation::validate_printer_dimensions;

/// Name given to profiles built from explicit bed dimensions.
pub const CUSTOM_PRINTER_NAME: &str = "custom";

/// One row of the preset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetEntry {
    /// Display name.
    pub name: String,
    /// Usable bed width in mm.
    pub max_width_mm: f64,
    /// Usable bed depth in mm.
    pub max_depth_mm: f64,
}

impl PresetEntry {
    fn new(name: &str, max_width_mm: f64, max_depth_mm: f64) -> Self {
        Self {
            name: name.to_string(),
            max_width_mm,
            max_depth_mm,
        }
    }
}

/// Immutable mapping of preset key to bed limits.
///
/// Built once at start-up and handed to [`PrinterProfile::from_preset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable {
    presets: BTreeMap<String, PresetEntry>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetTable {
    /// The printers known out of the box.
    pub fn builtin() -> Self {
        let presets = [
            ("bambu-x1c", PresetEntry::new("Bambu Lab X1C", 256.0, 256.0)),
            ("bambu-p1p", PresetEntry::new("Bambu Lab P1P", 256.0, 256.0)),
            ("prusa-mk4", PresetEntry::new("Prusa MK4", 250.0, 210.0)),
            ("prusa-mini", PresetEntry::new("Prusa Mini", 180.0, 180.0)),
            ("ender3", PresetEntry::new("Ender 3", 220.0, 220.0)),
        ]
        .into_iter()
        .map(|(key, entry)| (key.to_string(), entry))
        .collect();

        Self { presets }
    }

    /// Load a table from JSON of the form
    /// `{"key": {"name": "...", "max_width_mm": 256, "max_depth_mm": 256}}`.
    ///
    /// Every entry's bed must pass the printer dimension checks.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: PresetTable = serde_json::from_str(json)?;
        for entry in table.presets.values() {
            validate_printer_dimensions(entry.max_width_mm, entry.max_depth_mm)?;
        }
        tracing::debug!("Loaded {} printer preset(s)", table.presets.len());
        Ok(table)
    }

    /// Look up a preset by key.
    pub fn get(&self, key: &str) -> Option<&PresetEntry> {
        self.presets.get(key)
    }

    /// Sorted preset keys.
    pub fn keys(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the table has no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Usable bed area of a printer.
#[derive(Debug, Clone, Serialize)]
pub struct PrinterProfile {
    name: String,
    max_width_mm: f64,
    max_depth_mm: f64,
}

impl PrinterProfile {
    /// Profile for a preset key.
    pub fn from_preset(table: &PresetTable, key: &str) -> Result<Self> {
        let entry = table.get(key).ok_or_else(|| PlanError::UnknownPreset {
            key: key.to_string(),
            valid: table.keys(),
        })?;

        Ok(Self {
            name: entry.name.clone(),
            max_width_mm: entry.max_width_mm,
            max_depth_mm: entry.max_depth_mm,
        })
    }

    /// Profile for the default preset of `table`.
    pub fn default_preset(table: &PresetTable) -> Result<Self> {
        Self::from_preset(table, DEFAULT_PRINTER)
    }

    /// Profile from explicit bed dimensions, named "custom".
    pub fn from_custom(max_width_mm: f64, max_depth_mm: f64) -> Result<Self> {
        validate_printer_dimensions(max_width_mm, max_depth_mm)?;
        Ok(Self {
            name: CUSTOM_PRINTER_NAME.to_string(),
            max_width_mm,
            max_depth_mm,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usable bed width in mm.
    pub fn max_width_mm(&self) -> f64 {
        self.max_width_mm
    }

    /// Usable bed depth in mm.
    pub fn max_depth_mm(&self) -> f64 {
        self.max_depth_mm
    }

    /// Check whether a rectangle fits the bed without rotation.
    pub fn fits(&self, width_mm: f64, depth_mm: f64) -> bool {
        float_cmp::approx_le(width_mm, self.max_width_mm)
            && float_cmp::approx_le(depth_mm, self.max_depth_mm)
    }
}

impl PartialEq for PrinterProfile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.max_width_mm.to_bits() == other.max_width_mm.to_bits()
            && self.max_depth_mm.to_bits() == other.max_depth_mm.to_bits()
    }
}

impl Eq for PrinterProfile {}

impl Hash for PrinterProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.max_width_mm.to_bits().hash(state);
        self.max_depth_mm.to_bits().hash(state);
    }
}

impl std::fmt::Display for PrinterProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}mm × {}mm)",
            self.name, self.max_width_mm, self.max_depth_mm
        )
    }
}
