//! Placement search configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable constants of the placement and connector searches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Gap kept between a new life-support building and its neighbor.
    pub inhabited_separation: f64,

    /// Gap kept between a new non-inhabited building and a same-type neighbor.
    pub non_inhabited_separation: f64,

    /// First gap tried when falling back to every building.
    pub fallback_start_separation: f64,

    /// Gap increment after each failed fallback pass.
    pub fallback_separation_step: f64,

    /// Maximum number of fallback passes before giving up.
    pub max_fallback_passes: u32,

    /// Shortest connector segment accepted.
    pub min_connector_length: f64,

    /// Clearance between a wall and a connector endpoint.
    pub building_edge_offset: f64,

    /// Width used for building types with a variable width.
    pub default_variable_width: f64,

    /// Length used for building types with a variable length.
    pub default_variable_length: f64,

    /// Maximum number of proposals offered in one confirmation session.
    pub max_proposals: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            inhabited_separation: 5.0,
            non_inhabited_separation: 2.0,
            fallback_start_separation: 10.0,
            fallback_separation_step: 10.0,
            max_fallback_passes: 500,
            min_connector_length: 1.0,
            building_edge_offset: 0.1,
            default_variable_width: 9.0,
            default_variable_length: 9.0,
            max_proposals: 100,
        }
    }
}

impl PlacementConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separation used around life-support buildings.
    pub fn with_inhabited_separation(mut self, separation: f64) -> Self {
        self.inhabited_separation = separation;
        self
    }

    /// Sets the separation used around same-type buildings.
    pub fn with_non_inhabited_separation(mut self, separation: f64) -> Self {
        self.non_inhabited_separation = separation;
        self
    }

    /// Sets the start and step of the expanding fallback pass.
    pub fn with_fallback_separation(mut self, start: f64, step: f64) -> Self {
        self.fallback_start_separation = start;
        self.fallback_separation_step = step;
        self
    }

    /// Sets the fallback pass cap.
    pub fn with_max_fallback_passes(mut self, passes: u32) -> Self {
        self.max_fallback_passes = passes;
        self
    }

    /// Sets the minimum connector length.
    pub fn with_min_connector_length(mut self, length: f64) -> Self {
        self.min_connector_length = length;
        self
    }

    /// Sets the wall clearance of connector endpoints.
    pub fn with_building_edge_offset(mut self, offset: f64) -> Self {
        self.building_edge_offset = offset;
        self
    }

    /// Sets the defaults substituted for variable building dimensions.
    pub fn with_variable_defaults(mut self, width: f64, length: f64) -> Self {
        self.default_variable_width = width;
        self.default_variable_length = length;
        self
    }

    /// Sets the proposal cap of a confirmation session.
    pub fn with_max_proposals(mut self, proposals: u32) -> Self {
        self.max_proposals = proposals;
        self
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("inhabited_separation", self.inhabited_separation),
            ("non_inhabited_separation", self.non_inhabited_separation),
            ("fallback_start_separation", self.fallback_start_separation),
            ("min_connector_length", self.min_connector_length),
            ("building_edge_offset", self.building_edge_offset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("fallback_separation_step", self.fallback_separation_step),
            ("default_variable_width", self.default_variable_width),
            ("default_variable_length", self.default_variable_length),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.max_fallback_passes == 0 {
            return Err(Error::InvalidConfig(
                "max_fallback_passes must be at least 1".into(),
            ));
        }
        if self.max_proposals == 0 {
            return Err(Error::InvalidConfig(
                "max_proposals must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
