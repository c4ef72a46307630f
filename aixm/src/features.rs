// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! AIXM features of an airspace document.
//!
//! An [`Airspace`] is composed of [`AirspaceGeometryComponent`]s and each
//! component holds exactly one [`AirspaceVolume`]. A volume either owns its
//! horizontal boundary as a set of [`Curve`]s or borrows the geometry of
//! another airspace through an [`AirspaceVolumeDependency`], never both.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gml::Curve;

/// Unit of measure of a vertical distance.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Uom {
    /// Meters.
    M,
    /// Feet.
    FT,
    /// Flight level in hundreds of feet.
    FL,
}

impl FromStr for Uom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::M),
            "FT" => Ok(Self::FT),
            "FL" => Ok(Self::FL),
            _ => Err(Error::InvalidUom(s.to_string())),
        }
    }
}

impl Display for Uom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::M => write!(f, "M"),
            Self::FT => write!(f, "FT"),
            Self::FL => write!(f, "FL"),
        }
    }
}

/// Upper or lower limit of an airspace volume.
///
/// The value is kept as written in the document since AIXM allows
/// non-numeric values like `GND` or `UNL`.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerticalLimit {
    pub value: String,
    pub uom: Uom,
    /// Reference datum (e.g. `"SFC"`, `"MSL"`, `"STD"`).
    pub reference: Option<String>,
}

/// Declares that a volume takes its geometry from another airspace.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirspaceVolumeDependency {
    /// Kind of dependency (e.g. `"FULL_GEOMETRY"`).
    pub kind: String,
    /// Identifier of the contributing airspace without `urn:uuid:` prefix.
    pub airspace: String,
}

/// A volume of an airspace.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirspaceVolume {
    /// The `gml:id` of the volume element.
    pub id: Option<String>,
    pub upper_limit: Option<VerticalLimit>,
    pub lower_limit: Option<VerticalLimit>,
    /// Curves of the exterior ring.
    pub curves: Vec<Curve>,
    pub dependencies: Vec<AirspaceVolumeDependency>,
}

impl AirspaceVolume {
    /// Returns `true` if the volume borrows its geometry.
    pub fn is_dependency(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Returns the volume ID for diagnostics.
    pub fn ident(&self) -> &str {
        self.id.as_deref().unwrap_or("<unnamed>")
    }
}

/// How a component is combined with the previous ones.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    /// Set operation (e.g. `"BASE"`, `"UNION"`, `"SUBTR"`).
    pub code: String,
    pub sequence: u32,
}

/// One volume of an airspace together with its role in the composition.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirspaceGeometryComponent {
    pub operation: Option<Operation>,
    pub volume: AirspaceVolume,
}

/// A weekly time window in which an airspace is active.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timesheet {
    /// `"UTC"` or a local time reference.
    pub time_reference: Option<String>,
    /// Start date as `DD-MM`.
    pub start_date: Option<String>,
    /// End date as `DD-MM`.
    pub end_date: Option<String>,
    /// Day of the week or `"ANY"`.
    pub day: Option<String>,
    /// Start time as `HH:MM`.
    pub start_time: Option<String>,
    /// End time as `HH:MM`.
    pub end_time: Option<String>,
    pub daylight_saving_adjust: bool,
}

/// Activation schedule of an airspace.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Activation {
    /// Activity code (e.g. `"UAV"`).
    pub activity: Option<String>,
    /// Status code (e.g. `"ACTIVE"`).
    pub status: Option<String>,
    pub timesheets: Vec<Timesheet>,
}

/// An airspace parsed from an AIXM `Airspace` feature.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airspace {
    /// Identifier from `gml:identifier`.
    pub id: String,
    /// Designator (e.g. `"EDHL"`).
    pub designator: String,
    /// Human-readable name.
    pub name: String,
    /// Local type (e.g. `"CTR"`, `"FIR"`).
    pub local_type: String,
    /// Airspace class (`"A"` to `"G"`) or the raw AIXM type.
    pub class: String,
    pub activation: Option<Activation>,
    pub components: Vec<AirspaceGeometryComponent>,
}

/// An administrative border parsed from an AIXM `GeoBorder` feature.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoBorder {
    /// Identifier from `gml:identifier`.
    pub id: String,
    pub name: String,
    pub curve: Curve,
}
