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

use aixm::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A drawing command of an airspace boundary.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Element {
    /// A polygon vertex (`DP`).
    Point { location: Position },

    /// A circle with the radius in nautical miles (`DC`).
    Circle { center: Position, radius: f64 },

    /// An arc with the radius in nautical miles and bearings in degrees
    /// (`DA`).
    Arc {
        center: Position,
        radius: f64,
        start: f64,
        end: f64,
        clockwise: bool,
    },

    /// An arc from one point to another (`DB`).
    ArcBetween {
        center: Position,
        start: Position,
        end: Position,
        clockwise: bool,
    },
}

impl Element {
    pub fn point(latitude: f64, longitude: f64) -> Self {
        Self::Point {
            location: Position::new(latitude, longitude),
        }
    }
}

/// An OpenAir airspace record.
///
/// Optional fields are omitted from the output if absent.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// Airspace class (`AC`), e.g. `D` or `CTR`.
    pub class: String,
    /// Airspace name (`AN`).
    pub name: String,
    /// Identifier (`AI`).
    pub ident: Option<String>,
    /// Type of the airspace (`AY`).
    pub airspace_type: Option<String>,
    /// Designator or name of the controlling station (`AG`).
    pub ground_name: Option<String>,
    /// Frequency (`AF`).
    pub frequency: Option<String>,
    /// Upper limit (`AH`).
    pub ceiling: String,
    /// Lower limit (`AL`).
    pub floor: String,
    pub elements: Vec<Element>,
}
