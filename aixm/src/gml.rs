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

//! GML geometry as it appears on AIXM airspace boundaries.
//!
//! Segments keep their parametric form (arc, circle) as parsed. The
//! [`GeometryResolver`](crate::GeometryResolver) replaces them by
//! [`Segment::Resolved`] point sequences when a consumer can not draw arcs.

use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Latitude in the range from -90° (south) to 90° (north).
    pub latitude: f64,

    /// Longitude in the range from -180° (west) to 180° (east).
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({0}, {1})", self.latitude, self.longitude)
    }
}

/// A piece of a curve.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Segment {
    /// A single vertex of a geodesic string.
    Point(Position),

    /// A full circle with the radius in nautical miles.
    Circle { center: Position, radius: f64 },

    /// An arc around the center with the radius in nautical miles and the
    /// bearings in degrees.
    Arc {
        center: Position,
        radius: f64,
        start_bearing: f64,
        end_bearing: f64,
        clockwise: bool,
    },

    /// A straight line. GML curves of AIXM airspaces never produce this.
    Line { start: Position, end: Position },

    /// The points that replace the `parent` segment after tessellation.
    Resolved {
        positions: Vec<Position>,
        parent: Box<Segment>,
    },
}

impl Segment {
    /// Returns `true` if the segment is already a plain point sequence.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// A curve of a boundary ring.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Curve {
    /// A curve defined in the document.
    Inline(Vec<Segment>),

    /// A curve owned by a feature outside this document, referenced by its
    /// `xlink:href` without the `urn:uuid:` prefix.
    Reference(String),
}

impl Curve {
    /// Returns the segments of an inline curve. A reference has none.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Inline(segments) => segments,
            Self::Reference(_) => &[],
        }
    }
}
