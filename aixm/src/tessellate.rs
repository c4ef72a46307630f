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

//! Tessellation of arcs and circles into points.
//!
//! Consumers that can only draw polygons need every parametric segment of a
//! boundary as a sequence of positions. The [`GeometryResolver`] replaces the
//! segments of inline curves by [`Segment::Resolved`] in place.

use log::{trace, warn};

use crate::document::Document;
use crate::error::Error;
use crate::features::{Airspace, AirspaceVolume, GeoBorder};
use crate::geodesy::{destination, distance_bearing, nm_to_km};
use crate::gml::{Curve, Position, Segment};

/// Converts arcs and circles into points with a fixed angular step.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GeometryResolver {
    step: u32,
}

impl GeometryResolver {
    /// Creates a resolver that places a point every `step` degrees.
    ///
    /// A step of `1` turns a circle into 360 points. A step of zero would
    /// never advance and is rejected.
    pub fn new(step: u32) -> Result<Self, Error> {
        if step == 0 {
            return Err(Error::InvalidValue {
                field: "arc angle step",
                value: step.to_string(),
            });
        }

        Ok(Self { step })
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Computes the points of an arc around `center`.
    ///
    /// The points are ordered from the start to the end bearing in the
    /// direction of the arc. With `use_edge` the first and last point are
    /// exactly on the start and end bearing, otherwise the arc is shortened
    /// by one step on each side.
    pub fn compute_arc(
        &self,
        center: &Position,
        radius_km: f64,
        start_bearing: f64,
        end_bearing: f64,
        clockwise: bool,
        use_edge: bool,
    ) -> Vec<Position> {
        // walk all arcs clockwise and reverse the counterclockwise ones
        let (mut start, mut end) = if clockwise {
            (start_bearing, end_bearing)
        } else {
            (end_bearing, start_bearing)
        };

        let step = f64::from(self.step);

        // the walk goes from start up to end and never more than one turn
        let mut span = end - start;
        if !(0.0..=360.0).contains(&span) {
            span = span.rem_euclid(360.0);
        }
        start = start.rem_euclid(360.0);
        end = start + span;

        if !use_edge {
            start += step;
            end -= step;
        }

        let mut positions = Vec::new();
        let mut angle = start;

        while angle < end {
            positions.push(destination(center, angle, radius_km));
            angle += step;
        }

        if start <= end {
            positions.push(destination(center, end, radius_km));
        }

        if !clockwise {
            positions.reverse();
        }

        positions
    }

    /// Computes an arc from `start` to `end` around `center`.
    ///
    /// The radius and the bearings are taken from the start and end point.
    /// Both points are part of the result.
    pub fn resolve_arc_between(
        &self,
        center: &Position,
        start: &Position,
        end: &Position,
        clockwise: bool,
    ) -> Vec<Position> {
        let (distance_cm, start_bearing) = distance_bearing(center, start);
        let (_, end_bearing) = distance_bearing(center, end);

        let mut positions = vec![*start];
        positions.extend(self.compute_arc(
            center,
            distance_cm / 100_000.0,
            start_bearing,
            end_bearing,
            clockwise,
            false,
        ));
        positions.push(*end);
        positions
    }

    /// Returns the resolved form of a segment.
    ///
    /// A segment that is already resolved is returned unchanged.
    pub fn resolve_segment(&self, segment: &Segment) -> Segment {
        let positions = match segment {
            Segment::Point(p) => vec![*p],
            Segment::Line { start, end } => vec![*start, *end],
            Segment::Circle { center, radius } => {
                let radius_km = nm_to_km(*radius);

                // two half circles that share their seam points
                let mut positions = self.compute_arc(center, radius_km, 0.0, 180.0, true, true);
                positions.pop();
                positions.extend(self.compute_arc(center, radius_km, 180.0, 0.0, true, true));
                positions.pop();
                positions
            }
            Segment::Arc {
                center,
                radius,
                start_bearing,
                end_bearing,
                clockwise,
            } => self.compute_arc(
                center,
                nm_to_km(*radius),
                *start_bearing,
                *end_bearing,
                *clockwise,
                true,
            ),
            Segment::Resolved { .. } => return segment.clone(),
        };

        Segment::Resolved {
            positions,
            parent: Box::new(segment.clone()),
        }
    }

    /// Resolves all segments of an inline curve.
    ///
    /// Curves that are defined in another document are left as they are.
    pub fn resolve_curve(&self, curve: &mut Curve) {
        match curve {
            Curve::Inline(segments) => {
                for segment in segments.iter_mut() {
                    *segment = self.resolve_segment(segment);
                }
            }
            Curve::Reference(id) => warn!("skipping curve {id} that is not part of the document"),
        }
    }

    pub fn resolve_volume(&self, volume: &mut AirspaceVolume) {
        trace!("resolving volume {}", volume.ident());
        volume.curves.iter_mut().for_each(|c| self.resolve_curve(c));
    }

    pub fn resolve_airspace(&self, airspace: &mut Airspace) {
        for component in airspace.components.iter_mut() {
            self.resolve_volume(&mut component.volume);
        }
    }

    pub fn resolve_airspaces(&self, airspaces: &mut [Airspace]) {
        airspaces.iter_mut().for_each(|a| self.resolve_airspace(a));
    }

    pub fn resolve_borders(&self, borders: &mut [GeoBorder]) {
        borders
            .iter_mut()
            .for_each(|b| self.resolve_curve(&mut b.curve));
    }

    /// Resolves the airspaces and borders of a document.
    pub fn resolve_document(&self, document: &mut Document) {
        self.resolve_airspaces(document.airspaces_mut());
        self.resolve_borders(document.borders_mut());
    }
}
