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

//! Conversion of AIXM features into OpenAir records.

use aixm::{Airspace, AirspaceVolume, Curve, Document, GeoBorder, Segment, Uom, VerticalLimit};
use log::{debug, info, warn};

use crate::error::Error;
use crate::record::{Element, Record};

/// Converts the airspaces and borders of a document into OpenAir records.
///
/// Segments are converted as they are. If the document was resolved with a
/// [`GeometryResolver`](aixm::GeometryResolver) before, all boundaries are
/// made of points.
pub struct Converter<'a> {
    document: &'a Document,
}

impl<'a> Converter<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Formats a vertical limit for the `AH` and `AL` lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use aixm::{Uom, VerticalLimit};
    /// use openair::Converter;
    ///
    /// let limit = VerticalLimit {
    ///     value: "1500".to_string(),
    ///     uom: Uom::FT,
    ///     reference: Some("MSL".to_string()),
    /// };
    ///
    /// assert_eq!(Converter::convert_vertical_limit(&limit).unwrap(), "1500 FT AMSL");
    /// ```
    pub fn convert_vertical_limit(limit: &VerticalLimit) -> Result<String, Error> {
        let reference = limit.reference.as_deref();

        if limit.uom == Uom::FL {
            return match reference {
                Some("STD") => Ok(format!("FL{}", limit.value)),
                _ => Err(Error::InvalidLimitReference {
                    value: limit.value.clone(),
                    reference: limit.reference.clone(),
                }),
            };
        }

        let reference = match reference {
            Some("MSL") => Some("AMSL"),
            Some("SFC") => Some("AGL"),
            r => r,
        };

        Ok(match reference {
            Some("AGL") if limit.value == "0" => "GND".to_string(),
            Some(r) => format!("{} {} {r}", limit.value, limit.uom),
            None => format!("{} {}", limit.value, limit.uom),
        })
    }

    /// Returns the elements that draw a segment.
    pub fn convert_segment(segment: &Segment) -> Vec<Element> {
        match segment {
            Segment::Point(location) => vec![Element::Point {
                location: *location,
            }],
            Segment::Circle { center, radius } => vec![Element::Circle {
                center: *center,
                radius: *radius,
            }],
            Segment::Arc {
                center,
                radius,
                start_bearing,
                end_bearing,
                clockwise,
            } => vec![Element::Arc {
                center: *center,
                radius: *radius,
                start: *start_bearing,
                end: *end_bearing,
                clockwise: *clockwise,
            }],
            Segment::Line { start, end } => vec![
                Element::Point { location: *start },
                Element::Point { location: *end },
            ],
            Segment::Resolved { positions, .. } => positions
                .iter()
                .map(|&location| Element::Point { location })
                .collect(),
        }
    }

    fn convert_curves(curves: &[Curve]) -> Vec<Element> {
        let mut elements = Vec::new();

        for curve in curves {
            match curve {
                Curve::Inline(segments) => {
                    elements.extend(segments.iter().flat_map(Self::convert_segment))
                }
                Curve::Reference(id) => {
                    warn!("skipping curve {id} that is not part of the document")
                }
            }
        }

        elements
    }

    /// Returns the elements of a volume.
    ///
    /// A volume that still depends on another airspace is drawn with the
    /// volume of the first component of that airspace. Only a single
    /// dependency can be followed this way.
    pub fn convert_volume(&self, volume: &AirspaceVolume) -> Result<Vec<Element>, Error> {
        let volume = match volume.dependencies.as_slice() {
            [] => volume,
            [dependency] => {
                let target = self.document.find_airspace(&dependency.airspace).ok_or(
                    Error::UnknownDependency {
                        volume: volume.ident().to_string(),
                        airspace: dependency.airspace.clone(),
                    },
                )?;

                let component = target.components.first().ok_or(Error::NoComponents {
                    airspace: target.id.clone(),
                })?;

                debug!(
                    "drawing volume {} with the geometry of {}",
                    volume.ident(),
                    target.id
                );
                &component.volume
            }
            _ => {
                return Err(Error::MultipleDependencies {
                    volume: volume.ident().to_string(),
                })
            }
        };

        Ok(Self::convert_curves(&volume.curves))
    }

    /// Returns one record per geometry component of the airspace.
    ///
    /// Dependencies are expanded first. The vertical limits of the first
    /// component apply to all records.
    pub fn convert_airspace(&self, airspace: &Airspace) -> Result<Vec<Record>, Error> {
        let components = self.document.dependant_components(airspace)?;

        let base = &components
            .first()
            .ok_or(Error::NoComponents {
                airspace: airspace.id.clone(),
            })?
            .volume;

        let missing_limit = || Error::MissingVerticalLimit {
            airspace: airspace.id.clone(),
        };

        let ceiling =
            Self::convert_vertical_limit(base.upper_limit.as_ref().ok_or_else(missing_limit)?)?;
        let floor =
            Self::convert_vertical_limit(base.lower_limit.as_ref().ok_or_else(missing_limit)?)?;

        components
            .iter()
            .map(|component| -> Result<Record, Error> {
                Ok(Record {
                    class: airspace.class.clone(),
                    name: airspace.name.clone(),
                    ident: Some(airspace.id.clone()),
                    airspace_type: Some(airspace.local_type.clone()),
                    ground_name: Some(airspace.designator.clone()),
                    frequency: None,
                    ceiling: ceiling.clone(),
                    floor: floor.clone(),
                    elements: self.convert_volume(&component.volume)?,
                })
            })
            .collect()
    }

    /// Converts the airspaces of the document.
    ///
    /// With `only_top_level` the airspaces that only lend their geometry to
    /// others are left out.
    pub fn convert_airspaces(&self, only_top_level: bool) -> Result<Vec<Record>, Error> {
        let mut records = Vec::new();

        for airspace in self.document.airspaces() {
            if only_top_level && self.document.is_referenced(&airspace.id) {
                debug!("skipping referenced airspace {}", airspace.id);
                continue;
            }

            records.extend(self.convert_airspace(airspace)?);
        }

        info!(
            "converted {} airspaces into {} records",
            self.document.airspaces().len(),
            records.len()
        );

        Ok(records)
    }

    /// Returns a record that draws the border on the ground.
    pub fn convert_border(border: &GeoBorder) -> Record {
        Record {
            class: "BORDER".to_string(),
            name: border.name.clone(),
            ident: Some(border.id.clone()),
            ceiling: "GND".to_string(),
            floor: "GND".to_string(),
            elements: Self::convert_curves(std::slice::from_ref(&border.curve)),
            ..Default::default()
        }
    }

    pub fn convert_borders(&self) -> Vec<Record> {
        self.document
            .borders()
            .iter()
            .map(Self::convert_border)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aixm::{AirspaceGeometryComponent, AirspaceVolumeDependency, Position};

    fn limit(value: &str, uom: Uom, reference: Option<&str>) -> VerticalLimit {
        VerticalLimit {
            value: value.to_string(),
            uom,
            reference: reference.map(str::to_string),
        }
    }

    fn owned(id: &str, upper: &str) -> AirspaceGeometryComponent {
        AirspaceGeometryComponent {
            operation: None,
            volume: AirspaceVolume {
                id: Some(id.to_string()),
                upper_limit: Some(limit(upper, Uom::FT, Some("MSL"))),
                lower_limit: Some(limit("0", Uom::FT, Some("SFC"))),
                curves: vec![Curve::Inline(vec![
                    Segment::Point(Position::new(54.0, 10.0)),
                    Segment::Circle {
                        center: Position::new(54.0, 10.5),
                        radius: 2.0,
                    },
                ])],
                dependencies: Vec::new(),
            },
        }
    }

    fn borrowed(id: &str, targets: &[&str]) -> AirspaceGeometryComponent {
        AirspaceGeometryComponent {
            operation: None,
            volume: AirspaceVolume {
                id: Some(id.to_string()),
                dependencies: targets
                    .iter()
                    .map(|t| AirspaceVolumeDependency {
                        kind: "FULL_GEOMETRY".to_string(),
                        airspace: t.to_string(),
                    })
                    .collect(),
                ..Default::default()
            },
        }
    }

    fn airspace(id: &str, components: Vec<AirspaceGeometryComponent>) -> Airspace {
        Airspace {
            id: id.to_string(),
            designator: id.to_uppercase(),
            name: format!("AIRSPACE {id}"),
            local_type: "CTR".to_string(),
            class: "D".to_string(),
            activation: None,
            components,
        }
    }

    #[test]
    fn format_vertical_limits() {
        let convert = |l| Converter::convert_vertical_limit(&l).unwrap();

        assert_eq!(convert(limit("3500", Uom::FL, Some("STD"))), "FL3500");
        assert_eq!(convert(limit("0", Uom::FT, Some("SFC"))), "GND");
        assert_eq!(convert(limit("1500", Uom::FT, Some("MSL"))), "1500 FT AMSL");
        assert_eq!(convert(limit("1000", Uom::FT, Some("SFC"))), "1000 FT AGL");
        assert_eq!(convert(limit("0", Uom::M, Some("MSL"))), "0 M AMSL");
        assert_eq!(convert(limit("2500", Uom::FT, None)), "2500 FT");
    }

    #[test]
    fn reject_flight_level_without_standard_reference() {
        assert_eq!(
            Converter::convert_vertical_limit(&limit("65", Uom::FL, Some("MSL"))),
            Err(Error::InvalidLimitReference {
                value: "65".to_string(),
                reference: Some("MSL".to_string()),
            })
        );
        assert!(Converter::convert_vertical_limit(&limit("65", Uom::FL, None)).is_err());
    }

    #[test]
    fn convert_resolved_segment() {
        let positions = vec![Position::new(54.0, 10.0), Position::new(54.1, 10.1)];
        let segment = Segment::Resolved {
            positions: positions.clone(),
            parent: Box::new(Segment::Line {
                start: positions[0],
                end: positions[1],
            }),
        };

        assert_eq!(
            Converter::convert_segment(&segment),
            vec![Element::point(54.0, 10.0), Element::point(54.1, 10.1)]
        );
    }

    #[test]
    fn convert_airspace_per_component() {
        let doc = Document::new(
            vec![airspace("a", vec![owned("v1", "1500"), owned("v2", "2500")])],
            Vec::new(),
        );
        let records = Converter::new(&doc)
            .convert_airspace(&doc.airspaces()[0])
            .unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.class, "D");
            assert_eq!(record.name, "AIRSPACE a");
            assert_eq!(record.ident.as_deref(), Some("a"));
            assert_eq!(record.airspace_type.as_deref(), Some("CTR"));
            assert_eq!(record.ground_name.as_deref(), Some("A"));
            // limits of the first component
            assert_eq!(record.ceiling, "1500 FT AMSL");
            assert_eq!(record.floor, "GND");
            assert_eq!(
                record.elements,
                vec![
                    Element::point(54.0, 10.0),
                    Element::Circle {
                        center: Position::new(54.0, 10.5),
                        radius: 2.0
                    }
                ]
            );
        }
    }

    #[test]
    fn reject_airspace_without_components() {
        let doc = Document::new(
            vec![airspace("a", vec![borrowed("v1", &["missing"])])],
            Vec::new(),
        );
        assert_eq!(
            Converter::new(&doc).convert_airspace(&doc.airspaces()[0]),
            Err(Error::NoComponents {
                airspace: "a".to_string()
            })
        );
    }

    #[test]
    fn reject_airspace_without_limits() {
        let mut component = owned("v1", "1500");
        component.volume.lower_limit = None;
        let doc = Document::new(vec![airspace("a", vec![component])], Vec::new());

        assert!(matches!(
            Converter::new(&doc).convert_airspace(&doc.airspaces()[0]),
            Err(Error::MissingVerticalLimit { .. })
        ));
    }

    #[test]
    fn convert_dependency_volume() {
        let doc = Document::new(
            vec![
                airspace("a", vec![borrowed("va", &["b"])]),
                airspace("b", vec![owned("vb", "1500")]),
            ],
            Vec::new(),
        );
        let converter = Converter::new(&doc);
        let volume = &doc.airspaces()[0].components[0].volume;

        assert_eq!(
            converter.convert_volume(volume).unwrap(),
            converter
                .convert_volume(&doc.airspaces()[1].components[0].volume)
                .unwrap()
        );
    }

    #[test]
    fn reject_ambiguous_dependency_volume() {
        let doc = Document::new(
            vec![
                airspace("a", vec![borrowed("va", &["b", "c"])]),
                airspace("b", vec![owned("vb", "1500")]),
                airspace("c", vec![owned("vc", "1500")]),
            ],
            Vec::new(),
        );
        let converter = Converter::new(&doc);

        assert_eq!(
            converter.convert_volume(&doc.airspaces()[0].components[0].volume),
            Err(Error::MultipleDependencies {
                volume: "va".to_string()
            })
        );

        let unknown = borrowed("vx", &["x"]);
        assert_eq!(
            converter.convert_volume(&unknown.volume),
            Err(Error::UnknownDependency {
                volume: "vx".to_string(),
                airspace: "x".to_string()
            })
        );
    }

    #[test]
    fn skip_referenced_airspaces() {
        let doc = Document::new(
            vec![
                airspace("a", vec![borrowed("va", &["b"])]),
                airspace("b", vec![owned("vb", "1500")]),
            ],
            Vec::new(),
        );
        let converter = Converter::new(&doc);

        let top_level = converter.convert_airspaces(true).unwrap();
        assert_eq!(top_level.len(), 1);
        assert_eq!(top_level[0].ident.as_deref(), Some("a"));

        assert_eq!(converter.convert_airspaces(false).unwrap().len(), 2);
    }

    #[test]
    fn convert_border() {
        let border = GeoBorder {
            id: "b1".to_string(),
            name: "DONLON".to_string(),
            curve: Curve::Inline(vec![
                Segment::Point(Position::new(52.0, -32.0)),
                Segment::Point(Position::new(52.5, -32.0)),
            ]),
        };
        let doc = Document::new(Vec::new(), vec![border]);

        let records = Converter::new(&doc).convert_borders();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class, "BORDER");
        assert_eq!(records[0].ceiling, "GND");
        assert_eq!(records[0].floor, "GND");
        assert_eq!(records[0].elements.len(), 2);
    }
}
