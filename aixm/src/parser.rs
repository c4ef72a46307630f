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

use log::{debug, trace};

use crate::document::Document;
use crate::error::Error;
use crate::features::*;
use crate::gml::{Curve, Position, Segment};
use crate::xml::Element;

const AIXM: &str = "http://www.aixm.aero/schema/5.1.1";
const GML: &str = "http://www.opengis.net/gml/3.2";
const XLINK: &str = "http://www.w3.org/1999/xlink";

impl Document {
    /// Parses an AIXM 5.1.1 document with its airspaces and borders.
    ///
    /// The document is rejected as a whole if it violates the structure the
    /// parser relies on, e.g. a geometry component without a volume or a curve
    /// segment of an unknown kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use aixm::Document;
    ///
    /// let xml = br#"
    ///   <message:AIXMBasicMessage
    ///     xmlns:aixm="http://www.aixm.aero/schema/5.1.1"
    ///     xmlns:gml="http://www.opengis.net/gml/3.2"
    ///     xmlns:message="http://www.aixm.aero/schema/5.1.1/message">
    ///     <message:hasMember>
    ///       <aixm:GeoBorder gml:id="uuid.gb1">
    ///         <gml:identifier codeSpace="urn:uuid:">gb1</gml:identifier>
    ///         <aixm:timeSlice>
    ///           <aixm:GeoBorderTimeSlice gml:id="GB1">
    ///             <aixm:name>DONLON BORDER</aixm:name>
    ///             <aixm:border>
    ///               <aixm:Curve gml:id="C1">
    ///                 <gml:segments>
    ///                   <gml:GeodesicString>
    ///                     <gml:posList>52.0 -32.0 52.5 -32.0</gml:posList>
    ///                   </gml:GeodesicString>
    ///                 </gml:segments>
    ///               </aixm:Curve>
    ///             </aixm:border>
    ///           </aixm:GeoBorderTimeSlice>
    ///         </aixm:timeSlice>
    ///       </aixm:GeoBorder>
    ///     </message:hasMember>
    ///   </message:AIXMBasicMessage>"#;
    ///
    /// let doc = Document::parse(&xml[..]).unwrap();
    ///
    /// assert_eq!(doc.borders().len(), 1);
    /// assert_eq!(doc.borders()[0].curve.segments().len(), 2);
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        let root = Element::parse(data)?;

        let borders = root
            .descendants(AIXM, "GeoBorder")
            .map(parse_border)
            .collect::<Result<Vec<_>, _>>()?;

        let airspaces = root
            .descendants(AIXM, "Airspace")
            .map(parse_airspace)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "parsed {} airspace(s) and {} border(s)",
            airspaces.len(),
            borders.len()
        );

        Ok(Document::new(airspaces, borders))
    }
}

/// Returns the trimmed text of the first matching descendant.
fn text_of(element: &Element, ns: &str, name: &str) -> Option<String> {
    element
        .descendant(ns, name)
        .map(|e| e.text().to_string())
        .filter(|text| !text.is_empty())
}

fn required_text(
    element: &Element,
    ns: &str,
    name: &'static str,
    parent: &'static str,
) -> Result<String, Error> {
    text_of(element, ns, name).ok_or(Error::MissingElement {
        parent,
        element: name,
    })
}

fn required_child<'a>(
    element: &'a Element,
    ns: &str,
    name: &'static str,
    parent: &'static str,
) -> Result<&'a Element, Error> {
    element.child(ns, name).ok_or(Error::MissingElement {
        parent,
        element: name,
    })
}

fn parse_number(text: &str, field: &'static str) -> Result<f64, Error> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidValue {
            field,
            value: text.to_string(),
        })
}

/// Strips the `urn:uuid:` prefix from an `xlink:href` attribute value.
fn strip_xlink_prefix(href: &str) -> &str {
    href.strip_prefix("urn:uuid:").unwrap_or(href)
}

/// Parses a `gml:pos` text content into a position.
///
/// Only latitude and longitude are read. A third value, e.g. the height of a
/// `srsDimension="3"` position, is ignored.
fn parse_pos(text: &str) -> Result<Position, Error> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(lat), Some(lon)) => Ok(Position::new(
            parse_number(lat, "pos")?,
            parse_number(lon, "pos")?,
        )),
        _ => Err(Error::InvalidValue {
            field: "pos",
            value: text.to_string(),
        }),
    }
}

/// Parses a `gml:posList` into a list of positions.
///
/// The number of values per position is taken from `srsDimension` and
/// defaults to two.
fn parse_pos_list(element: &Element) -> Result<Vec<Position>, Error> {
    let text = element.text();
    let invalid = || Error::InvalidValue {
        field: "posList",
        value: text.to_string(),
    };

    let dimension = match element.attribute("srsDimension") {
        Some(d) => d.trim().parse::<usize>().map_err(|_| Error::InvalidValue {
            field: "srsDimension",
            value: d.to_string(),
        })?,
        None => 2,
    };

    if dimension < 2 {
        return Err(Error::InvalidValue {
            field: "srsDimension",
            value: dimension.to_string(),
        });
    }

    let values = text
        .split_whitespace()
        .map(|s| parse_number(s, "posList"))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % dimension != 0 {
        return Err(invalid());
    }

    Ok(values
        .chunks_exact(dimension)
        .map(|c| Position::new(c[0], c[1]))
        .collect())
}

/// Converts a `gml:radius` into nautical miles.
fn parse_radius(element: &Element) -> Result<f64, Error> {
    let radius = parse_number(element.text(), "radius")?;

    match element.attribute("uom") {
        None | Some("[nmi_i]") | Some("NM") => Ok(radius),
        Some("KM") | Some("km") => Ok(radius / 1.852),
        Some("M") | Some("m") => Ok(radius / 1852.0),
        Some("CM") => Ok(radius / 185_200.0),
        Some("FT") | Some("[ft_i]") => Ok(radius * 0.3048 / 1852.0),
        Some("MI") | Some("[mi_i]") => Ok(radius * 1609.344 / 1852.0),
        Some(uom) => Err(Error::InvalidUom(uom.to_string())),
    }
}

fn parse_geodesic_string(element: &Element) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();

    for child in element.children() {
        match child.name() {
            "pos" => segments.push(Segment::Point(parse_pos(child.text())?)),
            "posList" => segments.extend(
                parse_pos_list(child)?
                    .into_iter()
                    .map(Segment::Point),
            ),
            name => return Err(Error::UnknownSegment(name.to_string())),
        }
    }

    Ok(segments)
}

fn parse_circle(element: &Element) -> Result<Segment, Error> {
    let pos = required_child(element, GML, "pos", "CircleByCenterPoint")?;
    let radius = required_child(element, GML, "radius", "CircleByCenterPoint")?;

    Ok(Segment::Circle {
        center: parse_pos(pos.text())?,
        radius: parse_radius(radius)?,
    })
}

fn parse_arc(element: &Element) -> Result<Segment, Error> {
    let pos = required_child(element, GML, "pos", "ArcByCenterPoint")?;
    let radius = required_child(element, GML, "radius", "ArcByCenterPoint")?;
    let start = required_child(element, GML, "startAngle", "ArcByCenterPoint")?;
    let end = required_child(element, GML, "endAngle", "ArcByCenterPoint")?;

    let start_bearing = parse_number(start.text(), "startAngle")?;
    let end_bearing = parse_number(end.text(), "endAngle")?;

    Ok(Segment::Arc {
        center: parse_pos(pos.text())?,
        radius: parse_radius(radius)?,
        start_bearing,
        end_bearing,
        clockwise: start_bearing < end_bearing,
    })
}

/// Parses the children of a `gml:segments` element.
fn parse_segments(element: &Element) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();

    for child in element.children() {
        match child.name() {
            "GeodesicString" | "LineStringSegment" => {
                segments.extend(parse_geodesic_string(child)?)
            }
            "CircleByCenterPoint" => segments.push(parse_circle(child)?),
            "ArcByCenterPoint" => segments.push(parse_arc(child)?),
            name => return Err(Error::UnknownSegment(name.to_string())),
        }
    }

    Ok(segments)
}

fn parse_curve(element: &Element) -> Result<Curve, Error> {
    let mut segments = Vec::new();
    for s in element.descendants(GML, "segments") {
        segments.extend(parse_segments(s)?);
    }
    Ok(Curve::Inline(segments))
}

fn parse_curve_member(element: &Element) -> Result<Curve, Error> {
    if let Some(href) = element.attribute_ns(XLINK, "href") {
        let id = strip_xlink_prefix(href);
        debug!("curve {id} is referenced and not part of the document");
        return Ok(Curve::Reference(id.to_string()));
    }

    let curves: Vec<_> = element.descendants(GML, "Curve").collect();
    match curves.as_slice() {
        [curve] => parse_curve(curve),
        _ => Err(Error::Cardinality {
            parent: "curveMember",
            element: "Curve",
            expected: 1,
            actual: curves.len(),
        }),
    }
}

fn parse_limit(
    element: &Element,
    limit: &'static str,
    reference: &str,
) -> Result<Option<VerticalLimit>, Error> {
    let Some(limit_element) = element.child(AIXM, limit) else {
        return Ok(None);
    };

    let uom = limit_element.attribute("uom").ok_or(Error::MissingElement {
        parent: limit,
        element: "uom",
    })?;

    Ok(Some(VerticalLimit {
        value: limit_element.text().to_string(),
        uom: uom.parse()?,
        reference: element
            .child(AIXM, reference)
            .map(|r| r.text().to_string())
            .filter(|r| !r.is_empty()),
    }))
}

/// Returns the dependency if the volume borrows the geometry of another
/// airspace.
fn parse_dependency(element: &Element) -> Result<Option<AirspaceVolumeDependency>, Error> {
    let Some(contributor) = element.descendant(AIXM, "AirspaceVolumeDependency") else {
        return Ok(None);
    };

    let Some(airspace) = contributor.descendant(AIXM, "theAirspace") else {
        return Ok(None);
    };

    let href = airspace
        .attribute_ns(XLINK, "href")
        .ok_or(Error::MissingElement {
            parent: "theAirspace",
            element: "xlink:href",
        })?;

    Ok(Some(AirspaceVolumeDependency {
        kind: required_text(element, AIXM, "dependency", "AirspaceVolumeDependency")?,
        airspace: strip_xlink_prefix(href).to_string(),
    }))
}

fn parse_volume(element: &Element) -> Result<AirspaceVolume, Error> {
    let id = element.attribute_ns(GML, "id").map(str::to_string);

    if let Some(dependency) = parse_dependency(element)? {
        trace!(
            "volume {} depends on airspace {}",
            id.as_deref().unwrap_or_default(),
            dependency.airspace
        );
        return Ok(AirspaceVolume {
            id,
            dependencies: vec![dependency],
            ..Default::default()
        });
    }

    // the geometry must be the exterior ring of a polygon patch
    let projection = required_child(element, AIXM, "horizontalProjection", "AirspaceVolume")?;
    let surface = required_child(projection, AIXM, "Surface", "horizontalProjection")?;
    let patches = required_child(surface, GML, "patches", "Surface")?;
    let patch = required_child(patches, GML, "PolygonPatch", "patches")?;
    let exterior = required_child(patch, GML, "exterior", "PolygonPatch")?;
    required_child(exterior, GML, "Ring", "exterior")?;

    let rings: Vec<_> = element.descendants(GML, "Ring").collect();
    let [ring] = rings.as_slice() else {
        return Err(Error::Cardinality {
            parent: "AirspaceVolume",
            element: "Ring",
            expected: 1,
            actual: rings.len(),
        });
    };

    let curves = ring
        .descendants(GML, "curveMember")
        .map(parse_curve_member)
        .collect::<Result<Vec<_>, _>>()?;

    if curves.is_empty() {
        return Err(Error::MissingElement {
            parent: "Ring",
            element: "curveMember",
        });
    }

    Ok(AirspaceVolume {
        id,
        upper_limit: parse_limit(element, "upperLimit", "upperLimitReference")?,
        lower_limit: parse_limit(element, "lowerLimit", "lowerLimitReference")?,
        curves,
        dependencies: Vec::new(),
    })
}

fn parse_component(element: &Element) -> Result<AirspaceGeometryComponent, Error> {
    let operation = match (
        element.child(AIXM, "operation"),
        element.child(AIXM, "operationSequence"),
    ) {
        (Some(code), Some(sequence)) => Some(Operation {
            code: code.text().to_string(),
            sequence: sequence
                .text()
                .parse()
                .map_err(|_| Error::InvalidValue {
                    field: "operationSequence",
                    value: sequence.text().to_string(),
                })?,
        }),
        _ => None,
    };

    let volumes: Vec<_> = element.descendants(AIXM, "AirspaceVolume").collect();
    let [volume] = volumes.as_slice() else {
        return Err(Error::Cardinality {
            parent: "AirspaceGeometryComponent",
            element: "AirspaceVolume",
            expected: 1,
            actual: volumes.len(),
        });
    };

    Ok(AirspaceGeometryComponent {
        operation,
        volume: parse_volume(volume)?,
    })
}

fn parse_timesheet(element: &Element) -> Timesheet {
    let text = |name: &str| {
        element
            .child(AIXM, name)
            .map(|e| e.text().to_string())
            .filter(|t| !t.is_empty())
    };

    Timesheet {
        time_reference: text("timeReference"),
        start_date: text("startDate"),
        end_date: text("endDate"),
        day: text("day"),
        start_time: text("startTime"),
        end_time: text("endTime"),
        daylight_saving_adjust: text("daylightSavingAdjust").as_deref() == Some("YES"),
    }
}

fn parse_activation(element: &Element) -> Result<Option<Activation>, Error> {
    let activations: Vec<_> = element.descendants(AIXM, "AirspaceActivation").collect();

    let activation = match activations.as_slice() {
        [] => return Ok(None),
        [activation] => activation,
        _ => {
            return Err(Error::Cardinality {
                parent: "Airspace",
                element: "AirspaceActivation",
                expected: 1,
                actual: activations.len(),
            })
        }
    };

    let timesheets: Vec<_> = activation
        .descendants(AIXM, "Timesheet")
        .map(parse_timesheet)
        .collect();

    // an activation without schedule is not actionable
    if timesheets.is_empty() {
        return Ok(None);
    }

    Ok(Some(Activation {
        activity: text_of(activation, AIXM, "activity"),
        status: text_of(activation, AIXM, "status"),
        timesheets,
    }))
}

fn parse_airspace(element: &Element) -> Result<Airspace, Error> {
    let id = required_child(element, GML, "identifier", "Airspace")?
        .text()
        .to_string();

    let mut class = required_text(element, AIXM, "type", "Airspace")?;
    if class == "CLASS" {
        if let Some(classification) = text_of(element, AIXM, "classification") {
            class = classification;
        }
    }

    let components = element
        .descendants(AIXM, "AirspaceGeometryComponent")
        .map(parse_component)
        .collect::<Result<Vec<_>, _>>()?;

    trace!("airspace {id} has {} component(s)", components.len());

    Ok(Airspace {
        designator: required_text(element, AIXM, "designator", "Airspace")?,
        name: required_text(element, AIXM, "name", "Airspace")?,
        local_type: required_text(element, AIXM, "localType", "Airspace")?,
        class,
        activation: parse_activation(element)?,
        components,
        id,
    })
}

fn parse_border(element: &Element) -> Result<GeoBorder, Error> {
    let id = required_child(element, GML, "identifier", "GeoBorder")?
        .text()
        .to_string();
    let name = required_text(element, AIXM, "name", "GeoBorder")?;
    let curve = element.descendant(AIXM, "Curve").ok_or(Error::MissingElement {
        parent: "GeoBorder",
        element: "Curve",
    })?;

    Ok(GeoBorder {
        id,
        name,
        curve: parse_curve(curve)?,
    })
}
