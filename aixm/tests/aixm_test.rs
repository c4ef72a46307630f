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

use aixm::{Curve, Document, GeometryResolver, Segment, Uom};

const AIXM_DATA: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<message:AIXMBasicMessage
  xmlns:aixm="http://www.aixm.aero/schema/5.1.1"
  xmlns:gml="http://www.opengis.net/gml/3.2"
  xmlns:message="http://www.aixm.aero/schema/5.1.1/message"
  xmlns:xlink="http://www.w3.org/1999/xlink">

  <!-- Control zone drawn as circle -->
  <message:hasMember>
    <aixm:Airspace gml:id="uuid.arsp001">
      <gml:identifier codeSpace="urn:uuid:">arsp001</gml:identifier>
      <aixm:timeSlice>
        <aixm:AirspaceTimeSlice gml:id="ASE1">
          <aixm:interpretation>BASELINE</aixm:interpretation>
          <aixm:type>D</aixm:type>
          <aixm:localType>CTR</aixm:localType>
          <aixm:designator>EDHL</aixm:designator>
          <aixm:name>LUEBECK CTR</aixm:name>
          <aixm:geometryComponent>
            <aixm:AirspaceGeometryComponent gml:id="AGC1">
              <aixm:operation>BASE</aixm:operation>
              <aixm:operationSequence>1</aixm:operationSequence>
              <aixm:theAirspaceVolume>
                <aixm:AirspaceVolume gml:id="AV1">
                  <aixm:upperLimit uom="FT">1500</aixm:upperLimit>
                  <aixm:upperLimitReference>SFC</aixm:upperLimitReference>
                  <aixm:lowerLimit uom="FT">0</aixm:lowerLimit>
                  <aixm:lowerLimitReference>SFC</aixm:lowerLimitReference>
                  <aixm:horizontalProjection>
                    <aixm:Surface srsName="urn:ogc:def:crs:EPSG::4326" gml:id="S1">
                      <gml:patches>
                        <gml:PolygonPatch>
                          <gml:exterior>
                            <gml:Ring>
                              <gml:curveMember>
                                <gml:Curve gml:id="C1">
                                  <gml:segments>
                                    <gml:CircleByCenterPoint interpolation="circularArcCenterPointWithRadius" numArc="1">
                                      <gml:pos>53.915078111 10.040442194</gml:pos>
                                      <gml:radius uom="[nmi_i]">2</gml:radius>
                                    </gml:CircleByCenterPoint>
                                  </gml:segments>
                                </gml:Curve>
                              </gml:curveMember>
                            </gml:Ring>
                          </gml:exterior>
                        </gml:PolygonPatch>
                      </gml:patches>
                    </aixm:Surface>
                  </aixm:horizontalProjection>
                </aixm:AirspaceVolume>
              </aixm:theAirspaceVolume>
            </aixm:AirspaceGeometryComponent>
          </aixm:geometryComponent>
        </aixm:AirspaceTimeSlice>
      </aixm:timeSlice>
    </aixm:Airspace>
  </message:hasMember>

  <!-- Airspace that borrows the geometry of arsp003 -->
  <message:hasMember>
    <aixm:Airspace gml:id="uuid.arsp002">
      <gml:identifier codeSpace="urn:uuid:">arsp002</gml:identifier>
      <aixm:timeSlice>
        <aixm:AirspaceTimeSlice gml:id="ASE2">
          <aixm:interpretation>BASELINE</aixm:interpretation>
          <aixm:type>CLASS</aixm:type>
          <aixm:localType>TMZ</aixm:localType>
          <aixm:designator>EDHL TMZ</aixm:designator>
          <aixm:name>LUEBECK TMZ</aixm:name>
          <aixm:class>
            <aixm:AirspaceLayerClass gml:id="ALC2">
              <aixm:classification>E</aixm:classification>
            </aixm:AirspaceLayerClass>
          </aixm:class>
          <aixm:geometryComponent>
            <aixm:AirspaceGeometryComponent gml:id="AGC2">
              <aixm:theAirspaceVolume>
                <aixm:AirspaceVolume gml:id="AV2">
                  <aixm:contributorAirspace>
                    <aixm:AirspaceVolumeDependency gml:id="AVD2">
                      <aixm:dependency>FULL_GEOMETRY</aixm:dependency>
                      <aixm:theAirspace xlink:href="urn:uuid:arsp003"/>
                    </aixm:AirspaceVolumeDependency>
                  </aixm:contributorAirspace>
                </aixm:AirspaceVolume>
              </aixm:theAirspaceVolume>
            </aixm:AirspaceGeometryComponent>
          </aixm:geometryComponent>
        </aixm:AirspaceTimeSlice>
      </aixm:timeSlice>
    </aixm:Airspace>
  </message:hasMember>

  <!-- Geometry donor -->
  <message:hasMember>
    <aixm:Airspace gml:id="uuid.arsp003">
      <gml:identifier codeSpace="urn:uuid:">arsp003</gml:identifier>
      <aixm:timeSlice>
        <aixm:AirspaceTimeSlice gml:id="ASE3">
          <aixm:interpretation>BASELINE</aixm:interpretation>
          <aixm:type>D</aixm:type>
          <aixm:localType>RMZ</aixm:localType>
          <aixm:designator>EDHL RMZ</aixm:designator>
          <aixm:name>LUEBECK RMZ</aixm:name>
          <aixm:geometryComponent>
            <aixm:AirspaceGeometryComponent gml:id="AGC3">
              <aixm:theAirspaceVolume>
                <aixm:AirspaceVolume gml:id="AV3">
                  <aixm:upperLimit uom="FL">65</aixm:upperLimit>
                  <aixm:upperLimitReference>STD</aixm:upperLimitReference>
                  <aixm:lowerLimit uom="FT">1500</aixm:lowerLimit>
                  <aixm:lowerLimitReference>MSL</aixm:lowerLimitReference>
                  <aixm:horizontalProjection>
                    <aixm:Surface srsName="urn:ogc:def:crs:EPSG::4326" gml:id="S3">
                      <gml:patches>
                        <gml:PolygonPatch>
                          <gml:exterior>
                            <gml:Ring>
                              <gml:curveMember>
                                <gml:Curve gml:id="C3">
                                  <gml:segments>
                                    <gml:GeodesicString>
                                      <gml:posList>54.0 10.0 54.0 10.5 53.8 10.5</gml:posList>
                                    </gml:GeodesicString>
                                    <gml:ArcByCenterPoint interpolation="circularArcCenterPointWithRadius" numArc="1">
                                      <gml:pos>53.8 10.25</gml:pos>
                                      <gml:radius uom="KM">16.7</gml:radius>
                                      <gml:startAngle uom="deg">90</gml:startAngle>
                                      <gml:endAngle uom="deg">270</gml:endAngle>
                                    </gml:ArcByCenterPoint>
                                  </gml:segments>
                                </gml:Curve>
                              </gml:curveMember>
                            </gml:Ring>
                          </gml:exterior>
                        </gml:PolygonPatch>
                      </gml:patches>
                    </aixm:Surface>
                  </aixm:horizontalProjection>
                </aixm:AirspaceVolume>
              </aixm:theAirspaceVolume>
            </aixm:AirspaceGeometryComponent>
          </aixm:geometryComponent>
        </aixm:AirspaceTimeSlice>
      </aixm:timeSlice>
    </aixm:Airspace>
  </message:hasMember>

  <!-- Border -->
  <message:hasMember>
    <aixm:GeoBorder gml:id="uuid.gb001">
      <gml:identifier codeSpace="urn:uuid:">gb001</gml:identifier>
      <aixm:timeSlice>
        <aixm:GeoBorderTimeSlice gml:id="GB1">
          <aixm:interpretation>BASELINE</aixm:interpretation>
          <aixm:name>GERMANY_DENMARK</aixm:name>
          <aixm:type>STATE</aixm:type>
          <aixm:border>
            <aixm:Curve gml:id="C4">
              <gml:segments>
                <gml:GeodesicString>
                  <gml:posList>54.8 8.6 54.9 9.4 54.8 10.0</gml:posList>
                </gml:GeodesicString>
              </gml:segments>
            </aixm:Curve>
          </aixm:border>
        </aixm:GeoBorderTimeSlice>
      </aixm:timeSlice>
    </aixm:GeoBorder>
  </message:hasMember>
</message:AIXMBasicMessage>"#;

#[test]
fn parse_document() {
    let doc = Document::parse(AIXM_DATA).expect("should parse AIXM data");

    assert_eq!(doc.airspaces().len(), 3);
    assert_eq!(doc.borders().len(), 1);
    assert!(!doc.contains_curve_references());

    let tmz = doc.find_airspace("arsp002").expect("arsp002 should be found");
    assert_eq!(tmz.class, "E");
    assert_eq!(tmz.local_type, "TMZ");
    assert!(tmz.components[0].volume.is_dependency());

    let rmz = doc.find_airspace("arsp003").expect("arsp003 should be found");
    let upper = rmz.components[0].volume.upper_limit.as_ref().unwrap();
    assert_eq!(upper.uom, Uom::FL);
    assert_eq!(upper.value, "65");
    assert_eq!(upper.reference.as_deref(), Some("STD"));

    let border = &doc.borders()[0];
    assert_eq!(border.name, "GERMANY_DENMARK");
    assert_eq!(border.curve.segments().len(), 3);
}

#[test]
fn resolve_document() {
    let mut doc = Document::parse(AIXM_DATA).expect("should parse AIXM data");

    let top_level: Vec<_> = doc.top_level_airspaces().map(|a| a.id.clone()).collect();
    assert_eq!(top_level, vec!["arsp001", "arsp002"]);

    doc.resolve_dependencies().expect("should resolve dependencies");
    GeometryResolver::new(10)
        .expect("step should be valid")
        .resolve_document(&mut doc);

    let tmz = doc.find_airspace("arsp002").expect("arsp002 should be found");
    assert_eq!(tmz.components.len(), 1);
    assert!(!tmz.components[0].volume.is_dependency());
    assert!(doc.is_referenced("arsp003"));

    for airspace in doc.airspaces() {
        for component in &airspace.components {
            for curve in &component.volume.curves {
                match curve {
                    Curve::Inline(segments) => {
                        assert!(segments.iter().all(Segment::is_resolved))
                    }
                    Curve::Reference(id) => panic!("unexpected reference {id}"),
                }
            }
        }
    }

    // half circle from 90° to 270° with a point every 10°
    match &tmz.components[0].volume.curves[0].segments()[3] {
        Segment::Resolved { positions, .. } => assert_eq!(positions.len(), 19),
        s => panic!("arc should be resolved but is {s:?}"),
    }
}
