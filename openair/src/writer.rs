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

//! Writer of the OpenAir text format.
//!
//! See <http://www.winpilot.com/UsersGuide/UserAirspace.asp> for the format.
//! Coordinates are written as degrees, minutes and seconds and every line
//! ends with CRLF.

use std::io::Write;

use aixm::Position;

use crate::error::Error;
use crate::record::{Element, Record};

/// Writes [`Record`]s as OpenAir airspaces.
///
/// The center (`V X=`) and direction (`V D=`) variables are only written if
/// they change within a record.
///
/// # Examples
///
/// ```
/// use openair::{Element, Record, Writer};
///
/// let record = Record {
///     class: "D".to_string(),
///     name: "HAMBURG".to_string(),
///     ceiling: "2500 FT AMSL".to_string(),
///     floor: "GND".to_string(),
///     elements: vec![Element::point(53.63, 9.99)],
///     ..Default::default()
/// };
///
/// let mut writer = Writer::new(Vec::new());
/// writer.write_record(&record).unwrap();
///
/// assert_eq!(
///     String::from_utf8(writer.into_inner()).unwrap(),
///     "AC D\r\nAN HAMBURG\r\nAH 2500 FT AMSL\r\nAL GND\r\nDP 53:37:48 N 009:59:24 E\r\n"
/// );
/// ```
pub struct Writer<W> {
    inner: W,
    center: Option<Position>,
    clockwise: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            center: None,
            clockwise: true,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        write!(self.inner, "{line}\r\n")?;
        Ok(())
    }

    /// Writes an empty line, e.g. to separate records.
    pub fn write_blank_line(&mut self) -> Result<(), Error> {
        self.write_line("")
    }

    pub fn write_record(&mut self, record: &Record) -> Result<(), Error> {
        self.center = None;
        self.clockwise = true;

        self.write_line(&format!("AC {}", record.class))?;
        if let Some(ident) = &record.ident {
            self.write_line(&format!("AI {ident}"))?;
        }
        if let Some(airspace_type) = &record.airspace_type {
            self.write_line(&format!("AY {airspace_type}"))?;
        }
        self.write_line(&format!("AN {}", record.name))?;
        self.write_line(&format!("AH {}", record.ceiling))?;
        self.write_line(&format!("AL {}", record.floor))?;
        if let Some(ground_name) = &record.ground_name {
            self.write_line(&format!("AG {ground_name}"))?;
        }
        if let Some(frequency) = &record.frequency {
            self.write_line(&format!("AF {frequency}"))?;
        }

        for element in &record.elements {
            self.write_element(element)?;
        }

        Ok(())
    }

    pub fn write_element(&mut self, element: &Element) -> Result<(), Error> {
        match element {
            Element::Point { location } => {
                self.write_line(&format!("DP {}", format_coordinate(location)))
            }
            Element::Circle { center, radius } => {
                self.write_center(center)?;
                self.write_line(&format!("DC {radius}"))
            }
            Element::Arc {
                center,
                radius,
                start,
                end,
                clockwise,
            } => {
                self.write_center(center)?;
                self.write_direction(*clockwise)?;
                self.write_line(&format!("DA {radius},{start},{end}"))
            }
            Element::ArcBetween {
                center,
                start,
                end,
                clockwise,
            } => {
                self.write_center(center)?;
                self.write_direction(*clockwise)?;
                self.write_line(&format!(
                    "DB {}, {}",
                    format_coordinate(start),
                    format_coordinate(end)
                ))
            }
        }
    }

    fn write_center(&mut self, center: &Position) -> Result<(), Error> {
        if self.center.as_ref() != Some(center) {
            self.center = Some(*center);
            self.write_line(&format!("V X={}", format_coordinate(center)))?;
        }
        Ok(())
    }

    fn write_direction(&mut self, clockwise: bool) -> Result<(), Error> {
        if self.clockwise != clockwise {
            self.clockwise = clockwise;
            self.write_line(if clockwise { "V D=+" } else { "V D=-" })?;
        }
        Ok(())
    }
}

/// Splits decimal degrees into whole degrees, minutes and seconds.
///
/// Seconds are rounded half to even and carried into the minutes and degrees.
fn dms(decimal_degrees: f64) -> (u32, u32, u32) {
    let value = decimal_degrees.abs();
    let mut deg = value.trunc();
    let mut mnt = (value.fract() * 60.0).trunc();
    let mut sec = ((value - deg - mnt / 60.0) * 3600.0).round_ties_even();

    if sec >= 60.0 {
        sec = 0.0;
        mnt += 1.0;
        if mnt >= 60.0 {
            mnt = 0.0;
            deg += 1.0;
        }
    }

    (deg as u32, mnt as u32, sec as u32)
}

fn format_degrees(decimal_degrees: f64, width: usize) -> String {
    let (deg, mnt, sec) = dms(decimal_degrees);
    format!("{deg:0width$}:{mnt:02}:{sec:02}")
}

/// Formats a position like `39:35:00 S 118:59:20 W`.
pub fn format_coordinate(p: &Position) -> String {
    format!(
        "{} {} {} {}",
        format_degrees(p.latitude, 2),
        if p.latitude >= 0.0 { "N" } else { "S" },
        format_degrees(p.longitude, 3),
        if p.longitude >= 0.0 { "E" } else { "W" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(writer: Writer<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn write_line() {
        let mut writer = Writer::new(Vec::new());
        writer.write_line("line").unwrap();
        assert_eq!(output(writer), "line\r\n");
    }

    #[test]
    fn carry_rounded_seconds() {
        assert_eq!(dms(39.58333), (39, 35, 0));
        assert_eq!(dms(-118.98888), (118, 59, 20));
        assert_eq!(dms(9.99999999), (10, 0, 0));
    }

    #[test]
    fn write_point() {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_element(&Element::point(-39.58333, -118.98888))
            .unwrap();
        assert_eq!(output(writer), "DP 39:35:00 S 118:59:20 W\r\n");
    }

    #[test]
    fn write_circle() {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_element(&Element::Circle {
                center: Position::new(39.58333, 118.98888),
                radius: 10.0,
            })
            .unwrap();
        assert_eq!(output(writer), "V X=39:35:00 N 118:59:20 E\r\nDC 10\r\n");
    }

    #[test]
    fn write_arc_direction_once() {
        let mut writer = Writer::new(Vec::new());
        let mut arc = Element::Arc {
            center: Position::new(39.58333, 118.98888),
            radius: 10.1,
            start: 44.9,
            end: 88.0,
            clockwise: true,
        };
        writer.write_element(&arc).unwrap();

        if let Element::Arc { clockwise, .. } = &mut arc {
            *clockwise = false;
        }
        writer.write_element(&arc).unwrap();

        assert_eq!(
            output(writer),
            "V X=39:35:00 N 118:59:20 E\r\nDA 10.1,44.9,88\r\nV D=-\r\nDA 10.1,44.9,88\r\n"
        );
    }

    #[test]
    fn write_arc_between() {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_element(&Element::ArcBetween {
                center: Position::new(39.495, -119.775),
                start: Position::new(39.61333, -119.76833),
                end: Position::new(39.49833, -119.60166),
                clockwise: true,
            })
            .unwrap();
        assert_eq!(
            output(writer),
            "V X=39:29:42 N 119:46:30 W\r\nDB 39:36:48 N 119:46:06 W, 39:29:54 N 119:36:06 W\r\n"
        );
    }

    #[test]
    fn write_record() {
        let center = Position::new(39.495, -119.775);
        let record = Record {
            class: "C".to_string(),
            name: "RENO".to_string(),
            ceiling: "8400 ft".to_string(),
            floor: "7200 ft".to_string(),
            elements: vec![
                Element::Arc {
                    center,
                    radius: 10.0,
                    start: 270.0,
                    end: 290.0,
                    clockwise: true,
                },
                Element::Arc {
                    center,
                    radius: 7.0,
                    start: 290.0,
                    end: 320.0,
                    clockwise: false,
                },
                Element::ArcBetween {
                    center,
                    start: Position::new(39.61333, -119.76833),
                    end: Position::new(39.49833, -119.60166),
                    clockwise: true,
                },
                Element::Point { location: center },
                Element::Circle {
                    center,
                    radius: 5.0,
                },
            ],
            ..Default::default()
        };

        let mut writer = Writer::new(Vec::new());
        writer.write_record(&record).unwrap();

        let expected = [
            "AC C",
            "AN RENO",
            "AH 8400 ft",
            "AL 7200 ft",
            "V X=39:29:42 N 119:46:30 W",
            "DA 10,270,290",
            "V D=-",
            "DA 7,290,320",
            "V D=+",
            "DB 39:36:48 N 119:46:06 W, 39:29:54 N 119:36:06 W",
            "DP 39:29:42 N 119:46:30 W",
            "DC 5",
        ]
        .map(|line| format!("{line}\r\n"))
        .concat();

        assert_eq!(output(writer), expected);
    }

    #[test]
    fn write_metadata() {
        let record = Record {
            class: "D".to_string(),
            name: "HAMBURG".to_string(),
            ident: Some("a1".to_string()),
            airspace_type: Some("CTR".to_string()),
            ground_name: Some("EDDH".to_string()),
            frequency: Some("118.105".to_string()),
            ceiling: "2500 FT AMSL".to_string(),
            floor: "GND".to_string(),
            elements: Vec::new(),
        };

        let mut writer = Writer::new(Vec::new());
        writer.write_record(&record).unwrap();
        writer.write_blank_line().unwrap();

        assert_eq!(
            output(writer),
            "AC D\r\nAI a1\r\nAY CTR\r\nAN HAMBURG\r\nAH 2500 FT AMSL\r\nAL GND\r\nAG EDDH\r\nAF 118.105\r\n\r\n"
        );
    }
}
