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

//! OpenAir output for AIXM airspaces.
//!
//! The [`Converter`] turns the airspaces and borders of an
//! [`aixm::Document`] into [`Record`]s and the [`Writer`] prints them in the
//! OpenAir text format:
//!
//! ```no_run
//! use std::fs::File;
//!
//! use aixm::{Document, GeometryResolver};
//! use openair::{Converter, Writer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("airspaces.xml")?;
//! let mut doc = Document::parse(&data)?;
//! GeometryResolver::new(10)?.resolve_document(&mut doc);
//!
//! let mut writer = Writer::new(File::create("airspaces.txt")?);
//! for record in Converter::new(&doc).convert_airspaces(true)? {
//!     writer.write_record(&record)?;
//!     writer.write_blank_line()?;
//! }
//! # Ok(())
//! # }
//! ```

mod convert;
mod error;
mod record;
mod writer;

pub use convert::Converter;
pub use error::Error;
pub use record::{Element, Record};
pub use writer::{format_coordinate, Writer};
