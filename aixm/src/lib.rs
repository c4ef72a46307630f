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

//! AIXM 5.1.1 airspace parser.
//!
//! This crate reads the airspaces and borders of an AIXM 5.1.1 document into
//! a plain geometry model. Airspace volumes that borrow the geometry of
//! other airspaces can be expanded with the dependency resolver and arcs and
//! circles can be turned into points with the [`GeometryResolver`].
//!
//! # Examples
//!
//! Parse a document, expand the dependencies and tessellate all arcs with a
//! point every 5 degrees:
//!
//! ```no_run
//! use aixm::{Document, GeometryResolver};
//!
//! # fn main() -> Result<(), aixm::Error> {
//! let data = std::fs::read("airspaces.xml").expect("file should be readable");
//! let mut doc = Document::parse(&data)?;
//!
//! if doc.contains_curve_references() {
//!     println!("some borders are defined in other documents");
//! }
//!
//! doc.resolve_dependencies()?;
//! GeometryResolver::new(5)?.resolve_document(&mut doc);
//!
//! for airspace in doc.top_level_airspaces() {
//!     println!("{} ({})", airspace.name, airspace.class);
//! }
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod features;
pub mod geodesy;
mod gml;
mod parser;
mod resolver;
mod tessellate;
pub mod xml;

pub use document::Document;
pub use error::Error;
pub use features::*;
pub use gml::{Curve, Position, Segment};
pub use tessellate::GeometryResolver;
