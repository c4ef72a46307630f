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

use std::fmt;

/// Errors that reject an AIXM document.
///
/// Every variant is fatal for the document being processed. Recoverable
/// conditions, like a dependency on an airspace that is not part of the
/// document, are logged and never surface as an `Error`.
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// An XML parsing error from the underlying parser.
    Xml(String),
    /// A mandatory child element is missing.
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },
    /// An element occurs more or less often than the schema allows.
    Cardinality {
        parent: &'static str,
        element: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A curve segment of an unsupported GML kind.
    UnknownSegment(String),
    /// A value could not be parsed (e.g. a coordinate or radius).
    InvalidValue { field: &'static str, value: String },
    /// A unit of measure the model has no representation for.
    InvalidUom(String),
    /// Airspaces that depend on each other in a loop.
    DependencyCycle(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML error: {e}"),
            Self::MissingElement { parent, element } => {
                write!(f, "{parent} has no {element}")
            }
            Self::Cardinality {
                parent,
                element,
                expected,
                actual,
            } => write!(
                f,
                "{parent} should contain {expected} {element} but contains {actual}"
            ),
            Self::UnknownSegment(tag) => write!(f, "unknown curve segment: {tag}"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value for {field}: {value}")
            }
            Self::InvalidUom(uom) => write!(f, "unsupported unit of measure: {uom}"),
            Self::DependencyCycle(ident) => {
                write!(f, "airspace {ident} depends on itself")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}
