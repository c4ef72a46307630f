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

/// Errors raised while converting or writing OpenAir records.
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// The AIXM document could not be parsed or resolved.
    Aixm(aixm::Error),
    /// A flight level that is not referenced to the standard pressure.
    InvalidLimitReference {
        value: String,
        reference: Option<String>,
    },
    /// The airspace has no upper or lower limit to print.
    MissingVerticalLimit { airspace: String },
    /// Nothing is left to draw for the airspace.
    NoComponents { airspace: String },
    /// A volume depends on more than one airspace.
    MultipleDependencies { volume: String },
    /// A volume depends on an airspace that is not part of the document.
    UnknownDependency { volume: String, airspace: String },
    /// Writing the output failed.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aixm(e) => write!(f, "{e}"),
            Self::InvalidLimitReference { value, reference } => write!(
                f,
                "flight level {value} with reference {}",
                reference.as_deref().unwrap_or("none")
            ),
            Self::MissingVerticalLimit { airspace } => {
                write!(f, "airspace {airspace} has no vertical limits")
            }
            Self::NoComponents { airspace } => write!(f, "no components in airspace {airspace}"),
            Self::MultipleDependencies { volume } => {
                write!(f, "volume {volume} depends on more than one airspace")
            }
            Self::UnknownDependency { volume, airspace } => {
                write!(f, "airspace {airspace} of volume {volume} not found")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Aixm(e) => Some(e),
            _ => None,
        }
    }
}

impl From<aixm::Error> for Error {
    fn from(e: aixm::Error) -> Self {
        Self::Aixm(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
