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

//! Expansion of volume dependencies.
//!
//! A volume may borrow the horizontal geometry of another airspace instead
//! of defining its own. The resolver follows these dependencies through the
//! document and replaces them by the components of the target airspace.

use std::collections::HashSet;

use log::{debug, warn};

use crate::document::Document;
use crate::error::Error;
use crate::features::{Airspace, AirspaceGeometryComponent};

impl Document {
    /// Returns the components of the airspace with all dependencies expanded.
    ///
    /// Components that own their geometry are returned unchanged. A
    /// dependency is replaced by the expanded components of its target
    /// airspace. Targets that are not part of the document are skipped with a
    /// warning. A chain of dependencies that leads back to an airspace on
    /// the chain is rejected.
    pub fn dependant_components(
        &self,
        airspace: &Airspace,
    ) -> Result<Vec<AirspaceGeometryComponent>, Error> {
        let mut components = Vec::new();
        self.expand(airspace, &mut Vec::new(), &mut HashSet::new(), &mut components)?;
        Ok(components)
    }

    fn expand<'a>(
        &'a self,
        airspace: &'a Airspace,
        path: &mut Vec<&'a str>,
        referenced: &mut HashSet<String>,
        components: &mut Vec<AirspaceGeometryComponent>,
    ) -> Result<(), Error> {
        if path.contains(&airspace.id.as_str()) {
            return Err(Error::DependencyCycle(airspace.id.clone()));
        }

        path.push(&airspace.id);

        for component in &airspace.components {
            let volume = &component.volume;

            if !volume.is_dependency() {
                components.push(component.clone());
                continue;
            }

            for dependency in &volume.dependencies {
                match self.find_airspace(&dependency.airspace) {
                    Some(target) => {
                        debug!(
                            "volume {} of {} takes the geometry of {}",
                            volume.ident(),
                            airspace.id,
                            target.id
                        );
                        referenced.insert(target.id.clone());
                        self.expand(target, path, referenced, components)?;
                    }
                    None => warn!(
                        "unable to find dependant airspace {} for volume {}",
                        dependency.airspace,
                        volume.ident()
                    ),
                }
            }
        }

        path.pop();
        Ok(())
    }

    /// Expands the dependencies of every airspace and marks the airspaces
    /// that were reached as referenced. The expansion itself is discarded.
    ///
    /// Marks are never removed, so donors stay referenced after their
    /// dependants were expanded.
    pub fn mark_referenced(&mut self) -> Result<(), Error> {
        let mut referenced = HashSet::new();

        for airspace in self.airspaces() {
            self.expand(airspace, &mut Vec::new(), &mut referenced, &mut Vec::new())?;
        }

        self.referenced.extend(referenced);
        Ok(())
    }

    /// Replaces the components of every airspace by their expansion.
    ///
    /// Afterwards no volume in the document carries a dependency on an
    /// airspace of this document. The referenced marks are kept so that
    /// donors can still be excluded from the output.
    pub fn resolve_dependencies(&mut self) -> Result<(), Error> {
        self.mark_referenced()?;

        let expanded = self
            .airspaces()
            .iter()
            .map(|a| self.dependant_components(a))
            .collect::<Result<Vec<_>, _>>()?;

        for (airspace, components) in self.airspaces_mut().iter_mut().zip(expanded) {
            airspace.components = components;
        }

        Ok(())
    }
}
