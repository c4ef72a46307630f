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

use std::collections::{HashMap, HashSet};

use crate::features::{Airspace, GeoBorder};
use crate::gml::Curve;

/// The airspaces and borders of one AIXM document.
///
/// Airspaces are kept in document order and indexed by their identifier. If
/// an identifier occurs twice, lookups return the first airspace.
#[derive(Clone, Debug, Default)]
pub struct Document {
    airspaces: Vec<Airspace>,
    borders: Vec<GeoBorder>,
    index: HashMap<String, usize>,
    pub(crate) referenced: HashSet<String>,
    contains_curve_references: bool,
}

impl Document {
    /// Creates a document from parsed features.
    ///
    /// Every airspace that is the target of a volume dependency within the
    /// document is marked as referenced.
    pub fn new(airspaces: Vec<Airspace>, borders: Vec<GeoBorder>) -> Self {
        let mut index = HashMap::with_capacity(airspaces.len());
        for (i, airspace) in airspaces.iter().enumerate() {
            index.entry(airspace.id.clone()).or_insert(i);
        }

        let volumes = || {
            airspaces
                .iter()
                .flat_map(|a| a.components.iter().map(|c| &c.volume))
        };

        let referenced = volumes()
            .flat_map(|v| v.dependencies.iter())
            .filter(|d| index.contains_key(&d.airspace))
            .map(|d| d.airspace.clone())
            .collect();

        let contains_curve_references = volumes()
            .flat_map(|v| v.curves.iter())
            .any(|c| matches!(c, Curve::Reference(_)));

        Self {
            airspaces,
            borders,
            index,
            referenced,
            contains_curve_references,
        }
    }

    /// Returns all airspaces in document order.
    pub fn airspaces(&self) -> &[Airspace] {
        &self.airspaces
    }

    /// Returns the airspaces for in-place modification, e.g. tessellation.
    ///
    /// Identifiers must not be changed since the index is not rebuilt.
    pub fn airspaces_mut(&mut self) -> &mut [Airspace] {
        &mut self.airspaces
    }

    pub fn borders(&self) -> &[GeoBorder] {
        &self.borders
    }

    pub fn borders_mut(&mut self) -> &mut [GeoBorder] {
        &mut self.borders
    }

    /// Finds an airspace by its identifier.
    pub fn find_airspace(&self, id: &str) -> Option<&Airspace> {
        self.index.get(id).map(|&i| &self.airspaces[i])
    }

    /// Returns `true` if another airspace borrows the geometry of the
    /// airspace with this identifier.
    pub fn is_referenced(&self, id: &str) -> bool {
        self.referenced.contains(id)
    }

    pub fn referenced(&self) -> &HashSet<String> {
        &self.referenced
    }

    /// Returns the airspaces that are not referenced by others.
    pub fn top_level_airspaces(&self) -> impl Iterator<Item = &Airspace> {
        self.airspaces
            .iter()
            .filter(|a| !self.referenced.contains(&a.id))
    }

    /// Returns `true` if an airspace volume has a curve that is defined in
    /// another document.
    pub fn contains_curve_references(&self) -> bool {
        self.contains_curve_references
    }
}
