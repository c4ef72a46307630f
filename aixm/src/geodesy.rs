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

//! Flat-earth approximation of distances and bearings.
//!
//! Degrees of latitude and longitude are converted into kilometers with scale
//! factors that depend on the latitude. The factors are a Chebyshev expansion
//! of the WGS84 ellipsoid (see <http://1.usa.gov/1Wb1bv7>) and are accurate to
//! well below a meter for the distances of airspace arcs. This is not a
//! geodesic solution and should not be used for long ranges.

use crate::gml::Position;

/// Kilometers per nautical mile.
pub const KM_PER_NM: f64 = 1.852;

/// Converts nautical miles into kilometers.
pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// Returns the east and north scale factors in kilometers per degree at the
/// latitude.
pub fn scale_factors(latitude: f64) -> (f64, f64) {
    let cos1 = latitude.to_radians().cos();
    let cos2 = 2.0 * cos1 * cos1 - 1.0;
    let cos3 = 2.0 * cos1 * cos2 - cos1;
    let cos4 = 2.0 * cos1 * cos3 - cos2;
    let cos5 = 2.0 * cos1 * cos4 - cos3;

    let kx = 111.41513 * cos1 - 0.09455 * cos3 + 0.00012 * cos5;
    let ky = 111.13209 - 0.56605 * cos2 + 0.0012 * cos4;

    (kx, ky)
}

/// Returns the position at `distance_km` from `p` in direction `bearing`.
///
/// The bearing is in degrees clockwise from true north.
pub fn destination(p: &Position, bearing: f64, distance_km: f64) -> Position {
    let angle = bearing.to_radians();
    let dx = angle.sin() * distance_km;
    let dy = angle.cos() * distance_km;

    let (kx, ky) = scale_factors(p.latitude);

    Position::new(p.latitude + dy / ky, p.longitude + dx / kx)
}

/// Returns the distance in centimeters and the bearing in degrees from `p1`
/// to `p2`.
///
/// The bearing is within `[0, 360)` and `0` if both positions are equal.
pub fn distance_bearing(p1: &Position, p2: &Position) -> (f64, f64) {
    let (kx, ky) = scale_factors((p1.latitude + p2.latitude) / 2.0);

    let d_lon = (p2.longitude - p1.longitude) * kx;
    let d_lat = (p2.latitude - p1.latitude) * ky;

    let distance = d_lon.hypot(d_lat) * 100_000.0;

    let bearing = if d_lon == 0.0 && d_lat == 0.0 {
        0.0
    } else {
        (d_lon.atan2(d_lat).to_degrees() + 360.0) % 360.0
    };

    (distance, bearing)
}
