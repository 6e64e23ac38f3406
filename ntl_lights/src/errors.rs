/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;
use ntl_common::config::NtlConfigError;
use ntl_ee::NtlEeError;

pub type Result<T> = std::result::Result<T, NtlLightsError>;

#[derive(Error,Debug)]
pub enum NtlLightsError {

    #[error("no features with geometry in boundary file {0}")]
    NoFeatures(String),

    #[error("no feature bounds to compute area of interest from")]
    NoFeatureBounds,

    #[error("invalid area of interest margin: {0} (must be non-negative)")]
    InvalidMargin(f64),

    #[error("unsupported boundary file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid year range [{0},{1})")]
    InvalidYearRange(i32,i32),

    // generic self-created error
    #[error("night light operation failed: {0}")]
    OpFailedError(String),

    // pass through for IO errors
    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("JSON error: {0}")]
    JsonError( #[from] serde_json::Error),

    // pass through for Earth Engine client errors
    #[error("Earth Engine error: {0}")]
    EeError( #[from] NtlEeError),

    #[error("config error: {0}")]
    ConfigError( #[from] NtlConfigError),

    #[cfg(feature="gdal")]
    #[error("gdal error {0}")]
    GdalError( #[from] gdal::errors::GdalError),
}

pub fn op_failed (msg: impl ToString)->NtlLightsError {
    NtlLightsError::OpFailedError(msg.to_string())
}

pub fn invalid_geometry (msg: impl ToString)->NtlLightsError {
    NtlLightsError::InvalidGeometry(msg.to_string())
}
