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

use std::{fmt, str::FromStr};
use serde::{Deserialize,Serialize};
use ntl_common::BoundingBox;
use crate::errors::{invalid_request, NtlEeError, Result};

/// approximate length of one degree (of latitude) in meters
pub const METERS_PER_DEGREE: f64 = 111_320.0;

pub const WGS84_CRS: &str = "EPSG:4326";

/// max number of pixels per grid dimension the server accepts for pixel requests
pub const MAX_GRID_DIMENSION: u32 = 32768;

/// the raw payload formats we can request for pixel data
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum FileFormat {
    Npy,
    GeoTiff,
    Png,
}

impl FileFormat {
    pub fn file_extension (&self)->&'static str {
        match *self {
            FileFormat::Npy => "npy",
            FileFormat::GeoTiff => "tif",
            FileFormat::Png => "png",
        }
    }

    pub fn for_ext (ext: &str)->Option<FileFormat> {
        match ext {
            "npy" => Some(FileFormat::Npy),
            "tif" | "tiff" => Some(FileFormat::GeoTiff),
            "png" => Some(FileFormat::Png),
            _ => None
        }
    }

    /// the value used in service requests
    pub fn as_str (&self)->&'static str {
        match *self {
            FileFormat::Npy => "NPY",
            FileFormat::GeoTiff => "GEO_TIFF",
            FileFormat::Png => "PNG",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = NtlEeError;

    fn from_str (s: &str)->Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NPY" => Ok(FileFormat::Npy),
            "GEO_TIFF" | "GEOTIFF" | "TIF" | "TIFF" => Ok(FileFormat::GeoTiff),
            "PNG" => Ok(FileFormat::Png),
            _ => Err( invalid_request( format!("unsupported file format {s}")))
        }
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub shear_x: f64,
    pub translate_x: f64,
    pub shear_y: f64,
    pub scale_y: f64,
    pub translate_y: f64,
}

/// the pixel grid the server should resample an image into
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct PixelGrid {
    pub dimensions: GridDimensions,
    pub affine_transform: AffineTransform,
    pub crs_code: String,
}

impl PixelGrid {
    /// lon/lat grid with square pixels of roughly `scale` meters that covers `region`, anchored at its north-west corner
    pub fn for_region (region: &BoundingBox<f64>, scale: f64)->Result<PixelGrid> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err( invalid_request( format!("pixel scale has to be positive: {scale}")))
        }
        if !region.is_valid() {
            return Err( invalid_request( format!("invalid region {region:?}")))
        }

        let deg = scale / METERS_PER_DEGREE;
        let width = grid_dimension( region.width() / deg)?;
        let height = grid_dimension( region.height() / deg)?;

        Ok( PixelGrid {
            dimensions: GridDimensions { width, height },
            affine_transform: AffineTransform {
                scale_x: deg,
                shear_x: 0.0,
                translate_x: region.west,
                shear_y: 0.0,
                scale_y: -deg,
                translate_y: region.north,
            },
            crs_code: WGS84_CRS.to_string()
        })
    }

    pub fn n_pixels (&self)->u64 {
        self.dimensions.width as u64 * self.dimensions.height as u64
    }
}

fn grid_dimension (n_pixels: f64)->Result<u32> {
    let n = n_pixels.ceil().max(1.0);
    if n > MAX_GRID_DIMENSION as f64 {
        Err( invalid_request( format!("grid dimension of {n} pixels exceeds max of {MAX_GRID_DIMENSION}, use a larger scale")))
    } else {
        Ok( n as u32)
    }
}
