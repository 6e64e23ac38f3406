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

//! area of interest computation from vector boundary files

use std::path::Path;
use geo::BoundingRect;
use geojson::GeoJson;
use serde::{Deserialize,Serialize};
use tracing::debug;

use ntl_common::{BoundingBox, fs::{extension, filepath_contents}};
use ntl_ee::expr::{rectangle, ValueNode};
use crate::errors::{invalid_geometry, NtlLightsError, Result};

pub type Bounds = BoundingBox<f64>;

/// default margin (in degrees) we add around the union of all feature bounds
pub const DEFAULT_MARGIN: f64 = 0.5;

/// the rectangular region we use to bound remote data queries
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct AreaOfInterest {
    /// union of all feature bounds
    pub feature_bounds: Bounds,
    pub margin: f64,
    /// `feature_bounds` padded by `margin` on all sides
    pub bounds: Bounds,
}

impl AreaOfInterest {
    /// fold per-feature bounds into their union and pad it by `margin`
    pub fn from_feature_bounds<I> (bounds: I, margin: f64)->Result<AreaOfInterest> where I: IntoIterator<Item=Bounds> {
        if !(margin.is_finite() && margin >= 0.0) {
            return Err( NtlLightsError::InvalidMargin(margin))
        }

        let feature_bounds = Bounds::from_bounds( bounds).ok_or( NtlLightsError::NoFeatureBounds)?;
        if !feature_bounds.is_valid() {
            return Err( invalid_geometry( format!("inverted feature bounds {feature_bounds:?}")))
        }

        Ok( AreaOfInterest { feature_bounds, margin, bounds: feature_bounds.padded( margin) } )
    }

    /// compute the area of interest for all features of a boundary file
    pub fn from_file (path: impl AsRef<Path>, margin: f64)->Result<AreaOfInterest> {
        let path = path.as_ref();
        let bounds = feature_bounds( path)?;
        if bounds.is_empty() {
            return Err( NtlLightsError::NoFeatures( path.to_string_lossy().to_string()))
        }
        debug!("read {} feature bounds from {:?}", bounds.len(), path);
        Self::from_feature_bounds( bounds, margin)
    }

    /// the rectangle geometry handed to the remote service
    pub fn geometry (&self)->ValueNode {
        rectangle( &self.bounds)
    }
}

/// per feature bounding boxes of a vector boundary file. GeoJSON files are always supported, other
/// formats (such as ESRI shapefiles) require the `gdal` feature
pub fn feature_bounds (path: &Path)->Result<Vec<Bounds>> {
    match extension( &path).map( |ext| ext.to_ascii_lowercase()).as_deref() {
        Some("geojson") | Some("json") => {
            let data = filepath_contents( &path)?;
            let gj: GeoJson = String::from_utf8_lossy( &data).parse()?;
            geojson_feature_bounds( &gj)
        }

        #[cfg(feature="gdal")]
        Some(_) => ogr_feature_bounds( path),

        _ => Err( NtlLightsError::UnsupportedFormat( path.to_string_lossy().to_string()))
    }
}

/// bounds of all features that have a geometry
pub fn geojson_feature_bounds (gj: &GeoJson)->Result<Vec<Bounds>> {
    let mut bounds = Vec::new();

    match gj {
        GeoJson::FeatureCollection(fc) => {
            for f in &fc.features {
                if let Some(geom) = &f.geometry {
                    if let Some(bb) = geometry_bounds( geom)? { bounds.push(bb) }
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(geom) = &f.geometry {
                if let Some(bb) = geometry_bounds( geom)? { bounds.push(bb) }
            }
        }
        GeoJson::Geometry(geom) => {
            if let Some(bb) = geometry_bounds( geom)? { bounds.push(bb) }
        }
    }

    Ok(bounds)
}

/// bounding box of a GeoJSON geometry. Returns None for empty geometries
pub fn geometry_bounds (geom: &geojson::Geometry)->Result<Option<Bounds>> {
    let g: geo_types::Geometry<f64> = geo_types::Geometry::<f64>::try_from( geom.clone())?;
    Ok( g.bounding_rect().map( |r| Bounds::new( r.min().x, r.min().y, r.max().x, r.max().y)) )
}

#[cfg(feature="gdal")]
fn ogr_feature_bounds (path: &Path)->Result<Vec<Bounds>> {
    use gdal::{Dataset, vector::LayerAccess};

    let ds = Dataset::open( path)?;
    let mut bounds = Vec::new();

    for mut layer in ds.layers() {
        for feature in layer.features() {
            if let Some(geom) = feature.geometry() {
                let env = geom.envelope();
                bounds.push( Bounds::new( env.MinX, env.MinY, env.MaxX, env.MaxY));
            }
        }
    }

    Ok(bounds)
}
