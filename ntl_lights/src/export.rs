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

//! per country/year pixel array exports

use std::path::{Path,PathBuf};
use serde::{Deserialize,Serialize};
use tracing::{debug, info};

use ntl_common::fs::{ensure_writable_dir, existing_non_empty_file, set_accessed};
use ntl_ee::{EeSession, Expression, FileFormat, PixelGrid, PixelRequest, expr::{self, ValueNode}};
use crate::aoi::{geometry_bounds, Bounds};
use crate::composite::{Composite, YearlyComposites};
use crate::errors::{invalid_geometry, Result};

/// the server side table we look up country boundaries in
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct CountryTable {
    pub table_id: String,
    /// the feature property that holds the country name
    pub name_field: String,
}

impl Default for CountryTable {
    fn default()->Self {
        CountryTable { table_id: "USDOS/LSIB_SIMPLE/2017".to_string(), name_field: "country_na".to_string() }
    }
}

/// `<country>_<year>.<ext>`
pub fn output_filename (country: &str, year: i32, format: FileFormat)->String {
    format!("{}_{}.{}", country, year, format.file_extension())
}

pub fn output_path (dir: &Path, country: &str, year: i32, format: FileFormat)->PathBuf {
    dir.join( output_filename( country, year, format))
}

/// a resolved country boundary
#[derive(Debug,Clone)]
pub struct CountryRegion {
    pub name: String,
    /// server side geometry of the country
    pub geometry: ValueNode,
    /// lon/lat bounds of the geometry, used to size the export grid
    pub bounds: Bounds,
}

impl CountryRegion {
    /// look up the country boundary on the server and compute its bounds
    pub async fn resolve (session: &EeSession, table: &CountryTable, name: &str)->Result<CountryRegion> {
        let geometry = expr::collection_geometry( expr::country_feature_collection( &table.table_id, &table.name_field, name));
        let v = session.compute_value( &Expression::new( geometry.clone())).await?;
        let gj: geojson::Geometry = serde_json::from_value(v)?;

        let bounds = geometry_bounds( &gj)?.ok_or_else(|| invalid_geometry( format!("empty boundary for country '{name}' in {}", table.table_id)))?;
        debug!("{name} bounds: {bounds:?}");

        Ok( CountryRegion { name: name.to_string(), geometry, bounds } )
    }
}

/// parameters for one (country, year) pixel array request
#[derive(Debug,Clone)]
pub struct ExportRequest {
    pub country: String,
    pub year: i32,
    pub band: String,
    pub region: ValueNode,
    pub region_bounds: Bounds,
    /// pixel size in meters
    pub scale: f64,
    pub format: FileFormat,
}

impl ExportRequest {
    pub fn new (country: &CountryRegion, composite: &Composite, scale: f64, format: FileFormat)->Self {
        ExportRequest {
            country: country.name.clone(),
            year: composite.year,
            band: composite.band.clone(),
            region: country.geometry.clone(),
            region_bounds: country.bounds,
            scale,
            format
        }
    }

    pub fn pixel_request (&self, composite: &Composite)->Result<PixelRequest> {
        Ok( PixelRequest {
            expression: composite.clipped_to( self.region.clone()),
            band: self.band.clone(),
            grid: PixelGrid::for_region( &self.region_bounds, self.scale)?,
            format: self.format
        })
    }

    pub fn filename (&self)->String {
        output_filename( &self.country, self.year, self.format)
    }
}

#[derive(Serialize,Deserialize,Debug,Clone)]
#[serde(default)]
pub struct ExportSettings {
    /// pixel size in meters
    pub scale: f64,
    pub format: FileFormat,
    /// do not re-download already existing (non-empty) output files
    pub skip_existing: bool,
}

impl Default for ExportSettings {
    fn default()->Self {
        ExportSettings { scale: 500.0, format: FileFormat::Npy, skip_existing: false }
    }
}

#[derive(Debug,Default)]
pub struct ExportReport {
    /// written files and their sizes
    pub written: Vec<(PathBuf,u64)>,
    pub skipped: Vec<PathBuf>,
}

impl ExportReport {
    pub fn total_bytes (&self)->u64 {
        self.written.iter().map( |(_,len)| *len).sum()
    }

    pub fn append (&mut self, mut other: ExportReport) {
        self.written.append( &mut other.written);
        self.skipped.append( &mut other.skipped);
    }
}

/// sequentially exports composites for a list of countries. Any failure aborts the remaining exports
pub struct Exporter<'a> {
    session: &'a EeSession,
    settings: ExportSettings,
}

impl<'a> Exporter<'a> {
    pub fn new (session: &'a EeSession, settings: ExportSettings)->Self {
        Exporter { session, settings }
    }

    /// request a single pixel array and write the response bytes verbatim to `<dir>/<country>_<year>.<ext>`
    pub async fn export (&self, request: &ExportRequest, composite: &Composite, dir: &Path, report: &mut ExportReport)->Result<()> {
        let path = dir.join( request.filename());

        if self.settings.skip_existing && existing_non_empty_file( &path).is_ok() {
            debug!("skipping existing {:?}", path);
            set_accessed( &path)?;
            report.skipped.push( path);
            return Ok(())
        }

        let url = self.session.get_download_url( &request.pixel_request( composite)?).await?;
        let len = self.session.download( &url, &path).await?;
        info!("saved {:?} ({} bytes)", path, len);
        report.written.push( (path, len));

        Ok(())
    }

    /// export all yearly composites for all countries into `dir`, which is created if it does not exist.
    /// A non-writable `dir` fails before any request is sent
    pub async fn export_all (&self, countries: &[CountryRegion], composites: &YearlyComposites, dir: &Path)->Result<ExportReport> {
        ensure_writable_dir( dir)?;
        let mut report = ExportReport::default();

        for country in countries {
            for composite in composites.iter() {
                let request = ExportRequest::new( country, composite, self.settings.scale, self.settings.format);
                self.export( &request, composite, dir, &mut report).await?;
            }
        }

        Ok(report)
    }
}
