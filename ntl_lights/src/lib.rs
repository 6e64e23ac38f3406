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
#![allow(unused)]
#![doc = include_str!("../doc/ntl_lights.md")]

use std::path::{Path,PathBuf};
use serde::{Deserialize,Serialize};
use tracing::{info, warn};

use ntl_common::config::env_expand;
use ntl_ee::{EeConfig, EeSession, FileFormat};

pub mod errors;
pub use errors::*;

pub mod aoi;
pub use aoi::{AreaOfInterest, Bounds};

pub mod composite;
pub use composite::{Composite, DataSource, YearlyComposites, year_range};

pub mod export;
pub use export::{CountryRegion, CountryTable, ExportReport, ExportRequest, ExportSettings, Exporter, output_filename, output_path};

pub mod map;
pub use map::{MapConfig, MapView};

pub use ntl_common::config::load_config;

/* #region configuration *******************************************************************************************/

/// everything we need to run the night light download
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct NightLightsConfig {
    pub ee: EeConfig,

    /// vector file (GeoJSON or, with the `gdal` feature, any OGR format) with all boundaries of interest
    pub boundary_file: String,

    /// padding (in degrees) around the union of boundary feature bounds
    #[serde(default="default_margin")]
    pub margin: f64,

    /// names of the countries to export, as used in the `country_table`
    pub countries: Vec<String>,

    #[serde(default)]
    pub country_table: CountryTable,

    pub sources: Vec<DataSource>,

    pub output_dir: String,

    #[serde(default)]
    pub export: ExportSettings,

    /// query number of source images per year before exporting
    #[serde(default)]
    pub check_coverage: bool,

    #[serde(default)]
    pub map: Option<MapConfig>,
}

fn default_margin()->f64 { aoi::DEFAULT_MARGIN }

impl NightLightsConfig {
    pub fn boundary_path (&self)->PathBuf {
        PathBuf::from( env_expand( &self.boundary_file))
    }

    /// the directory files of `source` are stored in
    pub fn source_output_dir (&self, source: &DataSource)->PathBuf {
        let dir = PathBuf::from( env_expand( &self.output_dir));
        match &source.output_subdir {
            Some(subdir) => dir.join( subdir),
            None => dir
        }
    }
}

/* #endregion configuration */

/// the result of a complete run
#[derive(Debug)]
pub struct NightLightsRun {
    pub aoi: AreaOfInterest,
    pub composites: Vec<YearlyComposites>,
    pub report: ExportReport,
}

/// compute the area of interest and the yearly composites of all configured sources. This does not talk to the server
pub fn prepare_composites (config: &NightLightsConfig)->Result<(AreaOfInterest, Vec<YearlyComposites>)> {
    let aoi = AreaOfInterest::from_file( config.boundary_path(), config.margin)?;
    info!("area of interest: {:?}", aoi.bounds);

    let mut all = Vec::with_capacity( config.sources.len());
    for source in &config.sources {
        all.push( YearlyComposites::build( source, &aoi)?);
    }

    Ok( (aoi, all) )
}

/// the whole pipeline: area of interest, yearly composites, country lookup and sequential export of
/// all (source, country, year) combinations. The first error terminates the run
pub async fn run_nightlights (config: &NightLightsConfig, session: &EeSession)->Result<NightLightsRun> {
    let (aoi, composites) = prepare_composites( config)?;

    if config.check_coverage {
        for yc in &composites {
            let counts = yc.check_coverage( session).await?;
            info!("{} images per year: {:?}", yc.source.name, counts);
        }
    }

    let mut countries = Vec::with_capacity( config.countries.len());
    for name in &config.countries {
        let region = CountryRegion::resolve( session, &config.country_table, name).await?;
        if !aoi.bounds.contains( &region.bounds) {
            warn!("{} extends beyond the area of interest, export will be clipped", name);
        }
        countries.push( region);
    }

    let exporter = Exporter::new( session, config.export.clone());
    let mut report = ExportReport::default();
    for yc in &composites {
        let dir = config.source_output_dir( &yc.source);
        info!("exporting {} {} composites for {} countries to {:?}", yc.len(), yc.source.name, countries.len(), dir);
        report.append( exporter.export_all( &countries, yc, &dir).await?);
    }

    if let Some(map_config) = &config.map {
        let map = create_map( session, &aoi, &composites, map_config).await?;
        let path = env_expand( &map_config.output_file);
        map.save( &path)?;
        info!("saved map to {}", path);
    }

    Ok( NightLightsRun { aoi, composites, report } )
}

/// QA map with the area of interest outline and one tile layer per composite. Only the last year of each source is visible initially
pub async fn create_map (session: &EeSession, aoi: &AreaOfInterest, composites: &[YearlyComposites], config: &MapConfig)->Result<MapView> {
    let mut map = MapView::new( "night lights");

    for yc in composites {
        let n = yc.len();
        for (i,c) in yc.iter().enumerate() {
            let tile_url = session.get_map_tiles( &c.expression(), &yc.source.vis).await?;
            map.add_layer( format!("{} {}", yc.source.name, c.year), tile_url, i+1 == n);
        }
    }

    map.add_outline( "area of interest", aoi.bounds);
    map.center_object( &aoi.bounds, config.zoom);
    Ok(map)
}
