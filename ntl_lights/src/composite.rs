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

//! per-year night light composites

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize,Serialize};
use tracing::{debug, info, warn};

use ntl_ee::{EeSession, Expression, VisParams, expr::{self, ValueNode}};
use crate::aoi::AreaOfInterest;
use crate::errors::{op_failed, NtlLightsError, Result};

/// a catalog image collection we compute yearly composites from
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DataSource {
    /// short name, e.g. "viirs"
    pub name: String,
    /// catalog id of the image collection
    pub collection: String,
    /// the band we average and export
    pub band: String,
    /// first year (inclusive)
    pub start_year: i32,
    /// last year (exclusive)
    pub end_year: i32,
    /// optional sub-directory of the output dir for files of this source
    #[serde(default)]
    pub output_subdir: Option<String>,
    pub vis: VisParams,
}

impl DataSource {
    /// VIIRS Day/Night Band monthly composites (stray light corrected), available since 2014
    pub fn viirs_monthly (start_year: i32, end_year: i32)->Self {
        DataSource {
            name: "viirs".to_string(),
            collection: "NOAA/VIIRS/DNB/MONTHLY_V1/VCMSLCFG".to_string(),
            band: "avg_rad".to_string(),
            start_year, end_year,
            output_subdir: Some("viirs".to_string()),
            vis: VisParams { min: 0.0, max: 60.0, palette: Vec::new() }
        }
    }

    /// DMSP-OLS yearly stable lights, available 1992-2013
    pub fn dmsp_ols (start_year: i32, end_year: i32)->Self {
        DataSource {
            name: "dmsp".to_string(),
            collection: "NOAA/DMSP-OLS/NIGHTTIME_LIGHTS".to_string(),
            band: "stable_lights".to_string(),
            start_year, end_year,
            output_subdir: Some("dmsp".to_string()),
            vis: VisParams { min: 0.0, max: 63.0, palette: Vec::new() }
        }
    }

    pub fn years (&self)->impl Iterator<Item=i32> {
        year_range( self.start_year, self.end_year)
    }
}

/// every integer year in [start,end), in ascending order. Empty if start >= end
pub fn year_range (start: i32, end: i32)->impl Iterator<Item=i32> {
    start..end
}

/// opaque handle for a server-side averaged, band-selected and clipped image of one year
#[derive(Debug,Clone)]
pub struct Composite {
    pub year: i32,
    pub band: String,
    /// the date and bounds filtered source collection (before averaging)
    pub collection: ValueNode,
    pub image: ValueNode,
}

impl Composite {
    /// build the composite for `year`: filter by AOI and [Jan 1 year, Jan 1 year+1), average, select band and clip to AOI
    pub fn new (source: &DataSource, aoi_geometry: &ValueNode, year: i32)->Result<Composite> {
        let start = NaiveDate::from_ymd_opt( year, 1, 1).ok_or_else(|| op_failed( format!("invalid year {year}")))?;
        let end = NaiveDate::from_ymd_opt( year+1, 1, 1).ok_or_else(|| op_failed( format!("invalid year {}", year+1)))?;

        let collection = expr::filter_date(
            expr::filter_bounds( expr::image_collection_load( &source.collection), aoi_geometry.clone()),
            start, end
        );
        let image = expr::clip(
            expr::select_band( expr::reduce_mean( collection.clone()), &source.band),
            aoi_geometry.clone()
        );

        Ok( Composite { year, band: source.band.clone(), collection, image } )
    }

    pub fn expression (&self)->Expression {
        Expression::new( self.image.clone())
    }

    /// the composite further clipped to `region`
    pub fn clipped_to (&self, region: ValueNode)->Expression {
        Expression::new( expr::clip( self.image.clone(), region))
    }

    /// server side number of source images that went into this composite
    pub async fn image_count (&self, session: &EeSession)->Result<u64> {
        let size = expr::invoke( "Collection.size", [("collection", self.collection.clone())]);
        let v = session.compute_value( &Expression::new(size)).await?;
        v.as_u64().ok_or_else(|| op_failed( format!("unexpected collection size {v}")))
    }
}

/// year -> composite map for one data source. Populated once, read-only afterwards
#[derive(Debug,Clone)]
pub struct YearlyComposites {
    pub source: DataSource,
    composites: BTreeMap<i32,Composite>,
}

impl YearlyComposites {
    pub fn build (source: &DataSource, aoi: &AreaOfInterest)->Result<YearlyComposites> {
        if source.start_year >= source.end_year {
            return Err( NtlLightsError::InvalidYearRange( source.start_year, source.end_year))
        }

        let aoi_geometry = aoi.geometry();
        let mut composites = BTreeMap::new();
        for year in source.years() {
            debug!("creating {} composite for {}", source.name, year);
            composites.insert( year, Composite::new( source, &aoi_geometry, year)?);
        }
        info!("created {} yearly {} composites for [{},{})", composites.len(), source.name, source.start_year, source.end_year);

        Ok( YearlyComposites { source: source.clone(), composites } )
    }

    pub fn get (&self, year: i32)->Option<&Composite> { self.composites.get(&year) }

    /// composites in ascending year order
    pub fn iter (&self)->impl Iterator<Item=&Composite> { self.composites.values() }

    pub fn years (&self)->Vec<i32> { self.composites.keys().copied().collect() }

    pub fn len (&self)->usize { self.composites.len() }

    pub fn is_empty (&self)->bool { self.composites.is_empty() }

    /// query the number of source images for each year. Years without images produce all-masked exports
    pub async fn check_coverage (&self, session: &EeSession)->Result<BTreeMap<i32,u64>> {
        let mut counts = BTreeMap::new();
        for c in self.iter() {
            let n = c.image_count( session).await?;
            if n == 0 {
                warn!("no {} images for {}", self.source.name, c.year);
            }
            counts.insert( c.year, n);
        }
        Ok(counts)
    }
}
