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

//! compute (and optionally map) the area of interest of a vector boundary file

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ntl_common::{define_cli, check_cli};
use ntl_lights::{AreaOfInterest, MapView};

define_cli! { ARGS [about="show_aoi - compute the area of interest of a vector boundary file"] =
    margin: f64 [help="padding around feature bounds in degrees", short, long, default_value="0.5"],
    map: Option<String> [help="pathname of HTML map file to create", long],
    boundary_file: String [help="GeoJSON (or any OGR format with the gdal feature) boundary file"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let aoi = AreaOfInterest::from_file( &ARGS.boundary_file, ARGS.margin)?;
    let bb = &aoi.bounds;
    println!("feature bounds: {:?}", aoi.feature_bounds.to_wsen_array());
    println!("area of interest (margin {}): west={} south={} east={} north={}", aoi.margin, bb.west, bb.south, bb.east, bb.north);

    if let Some(path) = &ARGS.map {
        let mut map = MapView::new( format!("area of interest of {}", ARGS.boundary_file));
        map.add_outline( "feature bounds", aoi.feature_bounds);
        map.add_outline( "area of interest", aoi.bounds);
        map.center_object( &aoi.bounds, None);
        map.save( path)?;
        println!("map saved to {path}");
    }

    Ok(())
}
