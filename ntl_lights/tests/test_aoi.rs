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

use std::{fs, path::Path};
use ntl_lights::{AreaOfInterest, Bounds, NtlLightsError, aoi::{feature_bounds, geometry_bounds, DEFAULT_MARGIN}};

// run with "cargo test test_xx -- --nocapture"

const FEATURES: [&str;3] = [
    r#"{ "type": "Feature", "properties": { "name": "a" }, "geometry": { "type": "Polygon", "coordinates": [[[33.9,-4.7],[41.9,-4.7],[41.9,5.0],[33.9,-4.7]]] } }"#,
    r#"{ "type": "Feature", "properties": { "name": "b" }, "geometry": { "type": "MultiPolygon", "coordinates": [[[[29.6,-1.5],[35.0,-1.5],[35.0,4.2],[29.6,-1.5]]]] } }"#,
    r#"{ "type": "Feature", "properties": { "name": "c" }, "geometry": { "type": "Point", "coordinates": [39.3, -6.8] } }"#,
];

fn write_collection (dir: &Path, name: &str, features: &[&str])->std::path::PathBuf {
    let path = dir.join(name);
    let json = format!(r#"{{ "type": "FeatureCollection", "features": [ {} ] }}"#, features.join(","));
    fs::write( &path, json).unwrap();
    path
}

#[test]
fn test_feature_bounds() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_collection( tmp.path(), "boundaries.geojson", &FEATURES);

    let bounds = feature_bounds( &path).unwrap();
    println!("{bounds:?}");
    assert_eq!( bounds.len(), 3);
    assert_eq!( bounds[0], Bounds::new( 33.9, -4.7, 41.9, 5.0));
    assert_eq!( bounds[2], Bounds::new( 39.3, -6.8, 39.3, -6.8));
}

#[test]
fn test_aoi_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_collection( tmp.path(), "boundaries.geojson", &FEATURES);

    let aoi = AreaOfInterest::from_file( &path, 1.0).unwrap();
    assert_eq!( aoi.feature_bounds, Bounds::new( 29.6, -6.8, 41.9, 5.0));
    assert_eq!( aoi.bounds, Bounds::new( 28.6, -7.8, 42.9, 6.0));
    assert!( aoi.bounds.is_valid());

    let v = serde_json::to_value( aoi.geometry()).unwrap();
    assert_eq!( v["functionInvocationValue"]["functionName"], "GeometryConstructors.Rectangle");
}

#[test]
fn test_aoi_order_independent() {
    let tmp = tempfile::tempdir().unwrap();
    let permutations = [[0,1,2], [0,2,1], [1,0,2], [1,2,0], [2,0,1], [2,1,0]];

    let expected = AreaOfInterest::from_file( write_collection( tmp.path(), "p.geojson", &FEATURES), DEFAULT_MARGIN).unwrap();
    for (i,p) in permutations.iter().enumerate() {
        let features: Vec<&str> = p.iter().map( |j| FEATURES[*j]).collect();
        let path = write_collection( tmp.path(), &format!("p{i}.geojson"), &features);
        assert_eq!( AreaOfInterest::from_file( &path, DEFAULT_MARGIN).unwrap(), expected);
    }
}

#[test]
fn test_padding_invariant() {
    let bounds = vec![ Bounds::new( -1.0, -2.0, 3.0, 4.0), Bounds::new( 0.0, 0.0, 5.0, 1.0) ];
    for margin in [0.0, 0.25, 0.5, 2.0] {
        let aoi = AreaOfInterest::from_feature_bounds( bounds.clone(), margin).unwrap();
        assert_eq!( aoi.bounds.west, -1.0 - margin);
        assert_eq!( aoi.bounds.south, -2.0 - margin);
        assert_eq!( aoi.bounds.east, 5.0 + margin);
        assert_eq!( aoi.bounds.north, 4.0 + margin);
        assert!( aoi.bounds.west <= aoi.bounds.east && aoi.bounds.south <= aoi.bounds.north);
    }
}

#[test]
fn test_aoi_errors() {
    assert!( matches!( AreaOfInterest::from_feature_bounds( vec![ Bounds::new(0.0,0.0,1.0,1.0) ], -0.1), Err(NtlLightsError::InvalidMargin(_))));
    assert!( matches!( AreaOfInterest::from_feature_bounds( vec![ Bounds::new(0.0,0.0,1.0,1.0) ], f64::NAN), Err(NtlLightsError::InvalidMargin(_))));
    assert!( matches!( AreaOfInterest::from_feature_bounds( Vec::new(), 0.5), Err(NtlLightsError::NoFeatureBounds)));

    let tmp = tempfile::tempdir().unwrap();
    let path = write_collection( tmp.path(), "empty.geojson", &[]);
    match AreaOfInterest::from_file( &path, 0.5) {
        Err(e @ NtlLightsError::NoFeatures(_)) => assert!( e.to_string().contains("empty.geojson"), "{e}"),
        other => panic!("expected NoFeatures, got {other:?}")
    }

    // features without geometry are ignored
    let path = write_collection( tmp.path(), "null.geojson", &[ r#"{ "type": "Feature", "properties": {}, "geometry": null }"# ]);
    assert!( matches!( AreaOfInterest::from_file( &path, 0.5), Err(NtlLightsError::NoFeatures(_))));

    assert!( AreaOfInterest::from_file( tmp.path().join("missing.geojson"), 0.5).is_err());
}

#[cfg(not(feature="gdal"))]
#[test]
fn test_unsupported_format() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("boundaries.shp");
    fs::write( &path, b"").unwrap();
    assert!( matches!( feature_bounds( &path), Err(NtlLightsError::UnsupportedFormat(_))));
}

#[test]
fn test_geometry_bounds() {
    let geom: geojson::Geometry = serde_json::from_str( r#"{ "type": "LineString", "coordinates": [[10.0, 1.0], [12.0, -3.0], [11.0, 5.0]] }"#).unwrap();
    assert_eq!( geometry_bounds( &geom).unwrap(), Some( Bounds::new( 10.0, -3.0, 12.0, 5.0)));

    let empty: geojson::Geometry = serde_json::from_str( r#"{ "type": "GeometryCollection", "geometries": [] }"#).unwrap();
    assert_eq!( geometry_bounds( &empty).unwrap(), None);
}
