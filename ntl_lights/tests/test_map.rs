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

use ntl_lights::{Bounds, MapView, map::zoom_for_extent};

#[test]
fn test_zoom_for_extent() {
    assert_eq!( zoom_for_extent( 360.0), 1);
    assert_eq!( zoom_for_extent( 10.0), 5);
    assert_eq!( zoom_for_extent( 0.0001), 18);
    assert_eq!( zoom_for_extent( 0.0), 10);
}

#[test]
fn test_render_html() {
    let bounds = Bounds::new( 30.0, -10.0, 40.0, 0.0);
    let mut map = MapView::new( "test <map>");
    map.add_layer( "viirs 2015", "https://example.com/v1/projects/p/maps/m1/tiles/{z}/{x}/{y}", true);
    map.add_layer( "viirs 2016", "https://example.com/v1/projects/p/maps/m2/tiles/{z}/{x}/{y}", false);
    map.add_outline( "area of interest", bounds);
    map.center_object( &bounds, None);

    assert_eq!( map.center, (35.0, -5.0));
    assert_eq!( map.zoom, 5);

    let html = map.render_html();
    println!("{html}");
    assert!( html.contains("<title>test &lt;map&gt;</title>"));
    assert!( html.contains(r#"addOverlay("viirs 2015", L.tileLayer("https://example.com/v1/projects/p/maps/m1/tiles/{z}/{x}/{y}", {opacity: 1}), true);"#));
    assert!( html.contains(r#"addOverlay("viirs 2016""#));
    assert!( html.contains("L.rectangle([[-10,30],[0,40]]"));
    assert!( html.contains("setView([-5, 35], 5)"));

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("map.html");
    map.save( &path).unwrap();
    assert_eq!( std::fs::read_to_string( &path).unwrap(), html);
}
