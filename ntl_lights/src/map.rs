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

//! a minimal Leaflet page to visually check composites and areas of interest.
//! This has no influence on exported data

use std::{fmt::Write as _, path::Path};
use serde::{Deserialize,Serialize};
use serde_json::json;

use ntl_common::fs::set_filepath_contents;
use crate::aoi::Bounds;
use crate::errors::Result;

const LEAFLET_VERSION: &str = "1.9.4";
const BASE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct MapConfig {
    /// pathname of the HTML file to create
    pub output_file: String,
    /// initial zoom level. Computed from the area of interest if not set
    #[serde(default)]
    pub zoom: Option<u8>,
}

#[derive(Debug,Clone,PartialEq)]
pub struct MapLayer {
    pub name: String,
    /// XYZ tile URL template
    pub tile_url: String,
    pub shown: bool,
    pub opacity: f64,
}

#[derive(Debug,Clone)]
pub struct MapView {
    pub title: String,
    /// (lon,lat) in degrees
    pub center: (f64,f64),
    pub zoom: u8,
    pub layers: Vec<MapLayer>,
    pub outlines: Vec<(String,Bounds)>,
}

impl MapView {
    pub fn new (title: impl ToString)->Self {
        MapView { title: title.to_string(), center: (0.0,0.0), zoom: 2, layers: Vec::new(), outlines: Vec::new() }
    }

    pub fn add_layer (&mut self, name: impl ToString, tile_url: impl ToString, shown: bool) {
        self.layers.push( MapLayer { name: name.to_string(), tile_url: tile_url.to_string(), shown, opacity: 1.0 });
    }

    /// add a rectangle outline (e.g. for the area of interest)
    pub fn add_outline (&mut self, name: impl ToString, bounds: Bounds) {
        self.outlines.push( (name.to_string(), bounds));
    }

    /// center map on `bounds`, using a zoom level that shows the whole box if none is given
    pub fn center_object (&mut self, bounds: &Bounds, zoom: Option<u8>) {
        self.center = bounds.center();
        self.zoom = zoom.unwrap_or_else(|| zoom_for_extent( bounds.width().max( bounds.height())));
    }

    pub fn render_html (&self)->String {
        let mut layers_js = String::new();
        for l in &self.layers {
            let _ = writeln!( layers_js,
                "  addOverlay({}, L.tileLayer({}, {{opacity: {}}}), {});",
                json!(l.name), json!(l.tile_url), l.opacity, l.shown);
        }
        for (name,bb) in &self.outlines {
            let _ = writeln!( layers_js,
                "  addOverlay({}, L.rectangle([[{},{}],[{},{}]], {{color: 'red', weight: 1, fill: false}}), true);",
                json!(name), bb.south, bb.west, bb.north, bb.east);
        }

        format!(r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{v}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{v}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
  const map = L.map('map').setView([{lat}, {lon}], {zoom});
  L.tileLayer('{base}', {{maxZoom: 19, attribution: '&copy; OpenStreetMap contributors'}}).addTo(map);
  const overlays = {{}};
  function addOverlay(name, layer, shown) {{
    overlays[name] = layer;
    if (shown) layer.addTo(map);
  }}
{layers}  L.control.layers(null, overlays).addTo(map);
</script>
</body>
</html>
"#,
            title = html_escape( &self.title), v = LEAFLET_VERSION,
            lat = self.center.1, lon = self.center.0, zoom = self.zoom,
            base = BASE_LAYER_URL, layers = layers_js)
    }

    pub fn save (&self, path: impl AsRef<Path>)->Result<()> {
        Ok( set_filepath_contents( path, self.render_html().as_bytes())? )
    }
}

/// web mercator zoom level at which `extent` degrees roughly fill a 512px wide map
pub fn zoom_for_extent (extent: f64)->u8 {
    if !(extent.is_finite() && extent > 0.0) { return 10 }
    (360.0 / extent).log2().floor().clamp( 1.0, 18.0) as u8
}

fn html_escape (s: &str)->String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
