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

use std::{env, path::Path};
use reqwest::Client;
use serde::{Deserialize,Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use ntl_common::{config::env_expand, net::{self, download_url, get_headermap}};
use crate::errors::{config_error, invalid_request, response_error, Result};
use crate::expr::Expression;
use crate::grid::{FileFormat, PixelGrid};

pub const DEFAULT_BASE_URL: &str = "https://earthengine.googleapis.com";
pub const DEFAULT_TOKEN_ENV: &str = "EE_ACCESS_TOKEN";
pub const API_VERSION: &str = "v1";

/// Earth Engine REST access configuration
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct EeConfig {
    #[serde(default="default_base_url")]
    pub base_url: String,

    /// the cloud project requests are billed to
    pub project: String,

    /// OAuth2 bearer token. Can contain "${VAR}" references. If not set we use the `token_env` environment variable
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default="default_token_env")]
    pub token_env: String,

    /// additional "name: value" headers sent with each request
    #[serde(default)]
    pub headers: Vec<String>,
}

fn default_base_url()->String { DEFAULT_BASE_URL.to_string() }
fn default_token_env()->String { DEFAULT_TOKEN_ENV.to_string() }

impl EeConfig {
    pub fn new (project: impl ToString)->Self {
        EeConfig {
            base_url: default_base_url(),
            project: project.to_string(),
            access_token: None,
            token_env: default_token_env(),
            headers: Vec::new()
        }
    }

    /// resolve the bearer token from config or environment
    pub fn resolve_token (&self)->Result<String> {
        let token = match &self.access_token {
            Some(t) => env_expand(t),
            None => env::var(&self.token_env).unwrap_or_default()
        };
        let token = token.trim().to_string();

        if token.is_empty() {
            Err( config_error( format!("no access token (set 'access_token' or environment variable {})", self.token_env)))
        } else {
            Ok(token)
        }
    }
}

/// visualization parameters for map tile layers
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct VisParams {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub palette: Vec<String>,
}

impl VisParams {
    fn to_visualization_options (&self)->Value {
        let mut opts = json!({ "ranges": [ { "min": self.min, "max": self.max } ] });
        if !self.palette.is_empty() {
            opts["paletteColors"] = json!( self.palette);
        }
        opts
    }
}

/// parameters to request a raw pixel array of a single band image
#[derive(Debug,Clone)]
pub struct PixelRequest {
    pub expression: Expression,
    pub band: String,
    pub grid: PixelGrid,
    pub format: FileFormat,
}

#[derive(Deserialize,Debug)]
struct NamedResource {
    name: String
}

/// an initialized connection to the Earth Engine REST API. All calls are blocking in the sense that
/// we await each response before issuing the next request
pub struct EeSession {
    config: EeConfig,
    client: Client,
    token: String,
}

impl EeSession {
    /// initialize session - this does not yet talk to the server but fails if we don't have credentials
    pub fn new (config: EeConfig)->Result<Self> {
        let token = config.resolve_token()?;
        let headers = get_headermap( &config.headers)?;
        let client = Client::builder().default_headers( headers).build()?;

        info!("initialized Earth Engine session for project {} at {}", config.project, config.base_url);
        Ok( EeSession { config, client, token } )
    }

    pub fn config (&self)->&EeConfig { &self.config }

    fn project_url (&self, method: &str)->String {
        format!("{}/{}/projects/{}/{}", self.config.base_url.trim_end_matches('/'), API_VERSION, self.config.project, method)
    }

    fn resource_url (&self, name: &str)->String {
        format!("{}/{}/{}", self.config.base_url.trim_end_matches('/'), API_VERSION, name)
    }

    /// compute the value of an expression on the server and return the JSON result
    pub async fn compute_value (&self, expr: &Expression)->Result<Value> {
        let url = self.project_url("value:compute");
        let mut response: Value = net::post_json( &self.client, &url, Some(&self.token), &json!({ "expression": expr })).await?;

        response.get_mut("result").map( Value::take).ok_or_else( || response_error("no 'result' in value:compute response"))
    }

    /// create a pixel download (thumbnail) resource and return the URL to fetch its bytes from
    pub async fn get_download_url (&self, req: &PixelRequest)->Result<String> {
        if req.band.is_empty() {
            return Err( invalid_request("no band specified"))
        }

        let body = json!({
            "expression": req.expression,
            "fileFormat": req.format.as_str(),
            "bandIds": [ req.band ],
            "grid": req.grid
        });

        let url = self.project_url("thumbnails");
        let res: NamedResource = net::post_json( &self.client, &url, Some(&self.token), &body).await?;
        debug!("created download resource {}", res.name);

        Ok( format!("{}:getPixels", self.resource_url( &res.name)))
    }

    /// fetch `url` and store the response body verbatim in `path`. Returns number of bytes written
    pub async fn download (&self, url: &str, path: impl AsRef<Path>)->Result<u64> {
        Ok( download_url( &self.client, url, &None, path).await? )
    }

    /// create a map resource for the given image expression and return its XYZ tile URL template
    pub async fn get_map_tiles (&self, expr: &Expression, vis: &VisParams)->Result<String> {
        let body = json!({
            "expression": expr,
            "fileFormat": "AUTO_JPEG_PNG",
            "visualizationOptions": vis.to_visualization_options()
        });

        let url = self.project_url("maps");
        let res: NamedResource = net::post_json( &self.client, &url, Some(&self.token), &body).await?;

        Ok( format!("{}/tiles/{{z}}/{{x}}/{{y}}", self.resource_url( &res.name)))
    }
}
