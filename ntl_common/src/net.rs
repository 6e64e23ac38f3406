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

///! common utility functions for network operations

use std::{fs::{self,File}, io::Write, path::{Path,PathBuf}};
use reqwest::{header::{HeaderMap,HeaderName,HeaderValue,CONTENT_TYPE}, Client, StatusCode, Response};
use serde::{de::DeserializeOwned,Serialize};
use tracing::{debug,warn};

use crate::define_error;

define_error!{ pub NtlNetError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, NtlNetError>;

pub fn get_headermap (headers: &[String]) -> Result<HeaderMap> {
    let mut hm = HeaderMap::new();
    for h in headers {
        if let Some(idx) = h.find(':') {
            let k = h[0..idx].trim();
            let v = h[idx+1..].trim();
            hm.append(
                HeaderName::from_bytes( k.as_bytes()).map_err(|e| NtlNetError::OpFailed(e.to_string()))?,
                HeaderValue::from_str(v).map_err(|e| NtlNetError::OpFailed(e.to_string()))?
            );
        }
    }
    Ok(hm)
}

/// map non-OK responses into errors, including the response text (which usually carries the server error message)
async fn check_status (url: &str, response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err( NtlNetError::NotFoundError(url.to_string())),
        other => {
            let msg = response.text().await.unwrap_or_default();
            Err( NtlNetError::OpFailed(format!("response status {other:?} for {url}: {}", msg.trim())))
        }
    }
}

/// POST `data` as JSON and deserialize the JSON response into U
pub async fn post_json<T,U> (client: &Client, url: &str, bearer_token: Option<&str>, data: &T) -> Result<U>
    where T: Serialize, U: DeserializeOwned
{
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut req = client.post( url).headers( headers).json( data);
    if let Some(token) = bearer_token {
        req = req.bearer_auth(token);
    }

    debug!("POST {url}");
    let response = check_status( url, req.send().await?).await?;
    from_json( response).await
}

/// fetch URL content with HTTP GET and store it verbatim in file `path`. Retrieve in chunks to support large files.
/// Data is streamed into a `<path>.part` file that is only renamed to `path` once the body is complete. The
/// partial file is removed if the transfer fails, i.e. `path` is either complete or does not exist.
/// Note no file is created if we do not get a OK response
pub async fn download_url (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let mut req = client.get(url);
    if let Some(headermap) = &opt_headers {
        req = req.headers(headermap.clone())
    }

    debug!("GET {url}");
    let response = check_status( url, req.send().await?).await?;

    let part_path = partial_path( path);
    match write_chunks( response, &part_path).await {
        Ok(len) => {
            fs::rename( &part_path, path)?;
            Ok(len)
        }
        Err(e) => {
            if part_path.is_file() {
                if let Err(rm_err) = fs::remove_file( &part_path) {
                    warn!("failed to remove partial download {part_path:?}: {rm_err}");
                }
            }
            Err(e)
        }
    }
}

/// the file we stream into before it is complete
pub fn partial_path (path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".part");
    PathBuf::from(s)
}

async fn write_chunks (mut response: Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path)?;
    let mut len: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        len += chunk.len() as u64;
        file.write_all(&chunk)?;
    }
    file.flush()?;
    Ok(len)
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| NtlNetError::ParseError(e.to_string()))
}
