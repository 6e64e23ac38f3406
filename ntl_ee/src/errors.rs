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

use thiserror::Error;
use ntl_common::net::NtlNetError;

pub type Result<T> = std::result::Result<T, NtlEeError>;

#[derive(Error,Debug)]
pub enum NtlEeError {
    #[error("Earth Engine config error: {0}")]
    ConfigError(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unexpected Earth Engine response: {0}")]
    ResponseError(String),

    // pass through for network errors (this includes HTTP status errors reported by the server)
    #[error("Earth Engine network error: {0}")]
    NetError( #[from] NtlNetError),

    #[error("http client error: {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError( #[from] serde_json::Error),
}

pub fn config_error (msg: impl ToString)->NtlEeError {
    NtlEeError::ConfigError(msg.to_string())
}

pub fn invalid_request (msg: impl ToString)->NtlEeError {
    NtlEeError::InvalidRequest(msg.to_string())
}

pub fn response_error (msg: impl ToString)->NtlEeError {
    NtlEeError::ResponseError(msg.to_string())
}
