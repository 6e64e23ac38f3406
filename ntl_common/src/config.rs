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

//! RON based config file lookup and loading

use std::{env, path::{Path,PathBuf}};
use lazy_static::lazy_static;
use regex::{Regex,Captures};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{define_error, fs::filepath_contents};

pub const CONFIG_DIR_ENV: &str = "NTL_CONFIG_DIR";
pub const CONFIGS: &str = "configs";

define_error!{ pub NtlConfigError =
    IOError(#[from] std::io::Error) : "config IO error: {0}",
    ParseError(#[from] ron::error::SpannedError) : "config parse error: {0}",
    NotFoundError(String) : "config not found: {0}"
}

pub type Result<T> = std::result::Result<T, NtlConfigError>;

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new( r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// find a config file for the given name. Existing paths are used as given, otherwise we look
/// in $NTL_CONFIG_DIR and then in ./configs
pub fn find_config_file (name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    if path.is_file() { return Some(path.to_path_buf()) }
    if path.is_absolute() { return None }

    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let p = Path::new(&dir).join(name);
        if p.is_file() { return Some(p) }
    }

    let p = Path::new(CONFIGS).join(name);
    if p.is_file() { Some(p) } else { None }
}

pub fn load_config<C> (name: &str) -> Result<C> where C: DeserializeOwned {
    let path = find_config_file(name).ok_or_else(|| NtlConfigError::NotFoundError(name.to_string()))?;
    debug!("loading config {path:?}");
    let data = filepath_contents(&path)?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// expand "${VAR}" references with respective environment variable values. Undefined variables expand into empty strings
pub fn env_expand (s: &str) -> String {
    ENV_VAR_RE.replace_all( s, |caps: &Captures| env::var(&caps[1]).unwrap_or_default()).to_string()
}
