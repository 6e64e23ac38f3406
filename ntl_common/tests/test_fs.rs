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

use std::{env, fs};
use ntl_common::fs::{ensure_writable_dir, existing_non_empty_file, set_filepath_contents, set_accessed};
use ntl_common::config::{env_expand, load_config};
use serde::Deserialize;

#[test]
fn test_ensure_nested_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("viirs").join("2015");
    assert!( !dir.exists());

    ensure_writable_dir(&dir).unwrap();
    assert!( dir.is_dir());

    // second call is a no-op
    ensure_writable_dir(&dir).unwrap();
}

#[test]
fn test_readonly_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("viirs");
    fs::create_dir(&dir).unwrap();

    let mut perms = fs::metadata(&dir).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions( &dir, perms.clone()).unwrap();

    let res = ensure_writable_dir(&dir);

    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions( &dir, perms).unwrap();

    assert_eq!( res.unwrap_err().kind(), std::io::ErrorKind::PermissionDenied);
}

#[test]
fn test_file_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("Kenya_2015.npy");

    assert!( existing_non_empty_file(&path).is_err());

    set_filepath_contents( &path, b"\x93NUMPY").unwrap();
    assert_eq!( fs::metadata(&path).unwrap().len(), 6);
    assert!( existing_non_empty_file(&path).is_ok());
    set_accessed(&path).unwrap();

    set_filepath_contents( &path, b"").unwrap();
    assert!( existing_non_empty_file(&path).is_err());
}

#[derive(Deserialize,Debug)]
struct TestConfig {
    name: String,
    years: Vec<i32>,
}

#[test]
fn test_load_config() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("test.ron");
    fs::write( &path, r#"TestConfig( name: "viirs", years: [2014, 2015] )"#).unwrap();

    let config: TestConfig = load_config( path.to_str().unwrap()).unwrap();
    assert_eq!( config.name, "viirs");
    assert_eq!( config.years, vec![2014, 2015]);

    assert!( load_config::<TestConfig>( "no_such_config.ron").is_err());
}

#[test]
fn test_env_expand() {
    unsafe { env::set_var( "NTL_TEST_PROJECT", "ee-demo"); }
    assert_eq!( env_expand( "projects/${NTL_TEST_PROJECT}/thumbnails"), "projects/ee-demo/thumbnails");
    assert_eq!( env_expand( "no vars"), "no vars");
    assert_eq!( env_expand( "${NTL_TEST_UNDEFINED_VAR}x"), "x");
}
