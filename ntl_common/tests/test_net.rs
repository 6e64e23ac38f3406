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

use axum::{Router, Json, routing::{get,post}, http::StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use ntl_common::fs::existing_non_empty_file;
use ntl_common::net::{download_url, partial_path, post_json, NtlNetError};

async fn spawn_mock_server ()->String {
    let router = Router::new()
        .route( "/data.npy", get( || async { vec![0x93u8, b'N', b'U', b'M', b'P', b'Y', 1, 0] }))
        .route( "/fail", get( || async { (StatusCode::BAD_REQUEST, "bad band") }))
        .route( "/echo", post( |Json(v): Json<Value>| async move { Json( json!({ "result": v })) }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move { axum::serve( listener, router).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_download() {
    let base = spawn_mock_server().await;
    let client = reqwest::Client::new();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data.npy");

    let len = download_url( &client, &format!("{base}/data.npy"), &None, &path).await.unwrap();
    assert_eq!( len, 8);
    assert_eq!( std::fs::read(&path).unwrap()[0], 0x93);
}

#[tokio::test]
async fn test_download_errors() {
    let base = spawn_mock_server().await;
    let client = reqwest::Client::new();
    let tmp = tempfile::tempdir().unwrap();

    let path = tmp.path().join("missing.npy");
    match download_url( &client, &format!("{base}/missing"), &None, &path).await {
        Err(NtlNetError::NotFoundError(_)) => {}
        other => panic!("expected NotFoundError, got {other:?}")
    }
    assert!( !path.exists()); // no file for failed requests

    match download_url( &client, &format!("{base}/fail"), &None, &path).await {
        Err(NtlNetError::OpFailed(msg)) => assert!( msg.contains("bad band")),
        other => panic!("expected OpFailed, got {other:?}")
    }

    // missing output dir is reported, not silently created
    let path = tmp.path().join("no_such_dir").join("data.npy");
    assert!( matches!( download_url( &client, &format!("{base}/data.npy"), &None, &path).await, Err(NtlNetError::IOError(_))));
}

/// a server that announces more content than it sends before closing the connection
async fn spawn_truncating_server ()->String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read( &mut buf).await;
        socket.write_all( b"HTTP/1.1 200 OK\r\ncontent-type: application/octet-stream\r\ncontent-length: 1000\r\n\r\n0123456789").await.unwrap();
        socket.flush().await.unwrap();
        // dropping the socket closes the connection mid-body
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_truncated_download() {
    let base = spawn_truncating_server().await;
    let client = reqwest::Client::new();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("Kenya_2015.npy");

    let res = download_url( &client, &format!("{base}/data.npy"), &None, &path).await;
    assert!( res.is_err(), "truncated body accepted: {res:?}");

    // neither the target nor the partial file are left behind, so a resumed run re-downloads
    assert!( !path.exists());
    assert!( !partial_path( &path).exists());
    assert!( existing_non_empty_file( &path).is_err());
}

#[tokio::test]
async fn test_download_replaces_partial() {
    let base = spawn_mock_server().await;
    let client = reqwest::Client::new();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data.npy");
    std::fs::write( partial_path( &path), b"stale").unwrap();

    download_url( &client, &format!("{base}/data.npy"), &None, &path).await.unwrap();
    assert_eq!( std::fs::read( &path).unwrap().len(), 8);
    assert!( !partial_path( &path).exists());
}

#[tokio::test]
async fn test_post_json() {
    let base = spawn_mock_server().await;
    let client = reqwest::Client::new();

    let res: Value = post_json( &client, &format!("{base}/echo"), Some("token"), &json!({ "year": 2015 })).await.unwrap();
    assert_eq!( res["result"]["year"], 2015);
}
