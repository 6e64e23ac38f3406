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

//! download yearly night light composites for a list of countries as raw pixel arrays

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ntl_common::{define_cli, check_cli};
use ntl_ee::EeSession;
use ntl_lights::{load_config, prepare_composites, run_nightlights, MapConfig, NightLightsConfig};

define_cli! { ARGS [about="get_nightlights - download yearly night light composites per country"] =
    dry_run: bool [help="only compute area of interest and composites, do not contact the server", long],
    skip_existing: bool [help="do not download files that already exist", long],
    map: Option<String> [help="pathname of QA map HTML file to create", long],
    config: String [help="filename of NightLightsConfig", default_value="nightlights.ron"]
}

#[tokio::main]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))  // use RUST_LOG to set max level
        .init();

    let mut config: NightLightsConfig = load_config( &ARGS.config)?;
    if ARGS.skip_existing { config.export.skip_existing = true }
    if let Some(output_file) = &ARGS.map {
        config.map = Some( MapConfig { output_file: output_file.clone(), zoom: None });
    }

    if ARGS.dry_run {
        let (aoi, composites) = prepare_composites( &config)?;
        println!("area of interest: {}", serde_json::to_string_pretty( &aoi)?);
        for yc in &composites {
            println!("{}: years {:?}", yc.source.name, yc.years());
            for c in yc.iter() {
                println!("  {}: {}", c.year, serde_json::to_string( &c.expression())?);
            }
        }
        return Ok(())
    }

    let session = EeSession::new( config.ee.clone())?;
    let run = run_nightlights( &config, &session).await?;

    for (path,len) in &run.report.written {
        println!("{} ({} bytes)", path.display(), len);
    }
    info!("done: {} files written ({} bytes), {} skipped", run.report.written.len(), run.report.total_bytes(), run.report.skipped.len());

    Ok(())
}
