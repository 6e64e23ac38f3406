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

use std::{fs::{self,File,FileTimes}, io::{self,Read,Write}, path::Path, time::SystemTime};
use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

/// check if dir pathname exists and is writable, try to create dir (including missing parent dirs) otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "directory {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

pub fn set_accessed_timestamp <P: AsRef<Path>> (path: P, t: SystemTime) -> Result<()> {
    let f = File::open(path)?;
    let ftimes = FileTimes::new().set_accessed(t);
    f.set_times( ftimes)
}

pub fn set_accessed<P: AsRef<Path>> (path: &P)->Result<()> {
    set_accessed_timestamp(path, SystemTime::now())
}

pub fn existing_non_empty_file <P: AsRef<Path>> (path: P)-> Result<File> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let md = file.metadata()?;
    if md.len() > 0 {
        Ok(file)
    } else { Err(io_error!(Other, "file empty: {:?}", path)) }
}

/// write `contents` verbatim to `path`, replacing an already existing file
pub fn set_filepath_contents <P: AsRef<Path>> (path: P, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()
}
