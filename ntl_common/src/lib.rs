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

use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};

pub mod macros;
pub mod fs;
pub mod net;
pub mod config;

/// a generic bounding box without semantics for the coordinate type
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd + ToPrimitive> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn from_wsen<N> (wsen: &[N;4]) -> BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    pub fn to_wsen_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }

    pub fn center (&self) -> (f64,f64) {
        let w = self.west.to_f64().unwrap_or(f64::NAN);
        let s = self.south.to_f64().unwrap_or(f64::NAN);
        let e = self.east.to_f64().unwrap_or(f64::NAN);
        let n = self.north.to_f64().unwrap_or(f64::NAN);
        ( (w + e) / 2.0, (s + n) / 2.0 )
    }

    #[inline] pub fn width (&self)->T { self.east - self.west }
    #[inline] pub fn height (&self)->T { self.north - self.south }

    /// min <= max on both axes
    pub fn is_valid (&self)->bool {
        self.west <= self.east && self.south <= self.north
    }

    /// the smallest box that contains both self and other.
    /// Note this is element-wise min of (west,south) and max of (east,north), i.e. it does not
    /// handle boxes that cross the antimeridian
    pub fn union (&self, other: &BoundingBox<T>)->BoundingBox<T> {
        BoundingBox {
            west: min(self.west, other.west),
            south: min(self.south, other.south),
            east: max(self.east, other.east),
            north: max(self.north, other.north)
        }
    }

    /// fold a sequence of boxes into their union. Returns None for an empty sequence
    pub fn from_bounds<I> (bounds: I)->Option<BoundingBox<T>> where I: IntoIterator<Item=BoundingBox<T>> {
        bounds.into_iter().reduce( |acc,bb| acc.union(&bb))
    }

    /// grow the box by `margin` on all sides
    pub fn padded (&self, margin: T)->BoundingBox<T> {
        BoundingBox {
            west: self.west - margin,
            south: self.south - margin,
            east: self.east + margin,
            north: self.north + margin
        }
    }

    pub fn contains (&self, other: &BoundingBox<T>)->bool {
        self.west <= other.west && self.south <= other.south && self.east >= other.east && self.north >= other.north
    }
}

// PartialOrd versions of std::cmp::{min,max} so that we can use this for floats
#[inline] fn min<T: PartialOrd> (a: T, b: T)->T { if b < a { b } else { a } }
#[inline] fn max<T: PartialOrd> (a: T, b: T)->T { if b > a { b } else { a } }
