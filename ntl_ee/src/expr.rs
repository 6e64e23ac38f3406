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

//! builder for Earth Engine computation graphs in their REST wire format.
//! Expressions are lazy - nothing gets computed before an expression is sent to one of the
//! `value:compute`, `thumbnails` or `maps` endpoints

use std::collections::BTreeMap;
use chrono::NaiveDate;
use serde::{Deserialize,Serialize};
use serde_json::{json, Value};
use ntl_common::BoundingBox;

/// a node in the computation graph. This serializes into the one-field objects the service expects,
/// e.g. `{"constantValue": 42}` or `{"functionInvocationValue": {"functionName": .., "arguments": {..}}}`
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub enum ValueNode {
    ConstantValue(Value),
    ArrayValue(ArrayValue),
    DictionaryValue(DictionaryValue),
    FunctionInvocationValue(FunctionInvocation),
    ValueReference(String),
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct ArrayValue {
    pub values: Vec<ValueNode>
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DictionaryValue {
    pub values: BTreeMap<String,ValueNode>
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct FunctionInvocation {
    pub function_name: String,
    pub arguments: BTreeMap<String,ValueNode>
}

impl ValueNode {
    /// the name of the invoked server function, if this is a function invocation
    pub fn function_name (&self)->Option<&str> {
        if let ValueNode::FunctionInvocationValue(fi) = self { Some(fi.function_name.as_str()) } else { None }
    }

    pub fn argument (&self, name: &str)->Option<&ValueNode> {
        if let ValueNode::FunctionInvocationValue(fi) = self { fi.arguments.get(name) } else { None }
    }
}

/// top level expression: a map of values with the key of the result value
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String,ValueNode>
}

impl Expression {
    pub fn new (root: ValueNode)->Self {
        let mut values = BTreeMap::new();
        values.insert( "0".to_string(), root);
        Expression { result: "0".to_string(), values }
    }

    pub fn root (&self)->Option<&ValueNode> {
        self.values.get( &self.result)
    }
}

impl From<ValueNode> for Expression {
    fn from (root: ValueNode)->Self { Expression::new(root) }
}

/* #region primitives ***********************************************************************************************/

pub fn constant (v: impl Into<Value>)->ValueNode {
    ValueNode::ConstantValue( v.into())
}

pub fn array (values: Vec<ValueNode>)->ValueNode {
    ValueNode::ArrayValue( ArrayValue{values})
}

pub fn invoke<const N: usize> (function_name: &str, args: [(&str,ValueNode); N])->ValueNode {
    let arguments = args.into_iter().map( |(k,v)| (k.to_string(), v)).collect();
    ValueNode::FunctionInvocationValue( FunctionInvocation{ function_name: function_name.to_string(), arguments })
}

/* #endregion primitives */

/* #region catalog and collection functions *************************************************************************/

pub fn image_collection_load (id: &str)->ValueNode {
    invoke( "ImageCollection.load", [("id", constant(id))])
}

pub fn load_table (table_id: &str)->ValueNode {
    invoke( "Collection.loadTable", [("tableId", constant(table_id))])
}

pub fn filter (collection: ValueNode, filter: ValueNode)->ValueNode {
    invoke( "Collection.filter", [("collection", collection), ("filter", filter)])
}

/// keep collection elements whose footprint intersects `geometry`
pub fn filter_bounds (collection: ValueNode, geometry: ValueNode)->ValueNode {
    filter( collection, invoke( "Filter.intersects", [
        ("leftField", constant(".all")),
        ("rightValue", geometry)
    ]))
}

/// keep collection elements with `system:time_start` in [start, end)
pub fn filter_date (collection: ValueNode, start: NaiveDate, end: NaiveDate)->ValueNode {
    let range = invoke( "DateRange", [
        ("start", date(start)),
        ("end", date(end))
    ]);
    filter( collection, invoke( "Filter.dateRangeContains", [
        ("leftValue", range),
        ("rightField", constant("system:time_start"))
    ]))
}

pub fn filter_equals (collection: ValueNode, field: &str, value: impl Into<Value>)->ValueNode {
    filter( collection, invoke( "Filter.equals", [
        ("leftField", constant(field)),
        ("rightValue", constant(value))
    ]))
}

pub fn date (d: NaiveDate)->ValueNode {
    invoke( "Date", [("value", constant( d.format("%Y-%m-%d").to_string()))])
}

/// the per-pixel average over all images of a collection
pub fn reduce_mean (collection: ValueNode)->ValueNode {
    invoke( "reduce.mean", [("collection", collection)])
}

/// union of all feature geometries of a collection
pub fn collection_geometry (collection: ValueNode)->ValueNode {
    invoke( "Collection.geometry", [("collection", collection)])
}

/// the feature collection for a single country from a boundary table (e.g. "USDOS/LSIB_SIMPLE/2017" with field "country_na")
pub fn country_feature_collection (table_id: &str, name_field: &str, country: &str)->ValueNode {
    filter_equals( load_table(table_id), name_field, country)
}

/* #endregion catalog and collection functions */

/* #region image and geometry functions *****************************************************************************/

pub fn select_band (image: ValueNode, band: &str)->ValueNode {
    invoke( "Image.select", [
        ("input", image),
        ("bandSelectors", array( vec![constant(band)]))
    ])
}

pub fn clip (image: ValueNode, geometry: ValueNode)->ValueNode {
    invoke( "Image.clip", [("input", image), ("geometry", geometry)])
}

/// planar (non-geodesic) lon/lat rectangle
pub fn rectangle (bbox: &BoundingBox<f64>)->ValueNode {
    invoke( "GeometryConstructors.Rectangle", [
        ("coordinates", constant( json!([bbox.west, bbox.south, bbox.east, bbox.north]))),
        ("geodesic", constant(false))
    ])
}

/* #endregion image and geometry functions */
