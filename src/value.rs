//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Ore Value Module
//!
//! The closed set of dynamic values an argument bag can carry, and their
//! JSON encoding. Values serialize untagged, each per its own kind: numbers
//! as JSON numbers, paths as delimited strings, choices as integer indices,
//! tables as nested arrays. Decoding is guided by the declared
//! [`ParameterKind`] of the receiving parameter, which is what keeps the
//! pipeline-document round-trip lossless without type tags in the file.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{OreError, Result};
use crate::path::OrePath;

/// Kind discriminator for declared parameters and their values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Bool,
    Int,
    Float,
    Text,
    Path,
    PathList,
    Choice,
    FloatVec,
    Table,
}

impl ParameterKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParameterKind::Bool => "bool",
            ParameterKind::Int => "int",
            ParameterKind::Float => "float",
            ParameterKind::Text => "text",
            ParameterKind::Path => "path",
            ParameterKind::PathList => "path_list",
            ParameterKind::Choice => "choice",
            ParameterKind::FloatVec => "float_vec",
            ParameterKind::Table => "table",
        }
    }
}

/// One dynamically-typed argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum OreValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Path(OrePath),
    PathList(Vec<OrePath>),
    /// Index into a filter-documented list of choices.
    Choice(usize),
    FloatVec(Vec<f64>),
    /// Row-major table of floats, e.g. dynamic tuple dimensions.
    Table(Vec<Vec<f64>>),
}

impl OreValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            OreValue::Bool(_) => ParameterKind::Bool,
            OreValue::Int(_) => ParameterKind::Int,
            OreValue::Float(_) => ParameterKind::Float,
            OreValue::Text(_) => ParameterKind::Text,
            OreValue::Path(_) => ParameterKind::Path,
            OreValue::PathList(_) => ParameterKind::PathList,
            OreValue::Choice(_) => ParameterKind::Choice,
            OreValue::FloatVec(_) => ParameterKind::FloatVec,
            OreValue::Table(_) => ParameterKind::Table,
        }
    }

    /// Untagged JSON encoding of this value.
    pub fn to_json(&self) -> Value {
        match self {
            OreValue::Bool(v) => json!(v),
            OreValue::Int(v) => json!(v),
            OreValue::Float(v) => json!(v),
            OreValue::Text(v) => json!(v),
            OreValue::Path(path) => json!(path.to_string()),
            OreValue::PathList(paths) => {
                json!(paths.iter().map(OrePath::to_string).collect::<Vec<_>>())
            }
            OreValue::Choice(index) => json!(index),
            OreValue::FloatVec(values) => json!(values),
            OreValue::Table(rows) => json!(rows),
        }
    }

    /// Decodes an untagged JSON value as the given kind.
    pub fn from_json(kind: ParameterKind, value: &Value) -> Result<OreValue> {
        let mismatch = || {
            OreError::Serde(format!(
                "value {value} cannot be read as kind '{}'",
                kind.name()
            ))
        };
        match kind {
            ParameterKind::Bool => value.as_bool().map(OreValue::Bool).ok_or_else(mismatch),
            ParameterKind::Int => value.as_i64().map(OreValue::Int).ok_or_else(mismatch),
            ParameterKind::Float => value.as_f64().map(OreValue::Float).ok_or_else(mismatch),
            ParameterKind::Text => value
                .as_str()
                .map(|s| OreValue::Text(s.to_string()))
                .ok_or_else(mismatch),
            ParameterKind::Path => match value {
                Value::String(text) => Ok(OreValue::Path(OrePath::from_str(text)?)),
                Value::Array(_) => {
                    let path: OrePath = serde_json::from_value(value.clone())?;
                    Ok(OreValue::Path(path))
                }
                _ => Err(mismatch()),
            },
            ParameterKind::PathList => {
                let entries = value.as_array().ok_or_else(mismatch)?;
                let mut paths = Vec::with_capacity(entries.len());
                for entry in entries {
                    let path: OrePath = serde_json::from_value(entry.clone())?;
                    paths.push(path);
                }
                Ok(OreValue::PathList(paths))
            }
            ParameterKind::Choice => value
                .as_u64()
                .map(|v| OreValue::Choice(v as usize))
                .ok_or_else(mismatch),
            ParameterKind::FloatVec => {
                let entries = value.as_array().ok_or_else(mismatch)?;
                let mut values = Vec::with_capacity(entries.len());
                for entry in entries {
                    values.push(entry.as_f64().ok_or_else(mismatch)?);
                }
                Ok(OreValue::FloatVec(values))
            }
            ParameterKind::Table => {
                let rows = value.as_array().ok_or_else(mismatch)?;
                let mut table = Vec::with_capacity(rows.len());
                for row in rows {
                    let cells = row.as_array().ok_or_else(mismatch)?;
                    let mut parsed = Vec::with_capacity(cells.len());
                    for cell in cells {
                        parsed.push(cell.as_f64().ok_or_else(mismatch)?);
                    }
                    table.push(parsed);
                }
                Ok(OreValue::Table(table))
            }
        }
    }
}
