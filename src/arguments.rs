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

//! # Ore Arguments Module
//!
//! [`OreParameters`] is the static declaration a filter publishes: the full
//! set of named parameters with kinds, labels, and defaults. [`OreArguments`]
//! is the bag of values bound to one invocation. Validation of a bag against
//! a declaration happens before any path resolution: a missing key or a
//! kind mismatch fails the invocation with an engine-reserved fault code and
//! no actions are produced.

use std::collections::HashMap;

use crate::outcome::{codes, OreFault};
use crate::path::OrePath;
use crate::value::{OreValue, ParameterKind};

/// Declaration of one named parameter.
#[derive(Clone, Debug)]
pub struct OreParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ParameterKind,
    pub default: OreValue,
}

/// Ordered set of parameter declarations for one filter class.
#[derive(Clone, Debug, Default)]
pub struct OreParameters {
    specs: Vec<OreParameterSpec>,
}

impl OreParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration, builder style.
    pub fn with(
        mut self,
        key: &'static str,
        label: &'static str,
        kind: ParameterKind,
        default: OreValue,
    ) -> Self {
        self.specs.push(OreParameterSpec {
            key,
            label,
            kind,
            default,
        });
        self
    }

    pub fn specs(&self) -> &[OreParameterSpec] {
        &self.specs
    }

    pub fn get(&self, key: &str) -> Option<&OreParameterSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.key)
    }

    /// An argument bag carrying every declared default.
    pub fn default_arguments(&self) -> OreArguments {
        let mut args = OreArguments::new();
        for spec in &self.specs {
            args.insert(spec.key, spec.default.clone());
        }
        args
    }

    /// Checks `args` against this declaration. Every declared key must be
    /// present with a value of the declared kind; one fault per violation.
    pub fn validate(&self, args: &OreArguments) -> Vec<OreFault> {
        let mut faults = Vec::new();
        for spec in &self.specs {
            match args.get(spec.key) {
                None => faults.push(OreFault::new(
                    codes::MISSING_PARAMETER,
                    format!("required parameter '{}' is missing", spec.key),
                )),
                Some(value) if value.kind() != spec.kind => faults.push(OreFault::new(
                    codes::PARAMETER_TYPE_MISMATCH,
                    format!(
                        "parameter '{}' expects kind '{}' but was given '{}'",
                        spec.key,
                        spec.kind.name(),
                        value.kind().name()
                    ),
                )),
                Some(_) => {}
            }
        }
        faults
    }
}

/// Named bag of dynamic values bound to one filter invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OreArguments {
    values: HashMap<String, OreValue>,
}

impl OreArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: OreValue) {
        self.values.insert(key.into(), value);
    }

    /// Insert, builder style.
    pub fn with(mut self, key: impl Into<String>, value: OreValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OreValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OreValue)> {
        self.values.iter()
    }

    fn fault_for(&self, key: &str, kind: ParameterKind) -> OreFault {
        match self.values.get(key) {
            None => OreFault::new(
                codes::MISSING_PARAMETER,
                format!("required parameter '{key}' is missing"),
            ),
            Some(value) => OreFault::new(
                codes::PARAMETER_TYPE_MISMATCH,
                format!(
                    "parameter '{key}' expects kind '{}' but was given '{}'",
                    kind.name(),
                    value.kind().name()
                ),
            ),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Bool(v)) => Ok(*v),
            _ => Err(self.fault_for(key, ParameterKind::Bool)),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Int(v)) => Ok(*v),
            _ => Err(self.fault_for(key, ParameterKind::Int)),
        }
    }

    pub fn float(&self, key: &str) -> Result<f64, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Float(v)) => Ok(*v),
            _ => Err(self.fault_for(key, ParameterKind::Float)),
        }
    }

    pub fn text(&self, key: &str) -> Result<String, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Text(v)) => Ok(v.clone()),
            _ => Err(self.fault_for(key, ParameterKind::Text)),
        }
    }

    pub fn path(&self, key: &str) -> Result<OrePath, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Path(v)) => Ok(v.clone()),
            _ => Err(self.fault_for(key, ParameterKind::Path)),
        }
    }

    pub fn path_list(&self, key: &str) -> Result<Vec<OrePath>, OreFault> {
        match self.values.get(key) {
            Some(OreValue::PathList(v)) => Ok(v.clone()),
            _ => Err(self.fault_for(key, ParameterKind::PathList)),
        }
    }

    pub fn choice(&self, key: &str) -> Result<usize, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Choice(v)) => Ok(*v),
            _ => Err(self.fault_for(key, ParameterKind::Choice)),
        }
    }

    pub fn float_vec(&self, key: &str) -> Result<Vec<f64>, OreFault> {
        match self.values.get(key) {
            Some(OreValue::FloatVec(v)) => Ok(v.clone()),
            _ => Err(self.fault_for(key, ParameterKind::FloatVec)),
        }
    }

    pub fn table(&self, key: &str) -> Result<Vec<Vec<f64>>, OreFault> {
        match self.values.get(key) {
            Some(OreValue::Table(v)) => Ok(v.clone()),
            _ => Err(self.fault_for(key, ParameterKind::Table)),
        }
    }

    /// Rewrites every path-carrying value whose path starts with `old`,
    /// swapping that prefix for `new`. Returns how many values changed.
    pub fn rewrite_path_prefix(&mut self, old: &OrePath, new: &OrePath) -> usize {
        let mut rewritten = 0;
        for value in self.values.values_mut() {
            match value {
                OreValue::Path(path) => {
                    if let Some(updated) = path.replace_prefix(old, new) {
                        *path = updated;
                        rewritten += 1;
                    }
                }
                OreValue::PathList(paths) => {
                    for path in paths {
                        if let Some(updated) = path.replace_prefix(old, new) {
                            *path = updated;
                            rewritten += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        rewritten
    }
}
