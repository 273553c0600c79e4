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

use crate::action::{ApplyMode, OreAction};
use crate::errors::Result;
use crate::path::OrePath;
use crate::structure::OreStructure;

/// Renames the object at a path, keeping sibling names unique under every
/// parent the object is attached to.
#[derive(Clone, Debug)]
pub struct RenameDataAction {
    path: OrePath,
    new_name: String,
}

impl RenameDataAction {
    pub fn new(path: OrePath, new_name: impl Into<String>) -> Self {
        Self {
            path,
            new_name: new_name.into(),
        }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }
}

impl OreAction for RenameDataAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        structure.rename(&self.path, self.new_name.clone())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        // The renamed path is what downstream nodes will resolve against.
        self.path
            .with_name(self.new_name.clone())
            .map(|renamed| vec![renamed])
            .unwrap_or_default()
    }
}
