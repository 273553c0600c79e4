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

/// Deep-copies the object at `source` (and everything below it) to
/// `destination`.
///
/// The full list of paths the copy will create is computed by the staging
/// filter's preflight, while it still has the structure in hand, and carried
/// on the action so rename detection and downstream preflights see every
/// created descendant.
#[derive(Clone, Debug)]
pub struct CopyDataAction {
    source: OrePath,
    destination: OrePath,
    created: Vec<OrePath>,
}

impl CopyDataAction {
    pub fn new(source: OrePath, destination: OrePath, created: Vec<OrePath>) -> Self {
        Self {
            source,
            destination,
            created,
        }
    }

    pub fn source(&self) -> &OrePath {
        &self.source
    }

    pub fn destination(&self) -> &OrePath {
        &self.destination
    }
}

impl OreAction for CopyDataAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        // Preflight copies of placeholder arrays stay placeholders; execute
        // copies of allocated arrays carry their buffers.
        structure.copy_subtree(&self.source, &self.destination)?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        if self.created.is_empty() {
            vec![self.destination.clone()]
        } else {
            self.created.clone()
        }
    }
}
