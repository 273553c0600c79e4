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

/// Deletion scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteKind {
    /// Remove only the named object. Children holding an additional parent
    /// elsewhere survive; exclusively-owned children go with it.
    JustObject,
}

/// Removes the object at a path. Fails when the path does not resolve.
#[derive(Clone, Debug)]
pub struct DeleteDataAction {
    path: OrePath,
    kind: DeleteKind,
}

impl DeleteDataAction {
    pub fn new(path: OrePath, kind: DeleteKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }

    pub fn kind(&self) -> DeleteKind {
        self.kind
    }
}

impl OreAction for DeleteDataAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        match self.kind {
            DeleteKind::JustObject => structure.remove(&self.path),
        }
    }
}
