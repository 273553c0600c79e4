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

//! # Ore Plugin Module
//!
//! A plugin is a registrar of filter factories. Registration happens into an
//! explicit [`crate::registry::OreFilterRegistry`] value owned by the host;
//! there is no process-wide registry, so independent registries can coexist
//! in one process (useful for tests).
//!
//! Plugins may also publish a legacy-id map: identities under which their
//! filters were known to older pipeline documents, resolved transparently at
//! instantiation time.

use std::collections::HashMap;

use uuid::Uuid;

use crate::filter::OreFilter;

/// Factory producing a fresh filter instance.
pub type FilterFactory = fn() -> Box<dyn OreFilter>;

/// A runtime registrar of filter factories.
pub trait OrePlugin {
    /// Stable identity of the plugin.
    fn id(&self) -> Uuid;

    /// Human name of the plugin.
    fn name(&self) -> &str;

    /// Vendor string shown by hosts.
    fn vendor(&self) -> &str;

    /// The filter factories this plugin provides. Each factory is keyed in
    /// the registry by the uuid of the filter it produces.
    fn filters(&self) -> Vec<FilterFactory>;

    /// Mapping from retired filter identities to current ones.
    fn legacy_ids(&self) -> HashMap<Uuid, Uuid> {
        HashMap::new()
    }
}

/// Descriptive record of a registered plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrePluginInfo {
    pub id: Uuid,
    pub name: String,
    pub vendor: String,
}
