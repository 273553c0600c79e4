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

//! # Ore Registry Module
//!
//! The registry maps filter identities to factories. It is a plain owned
//! value: hosts build one, register plugins into it, and pass it by
//! reference into pipeline deserialization. Lookups are read-only after
//! registration, so a populated registry can serve concurrent pipeline runs
//! against different structures.

use std::collections::HashMap;

use uuid::Uuid;

use crate::errors::{OreError, Result};
use crate::filter::OreFilter;
use crate::plugin::{FilterFactory, OrePlugin, OrePluginInfo};

/// Registry mapping filter uuids to their factory functions.
#[derive(Default)]
pub struct OreFilterRegistry {
    factories: HashMap<Uuid, FilterFactory>,
    legacy: HashMap<Uuid, Uuid>,
    plugins: Vec<OrePluginInfo>,
    #[cfg(feature = "plugin")]
    libraries: Vec<libloading::Library>,
}

impl OreFilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every filter factory and legacy-id mapping of `plugin`.
    ///
    /// Each factory is invoked once here to learn the uuid it should be
    /// keyed under. Duplicate plugin ids, filter uuids, and legacy ids are
    /// rejected.
    pub fn register_plugin(&mut self, plugin: &dyn OrePlugin) -> Result<()> {
        if self.plugins.iter().any(|info| info.id == plugin.id()) {
            return Err(OreError::plugin(format!(
                "plugin '{}' ({}) already registered",
                plugin.name(),
                plugin.id()
            )));
        }

        for factory in plugin.filters() {
            let probe = factory();
            let uuid = probe.uuid();
            if self.factories.contains_key(&uuid) {
                return Err(OreError::plugin(format!(
                    "filter '{}' ({uuid}) already registered",
                    probe.name()
                )));
            }
            self.factories.insert(uuid, factory);
        }

        for (legacy, current) in plugin.legacy_ids() {
            if self.legacy.contains_key(&legacy) {
                return Err(OreError::plugin(format!(
                    "legacy id {legacy} already mapped"
                )));
            }
            self.legacy.insert(legacy, current);
        }

        log::info!(
            "registered plugin '{}' by '{}' ({} filters)",
            plugin.name(),
            plugin.vendor(),
            plugin.filters().len()
        );
        self.plugins.push(OrePluginInfo {
            id: plugin.id(),
            name: plugin.name().to_string(),
            vendor: plugin.vendor().to_string(),
        });
        Ok(())
    }

    /// Registers a single factory outside any plugin, keyed by the uuid of
    /// the filter it produces. Mostly useful in tests.
    pub fn register_factory(&mut self, factory: FilterFactory) -> Result<()> {
        let probe = factory();
        let uuid = probe.uuid();
        if self.factories.contains_key(&uuid) {
            return Err(OreError::plugin(format!(
                "filter '{}' ({uuid}) already registered",
                probe.name()
            )));
        }
        self.factories.insert(uuid, factory);
        Ok(())
    }

    /// Creates a fresh filter instance for `uuid`, resolving retired
    /// identities through the legacy map first.
    pub fn instantiate(&self, uuid: Uuid) -> Result<Box<dyn OreFilter>> {
        let resolved = if self.factories.contains_key(&uuid) {
            uuid
        } else {
            *self
                .legacy
                .get(&uuid)
                .ok_or_else(|| OreError::plugin(format!("unknown filter uuid {uuid}")))?
        };
        let factory = self
            .factories
            .get(&resolved)
            .ok_or_else(|| OreError::plugin(format!("unknown filter uuid {resolved}")))?;
        Ok(factory())
    }

    pub fn contains(&self, uuid: Uuid) -> bool {
        self.factories.contains_key(&uuid)
    }

    /// Uuids of every registered filter, in no particular order.
    pub fn uuids(&self) -> Vec<Uuid> {
        self.factories.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Records of the plugins registered so far, in registration order.
    pub fn plugins(&self) -> &[OrePluginInfo] {
        &self.plugins
    }
}

#[cfg(feature = "plugin")]
mod dynamic {
    use std::ffi::{c_void, CStr};
    use std::os::raw::c_char;
    use std::path::Path;

    use libloading::Library;
    use uuid::Uuid;

    use super::OreFilterRegistry;
    use crate::errors::{OreError, Result};
    use crate::plugin::FilterFactory;

    #[allow(improper_ctypes_definitions)]
    type PluginRegisterFn = unsafe extern "C" fn(RegisterFilterFn, *mut c_void) -> bool;
    #[allow(improper_ctypes_definitions)]
    type RegisterFilterFn = unsafe extern "C" fn(*const c_char, FilterFactory, *mut c_void);

    struct LoadContext {
        registry: *mut OreFilterRegistry,
        error: Option<OreError>,
    }

    #[allow(improper_ctypes_definitions)]
    unsafe extern "C" fn register_filter_callback(
        uuid: *const c_char,
        factory: FilterFactory,
        user_data: *mut c_void,
    ) {
        let ctx = &mut *(user_data as *mut LoadContext);
        if ctx.error.is_some() {
            return;
        }

        if uuid.is_null() {
            ctx.error = Some(OreError::plugin("plugin registered null filter uuid"));
            return;
        }

        let text = match CStr::from_ptr(uuid).to_str() {
            Ok(value) => value,
            Err(err) => {
                ctx.error = Some(OreError::plugin(format!(
                    "plugin provided invalid UTF-8 filter uuid: {err}"
                )));
                return;
            }
        };
        let parsed = match Uuid::parse_str(text) {
            Ok(value) => value,
            Err(err) => {
                ctx.error = Some(OreError::plugin(format!(
                    "plugin provided invalid filter uuid '{text}': {err}"
                )));
                return;
            }
        };

        let registry = &mut *ctx.registry;
        if registry.factories.contains_key(&parsed) {
            ctx.error = Some(OreError::plugin(format!(
                "filter uuid {parsed} already registered"
            )));
            return;
        }
        registry.factories.insert(parsed, factory);
    }

    impl OreFilterRegistry {
        /// Loads a dynamic plugin library and registers its filters.
        ///
        /// The library must export `ore_register_filters` with the plugin
        /// registration signature; the library handle is kept alive for the
        /// registry's lifetime so registered factories stay valid.
        pub fn load_plugin(&mut self, path: impl AsRef<Path>) -> Result<()> {
            unsafe {
                let library = Library::new(path.as_ref())
                    .map_err(|err| OreError::plugin(format!("failed to load plugin: {err}")))?;

                let register_symbol: libloading::Symbol<PluginRegisterFn> = library
                    .get(b"ore_register_filters\0")
                    .map_err(|err| {
                        OreError::plugin(format!(
                            "plugin missing symbol 'ore_register_filters': {err}"
                        ))
                    })?;

                let mut ctx = LoadContext {
                    registry: self as *mut OreFilterRegistry,
                    error: None,
                };

                let success = register_symbol(
                    register_filter_callback,
                    &mut ctx as *mut _ as *mut c_void,
                );

                if let Some(err) = ctx.error {
                    return Err(err);
                }
                if !success {
                    return Err(OreError::plugin(
                        "plugin registration reported failure".to_string(),
                    ));
                }

                log::info!("loaded plugin library {}", path.as_ref().display());
                self.libraries.push(library);
            }
            Ok(())
        }
    }
}
