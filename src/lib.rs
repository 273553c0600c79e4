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

//! # Ore Engine Library
//!
//! Ore is a two-phase pipeline execution engine for hierarchical
//! materials-microstructure data. Filters (units of computation) operate on
//! an in-memory [`OreStructure`] of groups, attribute matrices, geometries,
//! and typed arrays; pipelines chain filters with a preflight/execute
//! protocol; actions stage and later commit structural changes; plugins
//! register filter factories into an explicit registry.
//!
//! ## Module Overview
//!
//! - **path**: segment-path addressing keys
//! - **structure**: the arena-owned hierarchical object store
//! - **object** / **array**: the stored object kinds and typed arrays
//! - **action** / **actions**: staged structural mutations and the bundled set
//! - **filter**: the two-phase filter contract, messengers, cancellation
//! - **arguments** / **value**: parameter declarations and dynamic values
//! - **pipeline**: node sequencing, rename propagation, document round-trips
//! - **plugin** / **registry**: filter registration and lookup
//! - **filters**: the engine's bundled core filters
//! - **parallel**: cancel-aware data parallelism for filter bodies
//!
//! ## The Two Phases
//!
//! Preflight validates parameters and paths without running any algorithm:
//! each filter stages actions describing what execute would change, and the
//! engine applies them in placeholder mode so filters later in the pipeline
//! can validate against the hypothetical shape. Execute re-stages everything
//! with real allocation, runs the algorithms in node order, and commits each
//! node's deferred actions only after that node succeeded.
//!
//! ## Quick Start
//!
//! ```rust
//! use orex::{
//!     OreArguments, OreCorePlugin, OreFilterRegistry, OrePipeline, OreStructure,
//! };
//!
//! let mut registry = OreFilterRegistry::new();
//! registry.register_plugin(&OreCorePlugin).unwrap();
//!
//! let document = serde_json::json!({
//!     "name": "Minimal",
//!     "filters": [{
//!         "filter": { "uuid": orex::filters::CreateGroupFilter::UUID.to_string() },
//!         "args": { "output_path": "G1" },
//!     }],
//! });
//! let mut pipeline = OrePipeline::from_json(&document, &registry).unwrap();
//!
//! let mut structure = OreStructure::new();
//! let mut probe = structure.clone();
//! assert!(pipeline.preflight(&mut probe, true).is_completed());
//! ```
//!
//! ## Error Handling
//!
//! Crate-level operations return `Result<T, OreError>`. Filter invocations
//! return an [`OreOutcome`] carrying faults (`{code, message}` pairs) and
//! warnings; cancellation is a third, neutral state. Nothing panics across
//! the pipeline boundary.

pub mod action;
pub mod actions;
pub mod arguments;
pub mod array;
pub mod errors;
pub mod filter;
pub mod filters;
pub mod object;
pub mod outcome;
pub mod parallel;
pub mod path;
pub mod pipeline;
pub mod plugin;
pub mod registry;
pub mod structure;
pub mod value;

pub use errors::{OreError, Result};
pub use outcome::{OreFault, OreOutcome, OreStatus, OreWarning};

pub use action::{ApplyMode, OreAction, OreOutputActions};
pub use arguments::{OreArguments, OreParameterSpec, OreParameters};
pub use array::{DataType, OreArray, OreArrayStore};
pub use filter::{
    OreCancel, OreFilter, OreMessage, OreMessenger, OrePreflightResult, OrePreflightValue,
};
pub use object::{ObjectId, OreObject, OreObjectKind, OreObjectType};
pub use parallel::OreRangeRunner;
pub use path::{OrePath, PATH_DELIMITER};
pub use pipeline::{NodeStatus, OreFilterNode, OrePipeline, OrePipelineNode};
pub use plugin::{FilterFactory, OrePlugin, OrePluginInfo};
pub use registry::OreFilterRegistry;
pub use structure::OreStructure;
pub use value::{OreValue, ParameterKind};

pub use actions::{
    CopyDataAction, CreateArrayAction, CreateAttributeMatrixAction, CreateGroupAction,
    CreateImageGeometryAction, CreateTriangleGeometryAction, DeleteDataAction, DeleteKind,
    RenameDataAction,
};
pub use filters::OreCorePlugin;
