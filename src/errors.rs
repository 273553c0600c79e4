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

//! # Ore Error Module
//!
//! This module defines the error types used throughout the Ore engine for
//! consistent error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! Ore uses a structured error approach with the following principles:
//!
//! - **Explicit Error Types**: Each error variant represents a specific
//!   category of failure, making it easier to handle errors appropriately
//! - **Context-Rich**: Errors include relevant context (paths, filter names,
//!   detailed messages) to aid debugging
//! - **No Panics**: Every fallible operation, including dynamic downcasts of
//!   stored objects, returns a typed error instead of throwing
//!
//! Faults that cross the filter boundary (numeric code + message pairs that
//! accumulate across a pipeline run) live in [`crate::outcome`]; `OreError`
//! is the crate-level error for operations that fail in exactly one way.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Ore.
pub type Result<T> = std::result::Result<T, OreError>;

/// Canonical error enumeration for the Ore engine.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum OreError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Malformed or unresolvable data paths.
    #[error("path error: {message}")]
    Path { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A structural action that could not be applied to the data structure.
    #[error("action '{action}' failed: {message}")]
    Action { action: String, message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at node '{node}': {message}")]
    Pipeline { node: String, message: String },

    /// Failures raised by the plugin loader or filter registry.
    #[error("plugin error: {message}")]
    Plugin { message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for OreError {
    fn from(err: io::Error) -> Self {
        OreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OreError {
    fn from(err: serde_json::Error) -> Self {
        OreError::Serde(err.to_string())
    }
}

impl OreError {
    /// Helper to construct path errors.
    pub fn path<T: Into<String>>(message: T) -> Self {
        OreError::Path {
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        OreError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct action-apply errors.
    pub fn action(name: impl Into<String>, message: impl Into<String>) -> Self {
        OreError::Action {
            action: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(node: impl Into<String>, message: impl Into<String>) -> Self {
        OreError::Pipeline {
            node: node.into(),
            message: message.into(),
        }
    }

    /// Helper to construct plugin errors.
    pub fn plugin<T: Into<String>>(message: T) -> Self {
        OreError::Plugin {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        OreError::Internal(message.into())
    }
}
