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

//! # Ore Outcome Module
//!
//! Fault and warning values, and the three-state outcome that every filter
//! invocation produces. Unlike [`crate::errors::OreError`], which models
//! operations that fail in exactly one way, an [`OreOutcome`] carries zero or
//! more faults, zero or more warnings, and distinguishes a cancelled run from
//! a failed one. Faults never cross the filter boundary as panics; callers
//! inspect the outcome explicitly.
//!
//! Fault codes are `i32` values. Negative codes are filter-private and only
//! unique within one filter's documented range. The engine reserves the codes
//! in [`codes`] for protocol-level failures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fault codes reserved by the engine itself.
///
/// Filter implementations must not reuse these for their own validation
/// failures; pick codes inside a filter-documented negative range instead.
pub mod codes {
    /// A declared parameter key is absent from the argument bag.
    pub const MISSING_PARAMETER: i32 = -1;
    /// An argument value does not match the declared parameter kind.
    pub const PARAMETER_TYPE_MISMATCH: i32 = -2;
    /// An immediate action could not be applied after a successful preflight.
    pub const ACTION_APPLY_FAILED: i32 = -3;
    /// A deferred action could not be applied after a successful execute.
    pub const DEFERRED_APPLY_FAILED: i32 = -4;
}

/// A single error value surfaced by a filter or by the engine protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OreFault {
    pub code: i32,
    pub message: String,
}

impl OreFault {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        OreFault {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for OreFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// A non-fatal advisory accumulated alongside a valid or invalid outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OreWarning {
    pub code: i32,
    pub message: String,
}

impl OreWarning {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        OreWarning {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for OreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Terminal state of one filter invocation.
///
/// `Cancelled` is a neutral "stopped by request" state: it carries no value
/// and no faults, and must not be treated as a failure.
#[derive(Debug)]
pub enum OreStatus<T> {
    Completed(T),
    Failed(Vec<OreFault>),
    Cancelled,
}

/// Result bundle returned by preflight and execute calls.
///
/// Warnings are always surfaced to the caller regardless of the status.
#[derive(Debug)]
pub struct OreOutcome<T = ()> {
    pub status: OreStatus<T>,
    pub warnings: Vec<OreWarning>,
}

impl<T> OreOutcome<T> {
    /// Successful outcome wrapping a value.
    pub fn ok(value: T) -> Self {
        OreOutcome {
            status: OreStatus::Completed(value),
            warnings: Vec::new(),
        }
    }

    /// Failed outcome carrying the given faults.
    pub fn failed(faults: Vec<OreFault>) -> Self {
        OreOutcome {
            status: OreStatus::Failed(faults),
            warnings: Vec::new(),
        }
    }

    /// Failed outcome carrying a single fault.
    pub fn fault(code: i32, message: impl Into<String>) -> Self {
        Self::failed(vec![OreFault::new(code, message)])
    }

    /// Neutral stopped-by-request outcome.
    pub fn cancelled() -> Self {
        OreOutcome {
            status: OreStatus::Cancelled,
            warnings: Vec::new(),
        }
    }

    /// Attaches a warning, builder style.
    pub fn with_warning(mut self, code: i32, message: impl Into<String>) -> Self {
        self.warnings.push(OreWarning::new(code, message));
        self
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, OreStatus::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OreStatus::Failed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, OreStatus::Cancelled)
    }

    /// The faults of a failed outcome, or an empty slice.
    pub fn faults(&self) -> &[OreFault] {
        match &self.status {
            OreStatus::Failed(faults) => faults,
            _ => &[],
        }
    }

    /// Borrow the completed value, if any.
    pub fn value(&self) -> Option<&T> {
        match &self.status {
            OreStatus::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the outcome and take the completed value, if any.
    pub fn into_value(self) -> Option<T> {
        match self.status {
            OreStatus::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Map the completed value, preserving status and warnings.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> OreOutcome<U> {
        let status = match self.status {
            OreStatus::Completed(value) => OreStatus::Completed(op(value)),
            OreStatus::Failed(faults) => OreStatus::Failed(faults),
            OreStatus::Cancelled => OreStatus::Cancelled,
        };
        OreOutcome {
            status,
            warnings: self.warnings,
        }
    }

    /// Drop the completed value, keeping status and warnings.
    pub fn erased(self) -> OreOutcome<()> {
        self.map(|_| ())
    }
}
