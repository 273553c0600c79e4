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

//! # Ore Path Module
//!
//! [`OrePath`] is the addressing key into an [`crate::structure::OreStructure`]:
//! an immutable, ordered sequence of non-empty string segments. Segments are
//! compared case-sensitively and may not contain the `/` delimiter, so every
//! constructible path survives a string round-trip. All derivations
//! (`child`, `parent`, `with_name`) return new values; a path never mutates.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::errors::{OreError, Result};

/// Delimiter used by the string form of a path.
pub const PATH_DELIMITER: char = '/';

/// Immutable ordered segment sequence addressing one object in a structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrePath {
    segments: Vec<String>,
}

impl OrePath {
    /// Builds a path from owned segments.
    ///
    /// Fails if the sequence is empty, any segment is empty, or a segment
    /// contains the delimiter.
    pub fn new(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            return Err(OreError::path("a path requires at least one segment"));
        }
        for segment in &segments {
            Self::check_segment(segment)?;
        }
        Ok(OrePath { segments })
    }

    /// Builds a path from string slices.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        Self::new(segments.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Convenience constructor for a single-segment path.
    pub fn single(name: impl Into<String>) -> Result<Self> {
        Self::new(vec![name.into()])
    }

    fn check_segment(segment: &str) -> Result<()> {
        if segment.is_empty() {
            return Err(OreError::path("path segments must not be empty"));
        }
        if segment.contains(PATH_DELIMITER) {
            return Err(OreError::path(format!(
                "path segment '{segment}' must not contain '{PATH_DELIMITER}'"
            )));
        }
        Ok(())
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The last segment, naming the target object.
    pub fn name(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// A new path with `name` appended.
    pub fn child(&self, name: impl Into<String>) -> Result<OrePath> {
        let name = name.into();
        Self::check_segment(&name)?;
        let mut segments = self.segments.clone();
        segments.push(name);
        Ok(OrePath { segments })
    }

    /// A new path with the last segment dropped; `None` for a single-segment
    /// path.
    pub fn parent(&self) -> Option<OrePath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(OrePath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A new path with only the last segment replaced.
    pub fn with_name(&self, name: impl Into<String>) -> Result<OrePath> {
        let name = name.into();
        Self::check_segment(&name)?;
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = name;
        }
        Ok(OrePath { segments })
    }

    /// Whether `prefix` matches this path segment-for-segment from the front.
    ///
    /// A path is a prefix of itself.
    pub fn starts_with(&self, prefix: &OrePath) -> bool {
        prefix.segments.len() <= self.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// A new path with the leading `old` segments swapped for `new`, or
    /// `None` when `old` is not a structural prefix of this path.
    ///
    /// The comparison is segment-wise, never a substring match on the string
    /// form, so `Foo` does not rewrite `FooBar/Baz`.
    pub fn replace_prefix(&self, old: &OrePath, new: &OrePath) -> Option<OrePath> {
        if !self.starts_with(old) {
            return None;
        }
        let mut segments = new.segments.clone();
        segments.extend_from_slice(&self.segments[old.segments.len()..]);
        Some(OrePath { segments })
    }
}

impl fmt::Display for OrePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for OrePath {
    type Err = OreError;

    fn from_str(value: &str) -> Result<Self> {
        Self::new(
            value
                .split(PATH_DELIMITER)
                .map(str::to_string)
                .collect::<Vec<_>>(),
        )
    }
}

impl Serialize for OrePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Paths deserialize from either the delimited string form or an explicit
/// array of segments.
impl<'de> Deserialize<'de> for OrePath {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct PathVisitor;

        impl<'de> Visitor<'de> for PathVisitor {
            type Value = OrePath;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a delimited path string or a sequence of segments")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<OrePath, E> {
                OrePath::from_str(value).map_err(de::Error::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<OrePath, A::Error> {
                let mut segments = Vec::new();
                while let Some(segment) = seq.next_element::<String>()? {
                    segments.push(segment);
                }
                OrePath::new(segments).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(PathVisitor)
    }
}
