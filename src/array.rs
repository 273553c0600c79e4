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

//! # Ore Array Module
//!
//! Typed array containers stored inside a structure. An [`OreArray`] pairs a
//! [`DataType`] with a tuple shape (outer dimensions) and a component shape
//! (per-tuple inner dimensions, e.g. `[3]` for a vector or `[4]` for a
//! quaternion). During preflight the backing store is a placeholder that
//! still answers every shape and type query; execute-mode allocation commits
//! a zero-initialized buffer of the full size.

use serde::{Deserialize, Serialize};

/// Element type of an [`OreArray`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Boolean,
}

impl DataType {
    /// Every element type, in declaration order. Choice-style parameters
    /// index into this list.
    pub const ALL: [DataType; 11] = [
        DataType::Int8,
        DataType::UInt8,
        DataType::Int16,
        DataType::UInt16,
        DataType::Int32,
        DataType::UInt32,
        DataType::Int64,
        DataType::UInt64,
        DataType::Float32,
        DataType::Float64,
        DataType::Boolean,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::UInt8 => "uint8",
            DataType::Int16 => "int16",
            DataType::UInt16 => "uint16",
            DataType::Int32 => "int32",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Boolean => "boolean",
        }
    }
}

/// Backing storage for an array.
///
/// `Placeholder` is the preflight-mode store: no elements are held, but the
/// owning [`OreArray`] still knows its shapes and type.
#[derive(Clone, Debug, PartialEq)]
pub enum OreArrayStore {
    Placeholder,
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Boolean(Vec<bool>),
}

impl OreArrayStore {
    fn zeroed(data_type: DataType, len: usize) -> Self {
        match data_type {
            DataType::Int8 => OreArrayStore::Int8(vec![0; len]),
            DataType::UInt8 => OreArrayStore::UInt8(vec![0; len]),
            DataType::Int16 => OreArrayStore::Int16(vec![0; len]),
            DataType::UInt16 => OreArrayStore::UInt16(vec![0; len]),
            DataType::Int32 => OreArrayStore::Int32(vec![0; len]),
            DataType::UInt32 => OreArrayStore::UInt32(vec![0; len]),
            DataType::Int64 => OreArrayStore::Int64(vec![0; len]),
            DataType::UInt64 => OreArrayStore::UInt64(vec![0; len]),
            DataType::Float32 => OreArrayStore::Float32(vec![0.0; len]),
            DataType::Float64 => OreArrayStore::Float64(vec![0.0; len]),
            DataType::Boolean => OreArrayStore::Boolean(vec![false; len]),
        }
    }
}

macro_rules! typed_accessors {
    ($([$variant:ident, $elem:ty, $ref_fn:ident, $mut_fn:ident]),* $(,)?) => {
        $(
            /// Borrow the backing buffer, or `None` when the store is a
            /// placeholder or of another element type.
            pub fn $ref_fn(&self) -> Option<&[$elem]> {
                match &self.store {
                    OreArrayStore::$variant(values) => Some(values),
                    _ => None,
                }
            }

            pub fn $mut_fn(&mut self) -> Option<&mut [$elem]> {
                match &mut self.store {
                    OreArrayStore::$variant(values) => Some(values),
                    _ => None,
                }
            }
        )*
    };
}

/// Typed array with tuple and component shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct OreArray {
    data_type: DataType,
    tuple_shape: Vec<usize>,
    component_shape: Vec<usize>,
    store: OreArrayStore,
}

impl OreArray {
    /// Preflight-mode array: shapes and type only, placeholder store.
    pub fn placeholder(
        data_type: DataType,
        tuple_shape: Vec<usize>,
        component_shape: Vec<usize>,
    ) -> Self {
        OreArray {
            data_type,
            tuple_shape,
            component_shape,
            store: OreArrayStore::Placeholder,
        }
    }

    /// Execute-mode array: zero-initialized buffer of the full size.
    pub fn allocated(
        data_type: DataType,
        tuple_shape: Vec<usize>,
        component_shape: Vec<usize>,
    ) -> Self {
        let len = tuple_shape.iter().product::<usize>()
            * component_shape.iter().product::<usize>();
        OreArray {
            data_type,
            tuple_shape,
            component_shape,
            store: OreArrayStore::zeroed(data_type, len),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn tuple_shape(&self) -> &[usize] {
        &self.tuple_shape
    }

    pub fn component_shape(&self) -> &[usize] {
        &self.component_shape
    }

    /// Product of the tuple shape.
    pub fn num_tuples(&self) -> usize {
        self.tuple_shape.iter().product()
    }

    /// Product of the component shape.
    pub fn num_components(&self) -> usize {
        self.component_shape.iter().product()
    }

    /// Total element count across all tuples.
    pub fn len(&self) -> usize {
        self.num_tuples() * self.num_components()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a real buffer backs this array.
    pub fn is_allocated(&self) -> bool {
        !matches!(self.store, OreArrayStore::Placeholder)
    }

    /// Commit a real zeroed buffer in place, keeping shapes and type.
    pub fn allocate(&mut self) {
        if !self.is_allocated() {
            self.store = OreArrayStore::zeroed(self.data_type, self.len());
        }
    }

    /// Replace the tuple shape. The store is reset to match the new size;
    /// a placeholder stays a placeholder.
    pub fn reshape_tuples(&mut self, tuple_shape: Vec<usize>) {
        self.tuple_shape = tuple_shape;
        if self.is_allocated() {
            self.store = OreArrayStore::zeroed(self.data_type, self.len());
        }
    }

    pub fn store(&self) -> &OreArrayStore {
        &self.store
    }

    typed_accessors!(
        [Int8, i8, as_i8, as_i8_mut],
        [UInt8, u8, as_u8, as_u8_mut],
        [Int16, i16, as_i16, as_i16_mut],
        [UInt16, u16, as_u16, as_u16_mut],
        [Int32, i32, as_i32, as_i32_mut],
        [UInt32, u32, as_u32, as_u32_mut],
        [Int64, i64, as_i64, as_i64_mut],
        [UInt64, u64, as_u64, as_u64_mut],
        [Float32, f32, as_f32, as_f32_mut],
        [Float64, f64, as_f64, as_f64_mut],
        [Boolean, bool, as_bool, as_bool_mut],
    );

    /// Copy the tuple at `src_tuple` in `source` over the tuple at
    /// `dst_tuple` in `self`. Both arrays must share element type and
    /// component count and both must be allocated.
    pub fn copy_tuple_from(
        &mut self,
        source: &OreArray,
        src_tuple: usize,
        dst_tuple: usize,
    ) -> bool {
        if source.data_type != self.data_type
            || source.num_components() != self.num_components()
        {
            return false;
        }
        let comps = self.num_components();
        let src_start = src_tuple * comps;
        let dst_start = dst_tuple * comps;

        macro_rules! copy_variant {
            ($($variant:ident),*) => {
                match (&mut self.store, &source.store) {
                    $(
                        (OreArrayStore::$variant(dst), OreArrayStore::$variant(src)) => {
                            if src_start + comps > src.len() || dst_start + comps > dst.len() {
                                return false;
                            }
                            dst[dst_start..dst_start + comps]
                                .copy_from_slice(&src[src_start..src_start + comps]);
                            true
                        }
                    )*
                    _ => false,
                }
            };
        }

        copy_variant!(
            Int8, UInt8, Int16, UInt16, Int32, UInt32, Int64, UInt64, Float32, Float64,
            Boolean
        )
    }
}
