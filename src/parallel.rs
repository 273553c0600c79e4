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

//! # Ore Parallel Module
//!
//! Cancel-aware data parallelism for filter bodies. Pipeline nodes always
//! run strictly sequentially; the only parallelism in the engine is inside
//! one filter's execute over independent tuples, and it must join before the
//! filter returns. [`OreRangeRunner`] provides exactly that: it splits a
//! flat index range into chunks, runs them on the Rayon pool (or serially
//! without the `parallel` feature), polls the shared cancel flag at chunk
//! granularity, and returns whether the sweep ran to completion.

use std::ops::Range;

use crate::filter::OreCancel;

/// Chunked runner over a flat index range.
#[derive(Clone, Debug, Default)]
pub struct OreRangeRunner {
    chunk_size: Option<usize>,
}

impl OreRangeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the automatic chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    fn effective_chunk(&self, len: usize) -> usize {
        if let Some(chunk) = self.chunk_size {
            return chunk.max(1);
        }
        // Aim for a few chunks per worker so cancellation stays responsive
        // without drowning in scheduling overhead.
        #[cfg(feature = "parallel")]
        return (len / (num_cpus::get().max(1) * 4)).max(1024);
        #[cfg(not(feature = "parallel"))]
        return len.clamp(1, 4096);
    }

    /// Runs `op` over `0..len` in chunks, skipping remaining chunks once the
    /// cancel flag is set. Returns `true` when the whole range was
    /// processed, `false` when cancellation cut it short. All workers have
    /// joined by the time this returns.
    #[cfg(feature = "parallel")]
    pub fn run<F>(&self, len: usize, cancel: &OreCancel, op: F) -> bool
    where
        F: Fn(Range<usize>) + Send + Sync,
    {
        use rayon::prelude::*;

        let chunk = self.effective_chunk(len);
        let ranges: Vec<Range<usize>> = (0..len)
            .step_by(chunk)
            .map(|start| start..(start + chunk).min(len))
            .collect();
        ranges.into_par_iter().for_each(|range| {
            if cancel.is_cancelled() {
                return;
            }
            op(range);
        });
        !cancel.is_cancelled()
    }

    #[cfg(not(feature = "parallel"))]
    pub fn run<F>(&self, len: usize, cancel: &OreCancel, op: F) -> bool
    where
        F: Fn(Range<usize>) + Send + Sync,
    {
        let chunk = self.effective_chunk(len);
        let mut start = 0;
        while start < len {
            if cancel.is_cancelled() {
                return false;
            }
            let end = (start + chunk).min(len);
            op(start..end);
            start = end;
        }
        !cancel.is_cancelled()
    }

    /// Runs `op` over `data` split into chunks of whole tuples (`stride`
    /// elements per tuple). `op` receives the index of the chunk's first
    /// tuple and the chunk as a mutable slice, so workers write disjoint
    /// regions. Same cancellation and join semantics as [`run`](Self::run).
    #[cfg(feature = "parallel")]
    pub fn run_slices<T, F>(
        &self,
        data: &mut [T],
        stride: usize,
        cancel: &OreCancel,
        op: F,
    ) -> bool
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        use rayon::prelude::*;

        let stride = stride.max(1);
        let tuples = data.len() / stride;
        let chunk_tuples = self.effective_chunk(tuples);
        data.par_chunks_mut(chunk_tuples * stride)
            .enumerate()
            .for_each(|(index, chunk)| {
                if cancel.is_cancelled() {
                    return;
                }
                op(index * chunk_tuples, chunk);
            });
        !cancel.is_cancelled()
    }

    #[cfg(not(feature = "parallel"))]
    pub fn run_slices<T, F>(
        &self,
        data: &mut [T],
        stride: usize,
        cancel: &OreCancel,
        op: F,
    ) -> bool
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        let stride = stride.max(1);
        let tuples = data.len() / stride;
        let chunk_tuples = self.effective_chunk(tuples);
        for (index, chunk) in data.chunks_mut(chunk_tuples * stride).enumerate() {
            if cancel.is_cancelled() {
                return false;
            }
            op(index * chunk_tuples, chunk);
        }
        !cancel.is_cancelled()
    }
}
