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

//! # Ore Structure Module
//!
//! [`OreStructure`] is the owned, mutable store of every object for one
//! pipeline run. Objects live in a single arena keyed by [`ObjectId`];
//! parent/child relationships are id references stored alongside, so the
//! hierarchy is a DAG, not a tree: an object may be given an additional
//! parent to survive the deletion of its original one.
//!
//! Path resolution walks segment by segment from the root set and performs
//! no mutation. Only actions mutate the structure.
//!
//! Two lookup families exist: the `*_at` family returns `Option` and is for
//! code that still has to establish existence (preflight), the `expect_*`
//! family returns a typed error and is for code that runs after a successful
//! preflight already guaranteed the path.

use std::collections::HashMap;

use crate::array::OreArray;
use crate::errors::{OreError, Result};
use crate::object::{ObjectId, OreObject, OreObjectKind, OreObjectType};
use crate::path::OrePath;

/// Owned hierarchical store of all data objects for one pipeline run.
#[derive(Clone, Debug, Default)]
pub struct OreStructure {
    objects: HashMap<ObjectId, OreObject>,
    children: HashMap<ObjectId, Vec<ObjectId>>,
    roots: Vec<ObjectId>,
    next_id: u64,
}

impl OreStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently owned by the arena.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn allocate_id(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }

    fn child_ids(&self, parent: Option<ObjectId>) -> &[ObjectId] {
        match parent {
            Some(id) => self.children.get(&id).map(Vec::as_slice).unwrap_or(&[]),
            None => &self.roots,
        }
    }

    fn find_child(&self, parent: Option<ObjectId>, name: &str) -> Option<ObjectId> {
        self.child_ids(parent)
            .iter()
            .copied()
            .find(|id| self.objects.get(id).is_some_and(|obj| obj.name == name))
    }

    /// Inserts a new object under `parent` (the root set when `None`).
    ///
    /// Fails when the parent is missing, cannot hold children, or already
    /// has a child of the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        kind: OreObjectKind,
        parent: Option<&OrePath>,
    ) -> Result<ObjectId> {
        let name = name.into();
        let parent_id = match parent {
            Some(path) => {
                let id = self.id_at(path).ok_or_else(|| {
                    OreError::path(format!("parent path '{path}' does not exist"))
                })?;
                let parent_obj = self.objects.get(&id).ok_or_else(|| {
                    OreError::internal(format!("dangling parent id {id}"))
                })?;
                if !parent_obj.kind.can_have_children() {
                    return Err(OreError::validation(format!(
                        "object '{path}' of type '{}' cannot hold children",
                        parent_obj.object_type().name()
                    )));
                }
                Some(id)
            }
            None => None,
        };

        if self.find_child(parent_id, &name).is_some() {
            let location = parent.map(|p| p.to_string()).unwrap_or_else(|| "/".into());
            return Err(OreError::validation(format!(
                "'{location}' already contains an object named '{name}'"
            )));
        }

        let id = self.allocate_id();
        let parents = parent_id.into_iter().collect();
        let holds_children = kind.can_have_children();
        self.objects.insert(
            id,
            OreObject {
                id,
                name,
                parents,
                kind,
            },
        );
        if holds_children {
            self.children.insert(id, Vec::new());
        }
        match parent_id {
            Some(pid) => {
                if let Some(kids) = self.children.get_mut(&pid) {
                    kids.push(id);
                }
            }
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Inserts a new object at `path`, deriving name and parent from it.
    pub fn insert_at(&mut self, path: &OrePath, kind: OreObjectKind) -> Result<ObjectId> {
        let parent = path.parent();
        self.insert(path.name(), kind, parent.as_ref())
    }

    /// Resolves a path to an object id, or `None` when any segment is
    /// missing. Performs no mutation.
    pub fn id_at(&self, path: &OrePath) -> Option<ObjectId> {
        let mut current: Option<ObjectId> = None;
        for segment in path.segments() {
            current = Some(self.find_child(current, segment)?);
        }
        current
    }

    pub fn contains(&self, path: &OrePath) -> bool {
        self.id_at(path).is_some()
    }

    pub fn object(&self, id: ObjectId) -> Option<&OreObject> {
        self.objects.get(&id)
    }

    pub fn object_at(&self, path: &OrePath) -> Option<&OreObject> {
        self.id_at(path).and_then(|id| self.objects.get(&id))
    }

    pub fn object_at_mut(&mut self, path: &OrePath) -> Option<&mut OreObject> {
        let id = self.id_at(path)?;
        self.objects.get_mut(&id)
    }

    pub fn object_type_at(&self, path: &OrePath) -> Option<OreObjectType> {
        self.object_at(path).map(OreObject::object_type)
    }

    /// Borrow the array at `path`, or `None` when the path is missing or the
    /// terminal object is not an array.
    pub fn array_at(&self, path: &OrePath) -> Option<&OreArray> {
        self.object_at(path).and_then(OreObject::as_array)
    }

    pub fn array_at_mut(&mut self, path: &OrePath) -> Option<&mut OreArray> {
        self.object_at_mut(path).and_then(OreObject::as_array_mut)
    }

    /// Tuple shape of the attribute matrix at `path`.
    pub fn attribute_matrix_at(&self, path: &OrePath) -> Option<&[usize]> {
        match &self.object_at(path)?.kind {
            OreObjectKind::AttributeMatrix { tuple_shape } => Some(tuple_shape),
            _ => None,
        }
    }

    /// Dimensions, spacing, and origin of the image geometry at `path`.
    pub fn image_geometry_at(&self, path: &OrePath) -> Option<([usize; 3], [f64; 3], [f64; 3])> {
        match &self.object_at(path)?.kind {
            OreObjectKind::ImageGeometry {
                dims,
                spacing,
                origin,
            } => Some((*dims, *spacing, *origin)),
            _ => None,
        }
    }

    /// Loud variant of [`array_at`](Self::array_at) for post-preflight code.
    pub fn expect_array(&self, path: &OrePath) -> Result<&OreArray> {
        self.array_at(path)
            .ok_or_else(|| OreError::path(format!("no array at '{path}'")))
    }

    pub fn expect_array_mut(&mut self, path: &OrePath) -> Result<&mut OreArray> {
        // Resolve first so the error message can distinguish nothing-there
        // from wrong-kind without holding a mutable borrow.
        if self.array_at(path).is_none() {
            return Err(OreError::path(format!("no array at '{path}'")));
        }
        self.array_at_mut(path)
            .ok_or_else(|| OreError::path(format!("no array at '{path}'")))
    }

    pub fn expect_image_geometry(
        &self,
        path: &OrePath,
    ) -> Result<([usize; 3], [f64; 3], [f64; 3])> {
        self.image_geometry_at(path)
            .ok_or_else(|| OreError::path(format!("no image geometry at '{path}'")))
    }

    /// Names of the direct children of the object at `path`, in insertion
    /// order.
    pub fn children_names(&self, path: &OrePath) -> Result<Vec<String>> {
        let id = self
            .id_at(path)
            .ok_or_else(|| OreError::path(format!("path '{path}' does not exist")))?;
        Ok(self
            .child_ids(Some(id))
            .iter()
            .filter_map(|child| self.objects.get(child).map(|obj| obj.name.clone()))
            .collect())
    }

    /// Paths of every descendant below `path`, depth first.
    pub fn descendant_paths(&self, path: &OrePath) -> Result<Vec<OrePath>> {
        let id = self
            .id_at(path)
            .ok_or_else(|| OreError::path(format!("path '{path}' does not exist")))?;
        let mut out = Vec::new();
        self.collect_descendants(id, path, &mut out)?;
        Ok(out)
    }

    fn collect_descendants(
        &self,
        id: ObjectId,
        base: &OrePath,
        out: &mut Vec<OrePath>,
    ) -> Result<()> {
        let child_ids: Vec<ObjectId> = self.child_ids(Some(id)).to_vec();
        for child_id in child_ids {
            let child = self
                .objects
                .get(&child_id)
                .ok_or_else(|| OreError::internal(format!("dangling child id {child_id}")))?;
            let child_path = base.child(child.name.clone())?;
            out.push(child_path.clone());
            self.collect_descendants(child_id, &child_path, out)?;
        }
        Ok(())
    }

    /// Registers the object at `target` as a child of `new_parent` as well,
    /// giving it a second owner that can rescue it from a cascading delete.
    pub fn add_parent(&mut self, target: &OrePath, new_parent: &OrePath) -> Result<()> {
        let target_id = self
            .id_at(target)
            .ok_or_else(|| OreError::path(format!("path '{target}' does not exist")))?;
        let parent_id = self
            .id_at(new_parent)
            .ok_or_else(|| OreError::path(format!("path '{new_parent}' does not exist")))?;
        let parent_obj = self
            .objects
            .get(&parent_id)
            .ok_or_else(|| OreError::internal(format!("dangling parent id {parent_id}")))?;
        if !parent_obj.kind.can_have_children() {
            return Err(OreError::validation(format!(
                "object '{new_parent}' of type '{}' cannot hold children",
                parent_obj.object_type().name()
            )));
        }
        let target_name = self
            .objects
            .get(&target_id)
            .map(|obj| obj.name.clone())
            .ok_or_else(|| OreError::internal(format!("dangling object id {target_id}")))?;
        match self.find_child(Some(parent_id), &target_name) {
            Some(existing) if existing == target_id => return Ok(()),
            Some(_) => {
                return Err(OreError::validation(format!(
                    "'{new_parent}' already contains an object named '{target_name}'"
                )))
            }
            None => {}
        }

        if let Some(kids) = self.children.get_mut(&parent_id) {
            kids.push(target_id);
        }
        if let Some(obj) = self.objects.get_mut(&target_id) {
            obj.parents.push(parent_id);
        }
        Ok(())
    }

    /// Renames the object at `path`, keeping it unique among the siblings of
    /// every parent it is attached to.
    pub fn rename(&mut self, path: &OrePath, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        let id = self
            .id_at(path)
            .ok_or_else(|| OreError::path(format!("path '{path}' does not exist")))?;
        let parents = self
            .objects
            .get(&id)
            .map(|obj| obj.parents.clone())
            .ok_or_else(|| OreError::internal(format!("dangling object id {id}")))?;

        let parent_slots: Vec<Option<ObjectId>> = if parents.is_empty() {
            vec![None]
        } else {
            parents.into_iter().map(Some).collect()
        };
        for parent in parent_slots {
            if let Some(existing) = self.find_child(parent, &new_name) {
                if existing != id {
                    return Err(OreError::validation(format!(
                        "a sibling of '{path}' is already named '{new_name}'"
                    )));
                }
            }
        }

        if let Some(obj) = self.objects.get_mut(&id) {
            obj.name = new_name;
        }
        Ok(())
    }

    /// Removes the object at `path` from the parent this path reaches it
    /// through. The object itself is dropped only when no other parent still
    /// references it; dropped containers cascade to children the same way,
    /// preserving any child that holds an additional parent elsewhere.
    pub fn remove(&mut self, path: &OrePath) -> Result<()> {
        let id = self
            .id_at(path)
            .ok_or_else(|| OreError::path(format!("path '{path}' does not exist")))?;
        let via_parent = match path.parent() {
            Some(parent_path) => Some(self.id_at(&parent_path).ok_or_else(|| {
                OreError::path(format!("parent path '{parent_path}' does not exist"))
            })?),
            None => None,
        };

        match via_parent {
            Some(pid) => {
                if let Some(kids) = self.children.get_mut(&pid) {
                    kids.retain(|kid| *kid != id);
                }
                if let Some(obj) = self.objects.get_mut(&id) {
                    if let Some(pos) = obj.parents.iter().position(|p| *p == pid) {
                        obj.parents.remove(pos);
                    }
                    if !obj.parents.is_empty() {
                        // Rescued by an additional parent.
                        return Ok(());
                    }
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        self.drop_cascading(id);
        Ok(())
    }

    fn drop_cascading(&mut self, id: ObjectId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let child_ids = self.children.remove(&current).unwrap_or_default();
            self.objects.remove(&current);
            for child in child_ids {
                if let Some(obj) = self.objects.get_mut(&child) {
                    obj.parents.retain(|p| *p != current);
                    if obj.parents.is_empty() {
                        stack.push(child);
                    }
                }
            }
        }
    }

    /// Deep-copies the subtree at `source` to `destination`, assigning fresh
    /// ids throughout. Returns the paths of every created object, the
    /// destination itself first.
    pub fn copy_subtree(
        &mut self,
        source: &OrePath,
        destination: &OrePath,
    ) -> Result<Vec<OrePath>> {
        let src_id = self
            .id_at(source)
            .ok_or_else(|| OreError::path(format!("path '{source}' does not exist")))?;
        if self.contains(destination) {
            return Err(OreError::validation(format!(
                "destination '{destination}' already exists"
            )));
        }
        let mut created = Vec::new();
        self.copy_rec(src_id, destination, &mut created)?;
        Ok(created)
    }

    fn copy_rec(
        &mut self,
        src_id: ObjectId,
        dst_path: &OrePath,
        created: &mut Vec<OrePath>,
    ) -> Result<()> {
        let (kind, child_ids) = {
            let obj = self
                .objects
                .get(&src_id)
                .ok_or_else(|| OreError::internal(format!("dangling object id {src_id}")))?;
            let kids = self.child_ids(Some(src_id)).to_vec();
            (obj.kind.clone(), kids)
        };
        self.insert_at(dst_path, kind)?;
        created.push(dst_path.clone());
        for child_id in child_ids {
            let child_name = self
                .objects
                .get(&child_id)
                .map(|obj| obj.name.clone())
                .ok_or_else(|| OreError::internal(format!("dangling child id {child_id}")))?;
            let child_dst = dst_path.child(child_name)?;
            self.copy_rec(child_id, &child_dst, created)?;
        }
        Ok(())
    }
}
