/// UniformSet - insertion-ordered named uniforms

use std::cell::RefCell;
use std::rc::Rc;
use rustc_hash::FxHashMap;

use crate::graphics_device::ShaderStage;
use crate::uniform::{Uniform, UniformValue};

/// Uniform set shared between the renderer and every material
pub type SharedUniforms = Rc<RefCell<UniformSet>>;

/// One step from a uniform to one of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Array element index
    Element(usize),
    /// Struct field index (declaration order)
    Field(usize),
}

/// Position of a leaf uniform inside a `UniformSet`
///
/// Paths are positional, so they stay valid while values change but not
/// when arrays or structs are restructured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformPath {
    pub root: usize,
    pub steps: Vec<PathStep>,
}

/// A leaf produced by `UniformSet::leaves`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLeaf {
    /// Fully qualified GLSL name ("u_waveLayers[0].color")
    pub name: String,
    pub path: UniformPath,
}

#[derive(Debug, Clone, Default)]
pub struct UniformSet {
    entries: Vec<(String, Uniform)>,
    index: FxHashMap<String, usize>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap into a `SharedUniforms`
    pub fn into_shared(self) -> SharedUniforms {
        Rc::new(RefCell::new(self))
    }

    /// Insert or replace `name`
    ///
    /// A replaced uniform keeps its original position. Returns the previous
    /// uniform, if any.
    pub fn insert<S: Into<String>>(&mut self, name: S, uniform: Uniform) -> Option<Uniform> {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[i].1, uniform));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, uniform));
        None
    }

    pub fn get(&self, name: &str) -> Option<&Uniform> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Uniform> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Uniform)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Declarations of every uniform for `stage`, joined by newlines
    pub fn declarations(&self, stage: ShaderStage) -> String {
        self.entries
            .iter()
            .map(|(name, uniform)| uniform.declaration(name, stage, 0))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ===== LEAF EXPANSION =====

    /// Every uploadable leaf, depth first in declaration order
    ///
    /// Arrays expand to `name[i]`, structs to `name.field`. Unset composites
    /// contribute nothing.
    pub fn leaves(&self) -> Vec<UniformLeaf> {
        let mut out = Vec::new();
        for (root, (name, uniform)) in self.entries.iter().enumerate() {
            let path = UniformPath { root, steps: Vec::new() };
            collect_leaves(name.clone(), uniform, path, &mut out);
        }
        out
    }

    /// Uniform at `path`
    pub fn resolve(&self, path: &UniformPath) -> Option<&Uniform> {
        let mut current = &self.entries.get(path.root)?.1;
        for step in &path.steps {
            current = match (step, current.value()) {
                (PathStep::Element(i), Some(UniformValue::Array(children))) => children.get(*i)?,
                (PathStep::Field(i), Some(UniformValue::Struct(fields))) => &fields.get(*i)?.1,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn collect_leaves(name: String, uniform: &Uniform, path: UniformPath, out: &mut Vec<UniformLeaf>) {
    match uniform.value() {
        Some(UniformValue::Array(children)) => {
            for (i, child) in children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.steps.push(PathStep::Element(i));
                collect_leaves(format!("{}[{}]", name, i), child, child_path, out);
            }
        }
        Some(UniformValue::Struct(fields)) => {
            for (i, (field, child)) in fields.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.steps.push(PathStep::Field(i));
                collect_leaves(format!("{}.{}", name, field), child, child_path, out);
            }
        }
        None if !uniform.kind().is_leaf() => {}
        _ => out.push(UniformLeaf { name, path }),
    }
}

#[cfg(test)]
#[path = "uniform_set_tests.rs"]
mod tests;
