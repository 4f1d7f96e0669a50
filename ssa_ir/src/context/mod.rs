//! Arena storage for every IR entity.
//!
//! All entities (values, use edges, operations, blocks and functions) are owned by a single
//! [`Context`] and referred to through small `Copy` handles. Handles are generational: once an
//! entity is erased its handle is invalidated for good and never aliases a newer entity. Indexing
//! a [`Context`] with an invalidated handle panics, the `get_*` accessors return `None` instead.

// Contains impl's for blocks.
mod block;
// Contains impl's for operations.
mod operation;
#[cfg(test)]
mod test;

use crate::{use_list::Use, validator, Location, Settings, UseId, Value, ValueId};
use generational_arena::{Arena, Index as ArenaIndex};

pub use block::Block;
pub use operation::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(pub(crate) ArenaIndex);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub(crate) ArenaIndex);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(pub(crate) ArenaIndex);

/// A named, ordered list of blocks. The first block is the entry block.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    pub(crate) blocks: Vec<BlockId>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Returns the entry block, or `None` if the function has no body (yet).
    pub fn front(&self) -> Option<BlockId> {
        self.blocks.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Owner of one independent IR instance.
#[derive(Debug)]
pub struct Context {
    settings: Settings,
    pub(crate) values: Arena<Value>,
    pub(crate) edges: Arena<Use>,
    pub(crate) ops: Arena<Operation>,
    pub(crate) blocks: Arena<Block>,
    pub(crate) functions: Arena<Function>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            values: Arena::new(),
            edges: Arena::new(),
            ops: Arena::new(),
            blocks: Arena::new(),
            functions: Arena::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the "unknown" location of this context.
    pub fn unknown_loc(&self) -> Location {
        Location::Unknown
    }

    pub fn create_function(&mut self, name: impl Into<String>) -> FunctionId {
        FunctionId(self.functions.insert(Function {
            name: name.into(),
            blocks: Vec::new(),
        }))
    }

    /// Returns the entry block of `function`, or `None` if it has no blocks.
    pub fn entry_block(&self, function: FunctionId) -> Option<BlockId> {
        self[function].front()
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .map(|(idx, function)| (FunctionId(idx), function))
    }

    pub fn get_function(&self, function: FunctionId) -> Option<&Function> {
        self.functions.get(function.0)
    }

    pub fn get_value(&self, value: ValueId) -> Option<&Value> {
        self.values.get(value.0)
    }

    pub fn get_use(&self, edge: UseId) -> Option<&Use> {
        self.edges.get(edge.0)
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// Panics if [`Settings::verify_use_lists`] is set and the def-use lists are inconsistent.
    pub(crate) fn verify_if_enabled(&self) {
        if !self.settings.verify_use_lists {
            return;
        }
        if let Err(reason) = validator::validate_use_lists(self) {
            panic!("def-use lists are corrupted: {reason:?}");
        }
    }
}

impl std::ops::Index<FunctionId> for Context {
    type Output = Function;

    fn index(&self, index: FunctionId) -> &Self::Output {
        &self.functions[index.0]
    }
}

impl std::ops::Index<ValueId> for Context {
    type Output = Value;

    fn index(&self, index: ValueId) -> &Self::Output {
        &self.values[index.0]
    }
}

impl std::ops::Index<UseId> for Context {
    type Output = Use;

    fn index(&self, index: UseId) -> &Self::Output {
        &self.edges[index.0]
    }
}
