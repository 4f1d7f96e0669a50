
use crate::{use_list::UseList, BlockId, Context, FunctionId, IrError, Location, OpId};
use generational_arena::Index as ArenaIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(pub(crate) ArenaIndex);

/// What produces a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Argument `index` of a block. `owner` is `None` once the argument was detached from its
    /// block, see [`Context::detach_argument`].
    BlockArgument {
        owner: Option<BlockId>,
        index: usize,
    },
    /// Result `index` of an operation.
    OpResult { owner: OpId, index: usize },
}

/// Something that can be read by operands. The producer of a value is fixed at creation, only a
/// block argument's position may change afterwards.
#[derive(Debug, Clone)]
pub struct Value {
    pub(crate) kind: ValueKind,
    pub(crate) uses: UseList,
}

impl Value {
    pub(crate) fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            uses: UseList::default(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_block_argument(&self) -> bool {
        matches!(self.kind, ValueKind::BlockArgument { .. })
    }

    pub fn is_op_result(&self) -> bool {
        matches!(self.kind, ValueKind::OpResult { .. })
    }
}

impl Context {
    /// Returns the operation producing `value`, or `None` for block arguments.
    pub fn defining_op(&self, value: ValueId) -> Option<OpId> {
        match self[value].kind {
            ValueKind::BlockArgument { .. } => None,
            ValueKind::OpResult { owner, .. } => Some(owner),
        }
    }

    /// Returns the function `value` is defined in.
    ///
    /// This is `None` whenever the chain up to a function is broken: for a detached block
    /// argument, for an argument of a block that isn't part of a function, and for a result of an
    /// operation that isn't (transitively) part of a function.
    pub fn value_function(&self, value: ValueId) -> Option<FunctionId> {
        match self[value].kind {
            ValueKind::BlockArgument { owner, .. } => {
                owner.and_then(|block| self.block_function(block))
            }
            ValueKind::OpResult { owner, .. } => self.op_function(owner),
        }
    }

    /// Returns the location of the operation defining `value`, or the unknown location if there is
    /// no such operation.
    pub fn value_loc(&self, value: ValueId) -> Location {
        match self.defining_op(value) {
            Some(op) => self[op].loc().clone(),
            None => self.unknown_loc(),
        }
    }

    /// Returns `true` if `value` is an argument of the entry block of a function.
    pub fn is_function_argument(&self, value: ValueId) -> bool {
        let ValueKind::BlockArgument { owner: Some(block), .. } = self[value].kind else {
            return false;
        };
        self.block_function(block)
            .and_then(|function| self.entry_block(function))
            == Some(block)
    }

    /// Erases a detached block argument that is no longer used.
    pub fn erase_value(&mut self, value: ValueId) -> Result<(), IrError> {
        if !matches!(
            self[value].kind,
            ValueKind::BlockArgument { owner: None, .. }
        ) {
            return Err(IrError::ValueAttached(value));
        }
        if !self.use_empty(value) {
            return Err(IrError::ValueStillUsed(value, self.num_uses(value)));
        }
        self.values.remove(value.0);
        Ok(())
    }
}
