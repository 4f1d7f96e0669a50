use super::{BlockId, Context, FunctionId, OpId};
use crate::{IrError, Value, ValueId, ValueKind};
use log::debug;

/// A list of operations with positional arguments.
///
/// A block starts out detached. It becomes part of a function through [`Context::append_block`],
/// and its arguments only resolve to that function from then on.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub(crate) arguments: Vec<ValueId>,
    pub(crate) operations: Vec<OpId>,
    pub(crate) function: Option<FunctionId>,
}

impl Block {
    pub fn arguments(&self) -> &[ValueId] {
        &self.arguments
    }

    pub fn argument(&self, index: usize) -> Option<ValueId> {
        self.arguments.get(index).copied()
    }

    pub fn num_arguments(&self) -> usize {
        self.arguments.len()
    }

    pub fn operations(&self) -> &[OpId] {
        &self.operations
    }

    pub fn function(&self) -> Option<FunctionId> {
        self.function
    }
}

impl Context {
    /// Creates a new detached block without arguments.
    pub fn create_block(&mut self) -> BlockId {
        BlockId(self.blocks.insert(Block::default()))
    }

    pub fn get_block(&self, block: BlockId) -> Option<&Block> {
        self.blocks.get(block.0)
    }

    /// Returns the function `block` is part of, or `None` if it is detached.
    pub fn block_function(&self, block: BlockId) -> Option<FunctionId> {
        self[block].function
    }

    /// Appends a new argument to `block` and returns it.
    pub fn add_argument(&mut self, block: BlockId) -> ValueId {
        let index = self[block].arguments.len();
        let value = ValueId(self.values.insert(Value::new(ValueKind::BlockArgument {
            owner: Some(block),
            index,
        })));
        self.blocks[block.0].arguments.push(value);
        value
    }

    /// Removes the argument at `index` from `block` and returns it. The argument stays alive, but
    /// detached: it no longer has an owning block, and the arguments following it move one
    /// position to the front. Panics if `index` is out of bounds.
    pub fn detach_argument(&mut self, block: BlockId, index: usize) -> ValueId {
        let arguments = &mut self.blocks[block.0].arguments;
        if index >= arguments.len() {
            panic!("attempt to detach nonexistent block argument #{index}");
        }
        let detached = arguments.remove(index);
        let shifted = arguments[index..].to_vec();

        self.values[detached.0].kind = ValueKind::BlockArgument { owner: None, index };
        for (offset, value) in shifted.into_iter().enumerate() {
            self.values[value.0].kind = ValueKind::BlockArgument {
                owner: Some(block),
                index: index + offset,
            };
        }
        detached
    }

    /// Appends `block` to the body of `function`. The first block appended becomes the entry
    /// block. Panics if the block already belongs to a function.
    pub fn append_block(&mut self, function: FunctionId, block: BlockId) {
        if self[block].function.is_some() {
            panic!("attempt to append block that already belongs to a function");
        }
        self.functions[function.0].blocks.push(block);
        self.blocks[block.0].function = Some(function);
    }

    /// Removes `block` from its function, if any. The block and everything in it stays alive.
    pub fn detach_block(&mut self, block: BlockId) {
        if let Some(function) = self.blocks[block.0].function.take() {
            self.functions[function.0].blocks.retain(|&b| b != block);
        }
    }

    /// Erases `block` together with its arguments and operations.
    ///
    /// Uses between values and operations of the block itself are dropped. If any argument or
    /// result is still used by an operation outside the block, nothing is changed and an error is
    /// returned.
    pub fn erase_block(&mut self, block: BlockId) -> Result<(), IrError> {
        let defined = self[block]
            .arguments
            .iter()
            .copied()
            .chain(
                self[block]
                    .operations
                    .iter()
                    .flat_map(|&op| self[op].results.iter().copied()),
            );
        for value in defined {
            if let Some(user) = self.users(value).find(|&user| self[user].block != Some(block)) {
                return Err(IrError::UsedOutsideBlock { value, user });
            }
        }

        self.detach_block(block);
        let removed = self.blocks.remove(block.0).unwrap();
        debug!(
            "erasing {block:?} with {} argument(s) and {} operation(s)",
            removed.arguments.len(),
            removed.operations.len()
        );
        for &op in &removed.operations {
            self.drop_all_references(op);
        }
        for op in removed.operations {
            self.remove_dropped_op(op);
        }
        for argument in removed.arguments {
            self.values.remove(argument.0);
        }
        self.verify_if_enabled();
        Ok(())
    }
}

impl std::ops::Index<BlockId> for Context {
    type Output = Block;

    fn index(&self, index: BlockId) -> &Self::Output {
        &self.blocks[index.0]
    }
}
