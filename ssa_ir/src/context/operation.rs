use super::{BlockId, Context, FunctionId, OpId};
use crate::{IrError, Location, UseId, Value, ValueId, ValueKind};
use log::debug;

#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    pub(crate) operands: Vec<UseId>,
    pub(crate) results: Vec<ValueId>,
    loc: Location,
    pub(crate) block: Option<BlockId>,
}

impl Operation {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The use edges of this operation, one per operand slot, in operand order.
    pub fn operands(&self) -> &[UseId] {
        &self.operands
    }

    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    pub fn results(&self) -> &[ValueId] {
        &self.results
    }

    pub fn num_results(&self) -> usize {
        self.results.len()
    }

    pub fn loc(&self) -> &Location {
        &self.loc
    }

    /// Returns the block this operation is part of, or `None` if it is detached.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }
}

impl Context {
    /// Creates a new detached operation reading `operands` and producing `num_results` fresh
    /// values. Every operand gets its own use edge, also if the same value is passed twice.
    pub fn create_op(
        &mut self,
        name: impl Into<String>,
        operands: &[ValueId],
        num_results: usize,
        loc: Location,
    ) -> OpId {
        let op = OpId(self.ops.insert(Operation {
            name: name.into(),
            operands: Vec::with_capacity(operands.len()),
            results: Vec::with_capacity(num_results),
            loc,
            block: None,
        }));
        for (operand_number, &value) in operands.iter().enumerate() {
            let edge = self.link_new_use(value, op, operand_number);
            self.ops[op.0].operands.push(edge);
        }
        for index in 0..num_results {
            let result = ValueId(
                self.values
                    .insert(Value::new(ValueKind::OpResult { owner: op, index })),
            );
            self.ops[op.0].results.push(result);
        }
        op
    }

    pub fn get_op(&self, op: OpId) -> Option<&Operation> {
        self.ops.get(op.0)
    }

    /// Appends `op` to the end of `block`. Panics if the operation already is in a block.
    pub fn append_op(&mut self, block: BlockId, op: OpId) {
        if self[op].block.is_some() {
            panic!("attempt to append operation that already belongs to a block");
        }
        self.blocks[block.0].operations.push(op);
        self.ops[op.0].block = Some(block);
    }

    /// Returns result `index` of `op`. Panics if `index` is out of bounds.
    pub fn result(&self, op: OpId, index: usize) -> ValueId {
        self[op].results[index]
    }

    /// Returns the value currently held by operand slot `index` of `op`. Panics if `index` is out
    /// of bounds.
    pub fn operand(&self, op: OpId, index: usize) -> ValueId {
        self[self[op].operands[index]].value()
    }

    /// Rebinds operand slot `index` of `op` to `value`.
    pub fn set_operand(&mut self, op: OpId, index: usize, value: ValueId) {
        let edge = self[op].operands[index];
        self.set_use(edge, value);
    }

    /// Returns the function `op` is part of, or `None` if it or its block is detached.
    pub fn op_function(&self, op: OpId) -> Option<FunctionId> {
        self[op].block.and_then(|block| self.block_function(block))
    }

    /// Drops the use edges of all operands of `op`, leaving the operand slots themselves as they
    /// are. Used when tearing down an operation.
    pub fn drop_all_references(&mut self, op: OpId) {
        for i in 0..self[op].operands.len() {
            let edge = self[op].operands[i];
            self.drop_use(edge);
        }
    }

    /// Erases `op`, its operands and its results. Fails if any of its results is still used.
    pub fn erase_op(&mut self, op: OpId) -> Result<(), IrError> {
        for (index, &result) in self[op].results.iter().enumerate() {
            if !self.use_empty(result) {
                return Err(IrError::ResultStillUsed {
                    name: self[op].name.clone(),
                    index,
                    uses: self.num_uses(result),
                });
            }
        }

        if let Some(block) = self[op].block {
            self.blocks[block.0].operations.retain(|&o| o != op);
        }
        self.drop_all_references(op);
        self.remove_dropped_op(op);
        self.verify_if_enabled();
        Ok(())
    }

    /// Frees the storage of an operation whose operand edges are dropped and whose results have
    /// no uses left.
    pub(crate) fn remove_dropped_op(&mut self, op: OpId) {
        let removed = self.ops.remove(op.0).unwrap();
        debug!("erased operation `{}` ({op:?})", removed.name);
        for edge in removed.operands {
            self.edges.remove(edge.0);
        }
        for result in removed.results {
            self.values.remove(result.0);
        }
    }
}

impl std::ops::Index<OpId> for Context {
    type Output = Operation;

    fn index(&self, index: OpId) -> &Self::Output {
        &self.ops[index.0]
    }
}
