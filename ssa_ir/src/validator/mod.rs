
use crate::{Context, OpId, UseId, ValueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidityReason {
    /// If the `prev`/`next` links of a def-use list don't mirror each other, point to an erased
    /// edge, or form a cycle.
    BrokenLink,
    /// If a def-use list contains an edge whose value is another value.
    ForeignUse,
    /// If the number of edges reachable through def-use lists doesn't match the number of edges
    /// that consider themselves linked.
    CountMismatch,
    /// If an operand edge doesn't record the operation and position it's stored at.
    MisplacedOperand,
    /// If an operand of a live operation isn't linked into any def-use list.
    UnlinkedOperand,
    /// If an operand of a live operation refers to an erased value.
    DanglingValue,
}

/// Validates the def-use lists of all values in `ctx`. Returns `Ok(())` if every list is well
/// formed, or `Err(_)` with the [`InvalidityReason`] of the first detected invalidity.
///
/// Edges that were dropped but still belong to a live operation are fine here, this only checks
/// the lists themselves. Use [`validate_operands`] to also check the operations.
pub fn validate_use_lists(ctx: &Context) -> Result<(), InvalidityReason> {
    let mut reachable = 0;
    for (idx, value) in ctx.values.iter() {
        let value_id = ValueId(idx);
        let mut prev = None;
        let mut cursor = value.uses.first();
        while let Some(edge) = cursor {
            let Some(node) = ctx.edges.get(edge.0) else {
                return Err(InvalidityReason::BrokenLink);
            };
            if node.prev != prev {
                return Err(InvalidityReason::BrokenLink);
            }
            if node.value() != value_id {
                return Err(InvalidityReason::ForeignUse);
            }
            reachable += 1;
            if reachable > ctx.edges.len() {
                return Err(InvalidityReason::BrokenLink);
            }
            prev = cursor;
            cursor = node.next;
        }
    }

    let linked = ctx
        .edges
        .iter()
        .filter(|&(idx, _)| ctx.is_use_linked(UseId(idx)))
        .count();
    if linked != reachable {
        return Err(InvalidityReason::CountMismatch);
    }
    Ok(())
}

/// Validates the def-use lists like [`validate_use_lists`], and additionally requires every
/// operand of every live operation to be linked to a live value. This does not hold while
/// operations are being torn down.
pub fn validate_operands(ctx: &Context) -> Result<(), InvalidityReason> {
    validate_use_lists(ctx)?;
    for (idx, op) in ctx.ops.iter() {
        for (operand_number, &edge) in op.operands().iter().enumerate() {
            let Some(node) = ctx.edges.get(edge.0) else {
                return Err(InvalidityReason::BrokenLink);
            };
            if node.user() != OpId(idx) || node.operand_number() != operand_number {
                return Err(InvalidityReason::MisplacedOperand);
            }
            if !ctx.values.contains(node.value().0) {
                return Err(InvalidityReason::DanglingValue);
            }
            if !ctx.is_use_linked(edge) {
                return Err(InvalidityReason::UnlinkedOperand);
            }
        }
    }
    Ok(())
}
