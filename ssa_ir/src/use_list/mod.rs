//! Def-use lists.
//!
//! Every [`Value`](crate::Value) carries a [`UseList`]: a doubly-linked list of [`Use`] edges, one
//! for each operand slot that currently reads the value. The nodes live in the use arena of the
//! [`Context`] and are linked through [`UseId`]s rather than pointers, so splicing an edge in or
//! out only touches the edge itself and its two neighbours.
//!
//! Edges are always linked in at the front of a list. Iteration therefore yields the most
//! recently linked edge first. Callers must not rely on the order across mutations.
//!
//! Iterating a list while mutating it is not supported, with one exception: repeatedly taking the
//! *first* edge and moving it elsewhere (or dropping it). Both bulk operations,
//! [`Context::replace_all_uses_with`] and [`Context::drop_all_uses`], are written that way.


use crate::{Context, OpId, ValueId};
use generational_arena::Index as ArenaIndex;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UseId(pub(crate) ArenaIndex);

/// A directed edge from an operand slot of an operation to the value it reads.
#[derive(Debug, Clone)]
pub struct Use {
    pub(crate) value: ValueId,
    user: OpId,
    operand_number: usize,
    pub(crate) prev: Option<UseId>,
    pub(crate) next: Option<UseId>,
}

impl Use {
    /// The value held by the operand slot. After [`Context::drop_use`] this still returns the
    /// value the edge was last linked to.
    pub fn value(&self) -> ValueId {
        self.value
    }

    /// The operation owning the operand slot.
    pub fn user(&self) -> OpId {
        self.user
    }

    pub fn operand_number(&self) -> usize {
        self.operand_number
    }
}

/// Head of the def-use list of a value.
#[derive(Debug, Clone, Default)]
pub(crate) struct UseList {
    first: Option<UseId>,
}

impl UseList {
    pub(crate) fn first(&self) -> Option<UseId> {
        self.first
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Forward iterator over the edges of a def-use list. See the [module docs](self) for what may be
/// mutated while iterating.
pub struct Uses<'a> {
    ctx: &'a Context,
    next: Option<UseId>,
}

impl<'a> Iterator for Uses<'a> {
    type Item = UseId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.ctx[current].next;
        Some(current)
    }
}

impl Context {
    /// Returns `true` if nothing reads `value`.
    pub fn use_empty(&self, value: ValueId) -> bool {
        self[value].uses.is_empty()
    }

    pub fn uses(&self, value: ValueId) -> Uses<'_> {
        Uses {
            ctx: self,
            next: self[value].uses.first(),
        }
    }

    /// Counts the uses of `value`. Linear in the number of uses, prefer [`use_empty`] or
    /// [`has_one_use`] where possible.
    ///
    /// [`use_empty`]: Context::use_empty
    /// [`has_one_use`]: Context::has_one_use
    pub fn num_uses(&self, value: ValueId) -> usize {
        self.uses(value).count()
    }

    pub fn has_one_use(&self, value: ValueId) -> bool {
        let mut uses = self.uses(value);
        uses.next().is_some() && uses.next().is_none()
    }

    /// Returns the operations reading `value`, once per use. An operation reading the value
    /// through multiple operands shows up multiple times.
    pub fn users(&self, value: ValueId) -> impl Iterator<Item = OpId> + '_ {
        self.uses(value).map(|edge| self[edge].user)
    }

    /// Returns `true` if `edge` is currently part of the def-use list of its value.
    pub fn is_use_linked(&self, edge: UseId) -> bool {
        let node = &self[edge];
        node.prev.is_some()
            || self
                .values
                .get(node.value.0)
                .map_or(false, |value| value.uses.first() == Some(edge))
    }

    /// Moves `edge` from the def-use list of its current value to the one of `value`. The operand
    /// slot owning the edge reads `value` from now on. Also relinks an edge that was dropped.
    pub fn set_use(&mut self, edge: UseId, value: ValueId) {
        if !self.values.contains(value.0) {
            panic!("attempt to use an erased value");
        }
        self.unlink(edge);
        self.edges[edge.0].value = value;
        self.link(edge);
    }

    /// Unlinks `edge` from the def-use list of its value without changing the operand slot. The
    /// slot is expected to be discarded shortly after. Dropping an unlinked edge is a no-op.
    pub fn drop_use(&mut self, edge: UseId) {
        self.unlink(edge);
    }

    /// Makes everything that reads `value` read `replacement` instead. When this returns, `value`
    /// has no uses left and `replacement` gained exactly as many as `value` had.
    ///
    /// Panics if `value` and `replacement` are the same value.
    pub fn replace_all_uses_with(&mut self, value: ValueId, replacement: ValueId) {
        assert_ne!(
            value, replacement,
            "cannot replace all uses of a value with itself"
        );
        if !self.values.contains(replacement.0) {
            panic!("attempt to replace uses with an erased value");
        }
        let mut moved = 0usize;
        // `set_use` only splices the edge, so it can never link a new use of `value`.
        while let Some(first) = self[value].uses.first() {
            self.set_use(first, replacement);
            moved += 1;
        }
        trace!("replaced {moved} use(s) of {value:?} with {replacement:?}");
        self.verify_if_enabled();
    }

    /// Drops every use of `value`. The operand slots that read it are left as they are, their
    /// owners are expected to be erased.
    pub fn drop_all_uses(&mut self, value: ValueId) {
        let mut dropped = 0usize;
        while let Some(first) = self[value].uses.first() {
            self.drop_use(first);
            dropped += 1;
        }
        trace!("dropped {dropped} use(s) of {value:?}");
        self.verify_if_enabled();
    }

    pub(crate) fn link_new_use(
        &mut self,
        value: ValueId,
        user: OpId,
        operand_number: usize,
    ) -> UseId {
        if !self.values.contains(value.0) {
            panic!("attempt to use an erased value");
        }
        let edge = UseId(self.edges.insert(Use {
            value,
            user,
            operand_number,
            prev: None,
            next: None,
        }));
        self.link(edge);
        edge
    }

    // Assumes `edge` is unlinked.
    fn link(&mut self, edge: UseId) {
        let value = self.edges[edge.0].value;
        let old_first = self.values[value.0].uses.first.replace(edge);
        let node = &mut self.edges[edge.0];
        node.prev = None;
        node.next = old_first;
        if let Some(old_first) = old_first {
            self.edges[old_first.0].prev = Some(edge);
        }
    }

    fn unlink(&mut self, edge: UseId) {
        if !self.is_use_linked(edge) {
            return;
        }
        let node = &self.edges[edge.0];
        let (value, prev, next) = (node.value, node.prev, node.next);
        match prev {
            Some(prev) => self.edges[prev.0].next = next,
            None => self.values[value.0].uses.first = next,
        }
        if let Some(next) = next {
            self.edges[next.0].prev = prev;
        }
        let node = &mut self.edges[edge.0];
        node.prev = None;
        node.next = None;
    }
}
