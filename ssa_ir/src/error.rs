use crate::{OpId, ValueId};
use thiserror::Error;

/// Errors returned when the IR refuses to destroy an entity that is still referenced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("cannot erase operation `{name}`: result #{index} still has {uses} use(s)")]
    ResultStillUsed {
        name: String,
        index: usize,
        uses: usize,
    },
    #[error("cannot erase value {0:?}: it still has {1} use(s)")]
    ValueStillUsed(ValueId, usize),
    #[error("cannot erase value {0:?}: it is still owned by a block or operation")]
    ValueAttached(ValueId),
    #[error("cannot erase block: value {value:?} is used by operation {user:?} outside of it")]
    UsedOutsideBlock { value: ValueId, user: OpId },
}
