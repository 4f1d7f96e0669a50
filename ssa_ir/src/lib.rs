mod context;
mod error;
mod location;
mod settings;
mod use_list;
mod value;

pub mod validator;

pub use context::{Block, BlockId, Context, Function, FunctionId, OpId, Operation};
pub use error::IrError;
pub use location::Location;
pub use settings::Settings;
pub use use_list::{Use, UseId, Uses};
pub use value::{Value, ValueId, ValueKind};
