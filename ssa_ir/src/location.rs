use std::{fmt, rc::Rc};

/// Source location attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Sentinel for values and operations whose origin isn't known. Obtain it through
    /// [`Context::unknown_loc`](crate::Context::unknown_loc).
    Unknown,
    FileLineCol {
        file: Rc<str>,
        line: u32,
        column: u32,
    },
    Name(Rc<str>),
}

impl Location {
    pub fn file_line_col(file: impl Into<Rc<str>>, line: u32, column: u32) -> Self {
        Self::FileLineCol {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn name(name: impl Into<Rc<str>>) -> Self {
        Self::Name(name.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => f.write_str("loc(unknown)"),
            Location::FileLineCol { file, line, column } => write!(f, "{file}:{line}:{column}"),
            Location::Name(name) => write!(f, "{name:?}"),
        }
    }
}
