//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellError,
    CellView,
    Content,

    // Error types
    Error,
    Position,
    Result,

    // Main types
    Sheet,
    Size,
    Value,
};
