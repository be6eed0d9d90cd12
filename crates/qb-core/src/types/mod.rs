//! Core data types: symbol registry, quote records, sort enums and the
//! acquisition status.

pub mod enums;
pub mod quote;
pub mod status;
pub mod symbol;

pub use enums::*;
pub use quote::*;
pub use status::*;
pub use symbol::*;
