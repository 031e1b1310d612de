pub mod convert;
pub mod serialize;
pub mod types;

pub use convert::*;
pub use serialize::*;
pub use types::*;
