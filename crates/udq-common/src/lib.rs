pub mod error;
pub mod scalar;
pub mod set;

pub use error::*;
pub use scalar::*;
pub use set::*;
