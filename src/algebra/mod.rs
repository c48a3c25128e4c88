//! Sparse matrix types and the small amount of vector math needed
//! to assemble, compress and check linear systems.

mod csc;
mod error_types;
mod floats;
mod matrix_types;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use matrix_types::*;
pub use vecmath::*;

#[cfg(test)]
mod tests;
