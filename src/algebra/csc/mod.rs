#![allow(non_snake_case)]

mod core;
pub use self::core::*;
mod assembly;
pub use assembly::*;
mod matrix_math;
pub use matrix_math::*;
