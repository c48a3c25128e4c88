#![allow(clippy::upper_case_acronyms)]

use std::os::raw::c_int;

/// Direct solve methods selectable through the C interface
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectSolveMethodsFFI {
    AUTO = 0,
    LDL = 1,
    DENSE = 2,
    FAER = 3,
    MKL = 4,
    PANUA = 5,
}

impl DirectSolveMethodsFFI {
    /// the `direct_solve_method` setting value for this option
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectSolveMethodsFFI::AUTO => "auto",
            DirectSolveMethodsFFI::LDL => "ldl",
            DirectSolveMethodsFFI::DENSE => "dense",
            DirectSolveMethodsFFI::FAER => "faer",
            DirectSolveMethodsFFI::MKL => "mkl",
            DirectSolveMethodsFFI::PANUA => "panua",
        }
    }
}

// C enums cross the boundary as plain ints, since an out of
// range discriminant in a Rust enum is undefined behaviour
impl TryFrom<c_int> for DirectSolveMethodsFFI {
    type Error = c_int;

    fn try_from(value: c_int) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DirectSolveMethodsFFI::AUTO),
            1 => Ok(DirectSolveMethodsFFI::LDL),
            2 => Ok(DirectSolveMethodsFFI::DENSE),
            3 => Ok(DirectSolveMethodsFFI::FAER),
            4 => Ok(DirectSolveMethodsFFI::MKL),
            5 => Ok(DirectSolveMethodsFFI::PANUA),
            _ => Err(value),
        }
    }
}

impl From<DirectSolveMethodsFFI> for String {
    fn from(value: DirectSolveMethodsFFI) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<&str> for DirectSolveMethodsFFI {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "auto" => Ok(DirectSolveMethodsFFI::AUTO),
            "ldl" => Ok(DirectSolveMethodsFFI::LDL),
            "dense" => Ok(DirectSolveMethodsFFI::DENSE),
            "faer" => Ok(DirectSolveMethodsFFI::FAER),
            "mkl" => Ok(DirectSolveMethodsFFI::MKL),
            "panua" => Ok(DirectSolveMethodsFFI::PANUA),
            _ => Err(()),
        }
    }
}
