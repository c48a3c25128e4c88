use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Settings for a [`LinearSystem`](crate::solver::LinearSystem)
///
/// Construct through [`SystemSettingsBuilder`](SystemSettingsBuilder), which
/// validates string valued fields when `build()` is called:
///
/// ```
/// use femsolve::solver::SystemSettingsBuilder;
///
/// let settings = SystemSettingsBuilder::<f64>::default()
///     .direct_solve_method("ldl".to_string())
///     .verbose(true)
///     .build()
///     .unwrap();
/// assert_eq!(settings.direct_solve_method, "ldl");
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemSettings<T: FloatT> {
    ///direct linear solver method ("auto", "ldl", "dense", "faer", "mkl" or "panua")
    #[builder(default = r#""auto".to_string()"#)]
    pub direct_solve_method: String,

    ///maximum threads for multithreaded solvers.
    ///choosing 0 lets the solver choose for itself
    #[builder(default = "0")]
    pub max_threads: u32,

    ///print a summary of each solve
    #[builder(default = "false")]
    pub verbose: bool,

    ///scaling of the AMD dense row threshold
    #[builder(default = "1.5")]
    pub amd_dense_scale: f64,

    ///factorization pivots must be strictly larger than this value
    #[builder(default = "T::zero()")]
    pub pivot_tol: T,

    ///report the residual norm ‖Ax - b‖∞ after each solve
    #[builder(default = "true")]
    pub check_residual: bool,
}

impl<T> Default for SystemSettings<T>
where
    T: FloatT,
{
    fn default() -> SystemSettings<T> {
        SystemSettingsBuilder::<T>::default().build().unwrap()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
    /// a subsolver error of some kind (e.g. not found, no license)
    #[error("Problem with {solver} solver ({problem})")]
    LinearSolverProblem {
        solver: &'static str,
        problem: &'static str,
    },
    #[cfg(feature = "serde")]
    #[error("Invalid JSON settings: {0}")]
    Json(String),
}

impl<T> SystemSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.  This only ensures that fields specified
    /// by strings contain valid options and that scalar fields are usable.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_direct_solve_method(&self.direct_solve_method)?;

        if !(self.amd_dense_scale > 0.) {
            return Err(SettingsError::BadFieldValue("amd_dense_scale"));
        }
        if !(self.pivot_tol >= T::zero()) {
            return Err(SettingsError::BadFieldValue("pivot_tol"));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<T> SystemSettings<T>
where
    T: FloatT + Serialize + DeserializeOwned,
{
    /// Parse and validate settings from a JSON object.  Missing fields
    /// take their default values.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a JSON string
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|e| SettingsError::Json(e.to_string()))
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SystemSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SystemSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> SystemSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that the specified string and scalar fields are valid
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref direct_solve_method) = self.direct_solve_method {
            validate_direct_solve_method(direct_solve_method)?;
        }
        if let Some(scale) = self.amd_dense_scale {
            if !(scale > 0.) {
                return Err(SettingsError::BadFieldValue("amd_dense_scale"));
            }
        }
        if let Some(tol) = self.pivot_tol {
            if !(tol >= T::zero()) {
                return Err(SettingsError::BadFieldValue("pivot_tol"));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

pub(crate) fn validate_direct_solve_method(direct_solve_method: &str) -> Result<(), SettingsError> {
    match direct_solve_method {
        "auto" => Ok(()),
        "ldl" => Ok(()),
        #[cfg(feature = "faer-sparse")]
        "dense" | "faer" => Ok(()),
        #[cfg(feature = "pardiso-mkl")]
        "mkl" => {
            if pardiso_wrapper::MKLPardisoSolver::is_available() {
                Ok(())
            } else {
                Err(SettingsError::LinearSolverProblem {
                    solver: "mkl",
                    problem: "not available",
                })
            }
        }
        #[cfg(feature = "pardiso-panua")]
        "panua" => {
            if pardiso_wrapper::PanuaPardisoSolver::is_available() {
                Ok(())
            } else {
                Err(SettingsError::LinearSolverProblem {
                    solver: "panua",
                    problem: "not available",
                })
            }
        }
        _ => Err(SettingsError::BadFieldValue("direct_solve_method")),
    }
}
