#![allow(non_snake_case)]
use crate::algebra::*;
use crate::solver::SystemSettings;

/// A concrete backend choice, plus a fill-reducing ordering if one
/// was computed while choosing
pub(crate) struct AutoSelection {
    pub method: &'static str,
    pub perm: Option<Vec<usize>>,
}

// Resolves the "auto" solve method for the lower triangle `L` of a
// symmetric matrix.  Backends that only support f64 are never
// selected for other types.
pub(crate) fn auto_select<T>(L: &CscMatrix<T>, settings: &SystemSettings<T>) -> AutoSelection
where
    T: FloatT,
{
    let is_f64 = std::any::TypeId::of::<T>() == std::any::TypeId::of::<f64>();

    #[cfg(feature = "pardiso-mkl")]
    if is_f64 && pardiso_wrapper::MKLPardisoSolver::is_available() {
        return AutoSelection {
            method: "mkl",
            perm: None,
        };
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "faer-sparse")] {
            if is_f64 && L.n > 0 {
                return ldl_or_faer(L, settings);
            }
        } else {
            let _ = (is_f64, L, settings);
        }
    }

    AutoSelection {
        method: "ldl",
        perm: None,
    }
}

#[cfg(feature = "faer-sparse")]
fn ldl_or_faer<T>(L: &CscMatrix<T>, settings: &SystemSettings<T>) -> AutoSelection
where
    T: FloatT,
{
    // Compute an AMD ordering and use it to decide between the
    // simplicial LDL solver and faer.  The switch rule is the same as
    // the one internal to faer.  The ordering is passed on to the LDL
    // solver so that it is not computed twice.

    // AMD only looks at the pattern of L + Lᵀ, so one triangle is enough
    let Ok((perm, _iperm, info)) = crate::ldl::amd_order(L, settings.amd_dense_scale) else {
        // let the LDL solver report the ordering failure
        return AutoSelection {
            method: "ldl",
            perm: None,
        };
    };

    // estimate flops and then use the faer switching rule
    let flops = (info.n_div + info.n_mult_subs_ldl) as f64;
    let Lnnz = info.lnz as f64;

    // threshold for switching to faer
    let thresh = 40.0;

    if Lnnz > 0. && (flops / Lnnz) >= thresh {
        AutoSelection {
            method: "faer",
            perm: None,
        }
    } else {
        AutoSelection {
            method: "ldl",
            perm: Some(perm),
        }
    }
}
