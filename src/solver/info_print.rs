use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use std::io::Write;
use std::time::Duration;

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

impl<T> SolveInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_header(
        &self,
        out: &mut PrintTarget,
        settings: &SystemSettings<T>,
        method: &str,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        writeln!(out, "Solution of the system of equations")?;
        writeln!(out, "  dimension   = {} x {}", self.dim, self.dim)?;
        writeln!(out, "  nnz         = {}", self.nnz)?;
        write!(out, "  linear algebra: direct / {}, ", method)?;
        write!(out, "precision: {} bit", _get_precision_string::<T>())?;
        if settings.max_threads > 0 {
            write!(out, ", max threads = {}", settings.max_threads)?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub(crate) fn print_footer(
        &self,
        out: &mut PrintTarget,
        settings: &SystemSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        writeln!(out, "-------------------------------------------------------")?;
        writeln!(out, "Terminated with status = {}", self.status)?;

        if self.linsolver.nnzL > 0 {
            writeln!(out, "  nnz(L)       = {}", self.linsolver.nnzL)?;
        }
        if let Some(res) = self.residual_inf {
            writeln!(out, "  residual     = {}", expformat!("{:.2e}", res))?;
        }
        writeln!(
            out,
            "  total time   = {:?}",
            Duration::from_secs_f64(self.total_time)
        )?;
        out.flush()?;
        Ok(())
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into
// one that 1) always has a sign after the exponent,
// and 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e-7)), "1.50e-07");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e7)), "1.50e+07");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e-17)), "1.50e-17");
    assert_eq!(_exp_str_reformat("12".to_string()), "12");
}
