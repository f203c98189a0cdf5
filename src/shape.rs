//! Reconciles SA, CT and p array shapes into one canonical layout.
//!
//! Internally the vertical axis is always axis 0 and each column is one
//! profile. A single profile handed over as a row (`1×N`) is transposed on
//! the way in and the results are transposed back with [`Normalized::restore`].

use ndarray::{Array2, ArrayView2};

use crate::error::{AppError, Result};

/// SA, CT and p broadcast to a common `levels × profiles` shape.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub sa: Array2<f64>,
    pub ct: Array2<f64>,
    pub p: Array2<f64>,
    transposed: bool,
}

impl Normalized {
    pub fn levels(&self) -> usize {
        self.sa.nrows()
    }

    pub fn profiles(&self) -> usize {
        self.sa.ncols()
    }

    pub fn transposed(&self) -> bool {
        self.transposed
    }

    /// Puts a `levels × profiles` result back into the caller's orientation.
    pub fn restore<T: Clone>(&self, field: Array2<T>) -> Array2<T> {
        if self.transposed {
            field.reversed_axes()
        } else {
            field
        }
    }
}

/// Broadcasts `p` against SA/CT and normalises orientation.
///
/// `p` may match SA exactly, be a row (`1×N`, repeated down the rows), a
/// column (`M×1`, repeated across the columns) or a scalar (`1×1`).
pub fn normalize(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
) -> Result<Normalized> {
    let shape = sa.dim();
    if ct.dim() != shape {
        return Err(AppError::DimensionMismatch {
            what: "CT",
            expected: shape,
            found: ct.dim(),
        });
    }
    let p = p.broadcast(shape).ok_or(AppError::DimensionMismatch {
        what: "p",
        expected: shape,
        found: p.dim(),
    })?;

    let transposed = shape.0 == 1 && shape.1 > 1;
    if transposed {
        log::trace!("single row profile of {} levels, transposing", shape.1);
        Ok(Normalized {
            sa: sa.t().to_owned(),
            ct: ct.t().to_owned(),
            p: p.t().to_owned(),
            transposed,
        })
    } else {
        Ok(Normalized {
            sa: sa.to_owned(),
            ct: ct.to_owned(),
            p: p.to_owned(),
            transposed,
        })
    }
}
