//! Element-wise evaluation of the equation of state and the funnel over grids.

use ndarray::{Array2, ArrayView2, Zip};

use crate::adapters::funnel::in_funnel;
use crate::adapters::teos10::specvol_anom_standard;
use crate::error::Result;
use crate::shape::normalize;

/// Funnel mask for every (SA, CT, p) point, `p` broadcast against SA.
pub fn in_funnel_field(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
) -> Result<Array2<bool>> {
    let norm = normalize(sa, ct, p)?;
    let mask = Zip::from(&norm.sa)
        .and(&norm.ct)
        .and(&norm.p)
        .map_collect(|&sa, &ct, &p| in_funnel(sa, ct, p));
    Ok(norm.restore(mask))
}

/// Specific volume anomaly [m³/kg] for every point, `p` broadcast against SA.
pub fn specvol_anom_standard_field(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    let norm = normalize(sa, ct, p)?;
    let mut out = Array2::zeros(norm.sa.dim());
    for (((o, &sa), &ct), &p) in out
        .iter_mut()
        .zip(norm.sa.iter())
        .zip(norm.ct.iter())
        .zip(norm.p.iter())
    {
        *o = specvol_anom_standard(sa, ct, p)?;
    }
    Ok(norm.restore(out))
}
