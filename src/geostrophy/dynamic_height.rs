use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::adapters::funnel::in_funnel;
use crate::adapters::teos10::{DB2PA, specvol_anom_standard};
use crate::error::{AppError, Result};
use crate::geostrophy::interpolation::interpolate_in_profile;
use crate::models::{DynHeightOptions, Field, Profile, ProfileField};
use crate::shape::{Normalized, normalize};

/// Grids with at least this many profiles are integrated on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Upper bound on the sub-steps of a single bottle-to-bottle interval.
pub const MAX_SUB_STEPS: usize = 1_000_000;

/// Dynamic height [m²/s²] of one profile, zero at the first bottle and
/// decreasing with depth.
///
/// Each bottle-to-bottle interval is cut into `ceil(Δp / delta_p)` equal
/// sub-steps; SA and CT are interpolated at every sub-pressure, the specific
/// volume anomaly is evaluated there and integrated with the trapezoidal rule.
/// A level is flagged outside the funnel as soon as any point used on the way
/// down from the surface is.
pub fn profile_dynamic_height(profile: &Profile, opts: &DynHeightOptions) -> Result<ProfileField> {
    let opts = opts.clone().validated()?;
    let n = profile.len();
    let mut values = vec![0.0; n];
    let mut valid = vec![false; n];

    let top = profile.level(0);
    valid[0] = in_funnel(top.sa, top.ct, top.p);

    let mut cumulative = 0.0;
    for i in 0..n - 1 {
        let start = profile.level(i);
        let (p0, p1) = (start.p, profile.p()[i + 1]);
        let dp = p1 - p0;
        let steps = sub_steps(dp, opts.delta_p)?;
        log::trace!("interval {i}: {p0}..{p1} dbar in {steps} sub-steps");

        // Bottle i may hide behind a zero-width interval above it.
        let mut interval_ok = in_funnel(start.sa, start.ct, p0);
        let mut integral = 0.0;
        let mut p_prev = p0;
        let mut prev_anom = specvol_anom_standard(start.sa, start.ct, p0)?;
        for j in 1..=steps {
            let p_j = if j == steps {
                p1
            } else {
                p0 + dp * j as f64 / steps as f64
            };
            let (sa, ct) = interpolate_in_profile(profile, i, p_j, opts.interp)?;
            let anom = specvol_anom_standard(sa, ct, p_j)?;
            interval_ok &= in_funnel(sa, ct, p_j);

            integral += 0.5 * (prev_anom + anom) * (p_j - p_prev);
            prev_anom = anom;
            p_prev = p_j;
        }

        cumulative += integral * DB2PA;
        values[i + 1] = -cumulative;
        valid[i + 1] = valid[i] && interval_ok;
    }

    Ok(ProfileField {
        values,
        in_funnel: valid,
    })
}

/// Number of equal sub-steps covering `dp` with steps no wider than `delta_p`.
fn sub_steps(dp: f64, delta_p: f64) -> Result<usize> {
    if dp <= 0.0 {
        return Ok(1);
    }
    let steps = (dp / delta_p).ceil();
    if !steps.is_finite() || steps > MAX_SUB_STEPS as f64 {
        return Err(AppError::InvalidOptions(format!(
            "delta_p {delta_p} dbar needs more than {MAX_SUB_STEPS} sub-steps over {dp} dbar"
        )));
    }
    Ok((steps as usize).max(1))
}

/// Dynamic height for every level of every profile in a grid.
///
/// `sa` and `ct` share one shape; `p` is broadcast against it. Each column
/// is a profile unless the input is a single row, which is taken as one
/// profile and returned as a row.
pub fn dynamic_height(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
    opts: &DynHeightOptions,
) -> Result<Field> {
    let opts = opts.clone().validated()?;
    log::debug!(
        "dynamic height: delta_p {} dbar, {} interpolation",
        opts.delta_p,
        opts.interp.as_str()
    );
    let norm = normalize_profiles(sa, ct, p)?;
    map_profiles(&norm, |profile| profile_dynamic_height(profile, &opts))
}

/// Normalises inputs for a vertical integration, rejecting a scalar pressure.
pub(crate) fn normalize_profiles(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
) -> Result<Normalized> {
    if p.dim() == (1, 1) && sa.len() > 1 {
        return Err(AppError::ScalarPressure);
    }
    let norm = normalize(sa, ct, p)?;
    if norm.levels() < 2 {
        return Err(AppError::InsufficientLevels {
            levels: norm.levels(),
        });
    }
    Ok(norm)
}

/// Runs `per_profile` on every column and reassembles the results in the
/// caller's orientation.
pub(crate) fn map_profiles<F>(norm: &Normalized, per_profile: F) -> Result<Field>
where
    F: Fn(&Profile) -> Result<ProfileField> + Sync,
{
    let (levels, profiles) = (norm.levels(), norm.profiles());
    let parallel = profiles >= PARALLEL_THRESHOLD;
    log::debug!(
        "integrating {profiles} profiles x {levels} levels (transposed: {}, parallel: {parallel})",
        norm.transposed()
    );

    let run = |j: usize| -> Result<ProfileField> {
        let profile = Profile::new(
            norm.sa.column(j).to_vec(),
            norm.ct.column(j).to_vec(),
            norm.p.column(j).to_vec(),
        )?;
        per_profile(&profile)
    };
    let columns: Vec<ProfileField> = if parallel {
        (0..profiles).into_par_iter().map(run).collect::<Result<Vec<_>>>()?
    } else {
        (0..profiles).map(run).collect::<Result<Vec<_>>>()?
    };

    let values = Array2::from_shape_fn((levels, profiles), |(i, j)| columns[j].values[i]);
    let in_funnel = Array2::from_shape_fn((levels, profiles), |(i, j)| columns[j].in_funnel[i]);
    Ok(Field {
        values: norm.restore(values),
        in_funnel: norm.restore(in_funnel),
    })
}
