use ndarray::ArrayView2;

use crate::adapters::teos10::{DB2PA, specvol_anom_standard};
use crate::error::Result;
use crate::geostrophy::dynamic_height::{map_profiles, normalize_profiles, profile_dynamic_height};
use crate::models::{DynHeightOptions, Field, InterpMode, Profile, ProfileField};

/// Montgomery geostrophic streamfunction [m²/s²] of one profile.
///
/// Adds `p·δ` (δ the specific volume anomaly at the bottle, p in Pa) to the
/// dynamic height integrated with 1 dbar sub-steps. The validity mask is the
/// dynamic height mask; the standard-ocean reference term is always inside
/// the funnel.
pub fn profile_montgomery(profile: &Profile, interp: InterpMode) -> Result<ProfileField> {
    let dyn_height = profile_dynamic_height(profile, &DynHeightOptions::with_interp(interp))?;

    let values = dyn_height
        .values
        .iter()
        .enumerate()
        .map(|(i, dh)| {
            let level = profile.level(i);
            let anom = specvol_anom_standard(level.sa, level.ct, level.p)?;
            Ok(DB2PA * level.p * anom + dh)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProfileField {
        values,
        in_funnel: dyn_height.in_funnel,
    })
}

/// Montgomery streamfunction for every level of every profile in a grid,
/// with the same shape rules as [`dynamic_height`](super::dynamic_height::dynamic_height).
pub fn montgomery_streamfunction(
    sa: ArrayView2<'_, f64>,
    ct: ArrayView2<'_, f64>,
    p: ArrayView2<'_, f64>,
    interp: InterpMode,
) -> Result<Field> {
    let norm = normalize_profiles(sa, ct, p)?;
    map_profiles(&norm, |profile| profile_montgomery(profile, interp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_value_is_the_local_anomaly_term() {
        let prof = Profile::new(
            vec![34.7118, 34.8915],
            vec![28.8099, 28.4392],
            vec![10.0, 50.0],
        )
        .unwrap();
        let out = profile_montgomery(&prof, InterpMode::Curve).unwrap();
        let anom = specvol_anom_standard(34.7118, 28.8099, 10.0).unwrap();
        assert_eq!(out.values[0], DB2PA * 10.0 * anom);
        assert_eq!(out.in_funnel, vec![true, true]);
    }
}
