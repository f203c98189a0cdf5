//! Validity range of the 75-term specific volume polynomial.
//!
//! The polynomial is only certified inside an empirically fitted "funnel" of
//! (SA, CT, p) space: wide near the surface, narrowing with depth. Points
//! outside the funnel still evaluate, but the results carry no accuracy
//! guarantee, so derived fields report them through a validity mask.

/// Freezing Conservative Temperature [°C] of air-free seawater, polynomial fit.
#[allow(clippy::excessive_precision)]
pub fn ct_freezing_poly(sa: f64, p_dbar: f64) -> f64 {
    const C0: f64 = 0.017_947_064_327_968_736;
    const C1: f64 = -6.076_099_099_929_818;
    const C2: f64 = 4.883_198_653_547_851;
    const C3: f64 = -11.880_816_012_305_42;
    const C4: f64 = 13.346_585_114_802_57;
    const C5: f64 = -8.722_761_043_208_607;
    const C6: f64 = 2.082_038_908_808_201;
    const C7: f64 = -7.389_420_998_107_497;
    const C8: f64 = -2.110_913_185_058_476;
    const C9: f64 = 0.229_549_157_800_622_9;
    const C10: f64 = -0.989_153_812_330_728_2;
    const C11: f64 = -0.089_871_501_284_064_96;
    const C12: f64 = 0.383_113_243_207_172_8;
    const C13: f64 = 1.054_318_231_187_074;
    const C14: f64 = 1.065_556_599_652_796;
    const C15: f64 = -0.799_749_680_169_403_2;
    const C16: f64 = 0.385_013_355_409_706_9;
    const C17: f64 = -2.078_616_693_017_569;
    const C18: f64 = 0.875_634_077_272_953_8;
    const C19: f64 = -2.079_022_768_390_933;
    const C20: f64 = 1.596_435_439_942_262;
    const C21: f64 = 0.133_800_217_110_917_4;
    const C22: f64 = 1.242_891_021_876_471;

    let sa_r = sa.max(0.0) * 1e-2;
    let x = sa_r.sqrt();
    let p_r = p_dbar * 1e-4;

    C0 + sa_r * (C1 + x * (C2 + x * (C3 + x * (C4 + x * (C5 + C6 * x)))))
        + p_r * (C7 + p_r * (C8 + C9 * p_r))
        + sa_r
            * p_r
            * (C10
                + p_r * (C12 + p_r * (C15 + C21 * sa_r))
                + sa_r * (C13 + C17 * p_r + C19 * sa_r)
                + x * (C11 + p_r * (C14 + C18 * p_r) + sa_r * (C16 + C20 * p_r + C22 * sa_r)))
}

/// Whether (SA, CT, p) lies inside the funnel. NaN in any argument is outside.
pub fn in_funnel(sa: f64, ct: f64, p_dbar: f64) -> bool {
    if sa.is_nan() || ct.is_nan() || p_dbar.is_nan() {
        return false;
    }
    if p_dbar > 8000.0 || sa < 0.0 || sa > 42.0 {
        return false;
    }
    if p_dbar < 500.0 {
        return ct >= ct_freezing_poly(sa, p_dbar);
    }
    if ct < ct_freezing_poly(sa, 500.0) {
        return false;
    }
    if p_dbar < 6500.0 {
        sa >= p_dbar * 5e-3 - 2.5 && ct <= 31.666_666_666_666_67 - p_dbar * 3.333_333_333_333_334e-3
    } else {
        sa >= 30.0 && ct <= 10.0
    }
}
