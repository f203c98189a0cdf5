//! SA/CT estimates between two bottles of a profile.
//!
//! Linear mode draws a straight line between the bracketing bottles. Curve
//! mode follows Reiniger & Ross (1968): two parabolas are formed, one through
//! the bracket plus the bottle above, one through the bracket plus the bottle
//! below. Each parabola is written in Neville form as a pressure-weighted mix
//! of the linear interpolation and a linear extrapolation from the outer
//! pair of bottles. The final value averages the linear reference with the
//! parabolas, each parabola weighted by how far the *other* one strays from
//! the reference, so a parabola that overshoots loses influence.

use crate::error::{AppError, Result};
use crate::models::{InterpMode, Level, Profile};

/// Interpolates SA and CT at `p` inside the bracket `[lower.p, upper.p]`.
///
/// `above` and `below` are the bottles just outside the bracket; when either
/// is missing the result is linear.
pub fn interpolate(
    above: Option<Level>,
    lower: Level,
    upper: Level,
    below: Option<Level>,
    p: f64,
    mode: InterpMode,
) -> Result<(f64, f64)> {
    if !(lower.p..=upper.p).contains(&p) {
        return Err(AppError::DegenerateBracket {
            p,
            p0: lower.p,
            p1: upper.p,
        });
    }
    if p == lower.p || upper.p == lower.p {
        return Ok((lower.sa, lower.ct));
    }
    if p == upper.p {
        return Ok((upper.sa, upper.ct));
    }

    let linear = |field: fn(&Level) -> f64| line(&lower, &upper, field, p);
    let (sa_lin, ct_lin) = (linear(sa_of), linear(ct_of));

    match (mode, above, below) {
        (InterpMode::Curve, Some(above), Some(below)) if above.p < lower.p && below.p > upper.p => {
            let quad = Quad {
                above,
                lower,
                upper,
                below,
                p,
            };
            Ok((quad.blend(sa_of, sa_lin), quad.blend(ct_of, ct_lin)))
        }
        _ => Ok((sa_lin, ct_lin)),
    }
}

/// Interpolates inside the bracket between bottles `i` and `i + 1` of a
/// profile, picking up the outer neighbours where they exist.
pub fn interpolate_in_profile(
    profile: &Profile,
    i: usize,
    p: f64,
    mode: InterpMode,
) -> Result<(f64, f64)> {
    let above = i.checked_sub(1).map(|k| profile.level(k));
    interpolate(
        above,
        profile.level(i),
        profile.level(i + 1),
        profile.get(i + 2),
        p,
        mode,
    )
}

fn sa_of(l: &Level) -> f64 {
    l.sa
}

fn ct_of(l: &Level) -> f64 {
    l.ct
}

/// Value at `p` of the straight line through `a` and `b`. Callers guarantee
/// `a.p != b.p`.
fn line(a: &Level, b: &Level, field: fn(&Level) -> f64, p: f64) -> f64 {
    let (va, vb) = (field(a), field(b));
    va + (vb - va) * (p - a.p) / (b.p - a.p)
}

/// The four bottles around an interior bracket.
struct Quad {
    above: Level,
    lower: Level,
    upper: Level,
    below: Level,
    p: f64,
}

impl Quad {
    fn blend(&self, field: fn(&Level) -> f64, reference: f64) -> f64 {
        let Quad {
            above,
            lower,
            upper,
            below,
            p,
        } = self;
        let p = *p;

        let extrap_up = line(above, lower, field, p);
        let extrap_down = line(upper, below, field, p);

        let parabola_up =
            ((p - above.p) * reference - (p - upper.p) * extrap_up) / (upper.p - above.p);
        let parabola_down =
            ((p - lower.p) * extrap_down - (p - below.p) * reference) / (below.p - lower.p);

        let dev_up = (parabola_up - reference).abs();
        let dev_down = (parabola_down - reference).abs();
        let denom = dev_up + dev_down;
        if denom == 0.0 || !denom.is_finite() {
            return reference;
        }
        let weighted = (parabola_up * dev_down + parabola_down * dev_up) / denom;
        0.5 * (reference + weighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottles() -> [Level; 4] {
        [
            Level::new(34.9, 12.0, 100.0),
            Level::new(35.0, 10.0, 200.0),
            Level::new(35.05, 7.0, 300.0),
            Level::new(35.02, 5.5, 400.0),
        ]
    }

    #[test]
    fn endpoints_are_returned_exactly() {
        let [a, l, u, b] = bottles();
        for mode in [InterpMode::Curve, InterpMode::Linear] {
            assert_eq!(
                interpolate(Some(a), l, u, Some(b), l.p, mode).unwrap(),
                (l.sa, l.ct)
            );
            assert_eq!(
                interpolate(Some(a), l, u, Some(b), u.p, mode).unwrap(),
                (u.sa, u.ct)
            );
        }
    }

    #[test]
    fn linear_mode_is_a_straight_line() {
        let [a, l, u, b] = bottles();
        let (sa, ct) = interpolate(Some(a), l, u, Some(b), 250.0, InterpMode::Linear).unwrap();
        assert!((sa - 35.025).abs() < 1e-12);
        assert!((ct - 8.5).abs() < 1e-12);
    }

    #[test]
    fn curve_mode_falls_back_to_linear_at_the_boundaries() {
        let [a, l, u, b] = bottles();
        let lin = interpolate(None, l, u, None, 250.0, InterpMode::Linear).unwrap();
        assert_eq!(interpolate(None, l, u, Some(b), 250.0, InterpMode::Curve).unwrap(), lin);
        assert_eq!(interpolate(Some(a), l, u, None, 250.0, InterpMode::Curve).unwrap(), lin);
    }

    #[test]
    fn curve_mode_reproduces_a_straight_profile() {
        let levels = [0.0, 50.0, 120.0, 300.0].map(|p| Level::new(35.0 + 1e-3 * p, 20.0 - 0.02 * p, p));
        let (sa, ct) = interpolate(
            Some(levels[0]),
            levels[1],
            levels[2],
            Some(levels[3]),
            80.0,
            InterpMode::Curve,
        )
        .unwrap();
        assert!((sa - 35.08).abs() < 1e-12);
        assert!((ct - 18.4).abs() < 1e-12);
    }

    #[test]
    fn curve_mode_follows_curvature() {
        // CT = 20 - p^2 / 20000 is concave; the chord underestimates it.
        let levels = [0.0, 100.0, 200.0, 300.0].map(|p| Level::new(35.0, 20.0 - p * p / 20000.0, p));
        let exact = 20.0 - 150.0 * 150.0 / 20000.0;
        let (_, ct_lin) = interpolate(
            Some(levels[0]),
            levels[1],
            levels[2],
            Some(levels[3]),
            150.0,
            InterpMode::Linear,
        )
        .unwrap();
        let (_, ct_curve) = interpolate(
            Some(levels[0]),
            levels[1],
            levels[2],
            Some(levels[3]),
            150.0,
            InterpMode::Curve,
        )
        .unwrap();
        assert!((ct_curve - exact).abs() < (ct_lin - exact).abs());
    }

    #[test]
    fn duplicate_pressure_returns_lower_bottle() {
        let l = Level::new(35.0, 10.0, 200.0);
        let u = Level::new(35.1, 9.0, 200.0);
        assert_eq!(
            interpolate(None, l, u, None, 200.0, InterpMode::Curve).unwrap(),
            (35.0, 10.0)
        );
    }

    #[test]
    fn outside_the_bracket_is_an_error() {
        let [a, l, u, b] = bottles();
        let err = interpolate(Some(a), l, u, Some(b), 450.0, InterpMode::Curve).unwrap_err();
        assert!(matches!(err, AppError::DegenerateBracket { .. }));
    }

    #[test]
    fn profile_neighbours_are_picked_up() {
        let prof = Profile::new(
            vec![34.9, 35.0, 35.05, 35.02],
            vec![12.0, 10.0, 7.0, 5.5],
            vec![100.0, 200.0, 300.0, 400.0],
        )
        .unwrap();
        let [a, l, u, b] = bottles();
        let direct = interpolate(Some(a), l, u, Some(b), 230.0, InterpMode::Curve).unwrap();
        assert_eq!(
            interpolate_in_profile(&prof, 1, 230.0, InterpMode::Curve).unwrap(),
            direct
        );
        let top = interpolate_in_profile(&prof, 0, 130.0, InterpMode::Curve).unwrap();
        let top_lin = interpolate(None, a, l, None, 130.0, InterpMode::Linear).unwrap();
        assert_eq!(top, top_lin);
    }
}
