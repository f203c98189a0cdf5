use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One bottle of a profile: Absolute Salinity [g/kg], Conservative
/// Temperature [°C] and sea pressure [dbar].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub sa: f64,
    pub ct: f64,
    pub p: f64,
}

impl Level {
    pub fn new(sa: f64, ct: f64, p: f64) -> Self {
        Self { sa, ct, p }
    }
}

/// A single water column stored as parallel sequences, shallowest first.
///
/// Pressure must be finite and non-decreasing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    sa: Vec<f64>,
    ct: Vec<f64>,
    p: Vec<f64>,
}

impl Profile {
    /// Builds a profile, checking that the three sequences have the same
    /// length, hold at least two levels and that pressure is finite and
    /// non-decreasing.
    pub fn new(sa: Vec<f64>, ct: Vec<f64>, p: Vec<f64>) -> Result<Self> {
        let n = sa.len();
        if ct.len() != n {
            return Err(AppError::DimensionMismatch {
                what: "CT",
                expected: (n, 1),
                found: (ct.len(), 1),
            });
        }
        if p.len() != n {
            return Err(AppError::DimensionMismatch {
                what: "p",
                expected: (n, 1),
                found: (p.len(), 1),
            });
        }
        if n < 2 {
            return Err(AppError::InsufficientLevels { levels: n });
        }
        if let Some(index) = p.iter().position(|v| !v.is_finite()) {
            return Err(AppError::NonFinitePressure { index, p: p[index] });
        }
        if let Some(index) = p.windows(2).position(|w| w[1] < w[0]) {
            return Err(AppError::UnsortedPressure {
                index: index + 1,
                p: p[index + 1],
                prev: p[index],
            });
        }
        Ok(Self { sa, ct, p })
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    /// Always false for a constructed profile.
    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn level(&self, i: usize) -> Level {
        Level::new(self.sa[i], self.ct[i], self.p[i])
    }

    /// Level `i` if it exists.
    pub fn get(&self, i: usize) -> Option<Level> {
        (i < self.len()).then(|| self.level(i))
    }

    pub fn sa(&self) -> &[f64] {
        &self.sa
    }

    pub fn ct(&self) -> &[f64] {
        &self.ct
    }

    pub fn p(&self) -> &[f64] {
        &self.p
    }
}

/// How SA and CT are estimated between two bottles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum InterpMode {
    /// Reiniger & Ross (1968) blend of the linear estimate with the two
    /// neighbouring parabolas.
    #[default]
    Curve,
    Linear,
}

impl InterpMode {
    /// Resolves a mode name. `"linear"` and `"lin"` select linear
    /// interpolation, everything else selects curve fitting.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => InterpMode::Linear,
            "curve" => InterpMode::Curve,
            other => {
                log::warn!("unrecognised interpolation mode '{other}', using curve fitting");
                InterpMode::Curve
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterpMode::Curve => "curve",
            InterpMode::Linear => "linear",
        }
    }
}

impl From<&str> for InterpMode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for InterpMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Options for the dynamic height integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynHeightOptions {
    /// Largest pressure sub-step [dbar] used when integrating between bottles.
    pub delta_p: f64,
    pub interp: InterpMode,
}

impl Default for DynHeightOptions {
    fn default() -> Self {
        Self {
            delta_p: 1.0,
            interp: InterpMode::Curve,
        }
    }
}

impl DynHeightOptions {
    pub fn with_interp(interp: InterpMode) -> Self {
        Self {
            interp,
            ..Default::default()
        }
    }

    pub fn validated(self) -> Result<Self> {
        if !self.delta_p.is_finite() || self.delta_p <= 0.0 {
            return Err(AppError::InvalidOptions(format!(
                "delta_p must be finite and positive, got {}",
                self.delta_p
            )));
        }
        Ok(self)
    }
}

/// Per-level result for one profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileField {
    pub values: Vec<f64>,
    /// True where every point that contributed to the value lies in the funnel.
    pub in_funnel: Vec<bool>,
}

/// Per-level result for a grid of profiles, in the caller's orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub values: Array2<f64>,
    pub in_funnel: Array2<bool>,
}

impl Field {
    pub fn into_parts(self) -> (Array2<f64>, Array2<bool>) {
        (self.values, self.in_funnel)
    }
}
