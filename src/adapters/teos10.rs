use gsw as gsw_teos10;

use crate::error::{AppError, Result};

/// Standard Ocean Reference Salinity [g/kg].
pub const GSW_SSO: f64 = 35.165_04;
/// Pressure unit conversion, dbar to Pa.
pub const DB2PA: f64 = 1.0e4;

/// Specific volume [m³/kg] from SA, CT and p (TEOS-10, 75-term polynomial).
pub fn specvol(sa: f64, ct: f64, p_dbar: f64) -> Result<f64> {
    gsw_teos10::volume::specvol(sa, ct, p_dbar).map_err(|_| AppError::Evaluator {
        sa,
        ct,
        p: p_dbar,
    })
}

/// Specific volume of the standard ocean (SA = SSO, CT = 0 °C) at `p_dbar`.
pub fn specvol_sso_0(p_dbar: f64) -> Result<f64> {
    specvol(GSW_SSO, 0.0, p_dbar)
}

/// Specific volume anomaly relative to the SSO, 0 °C standard ocean [m³/kg].
pub fn specvol_anom_standard(sa: f64, ct: f64, p_dbar: f64) -> Result<f64> {
    Ok(specvol(sa, ct, p_dbar)? - specvol_sso_0(p_dbar)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ocean_has_zero_anomaly() {
        for p in [0.0, 500.0, 4000.0] {
            let anom = specvol_anom_standard(GSW_SSO, 0.0, p).unwrap();
            assert_eq!(anom, 0.0);
        }
    }

    #[test]
    fn warm_fresh_water_is_lighter_than_standard_ocean() {
        let v = specvol(34.7, 28.8, 10.0).unwrap();
        assert!(v > 9.7e-4 && v < 9.9e-4, "specvol unexpected: {v}");
        let anom = specvol_anom_standard(34.7, 28.8, 10.0).unwrap();
        assert!(anom > 0.0 && anom < 1e-5, "anomaly unexpected: {anom}");
    }
}
