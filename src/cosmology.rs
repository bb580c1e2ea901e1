use crate::error::{Error};

use serde::{Deserialize, Serialize};

pub const KM_PER_MPC: f64 = 3.24077929e-20;
pub const SEC_PER_GYR: f64 = 3.15576e16;
pub const SPEED_OF_LIGHT: f64 = 299792.458;
pub const PC_PER_MPC: f64 = 1.0e6;
pub const RAD_PER_ARCSEC: f64 = std::f64::consts::PI / 180.0 / 3600.0;

/// Hubble parameter (km/s/Mpc), matter and vacuum density of a FLRW model.
/// The curvature density is always derived as `1 - matter - vacuum`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub hubble: f64,
    pub matter: f64,
    pub vacuum: f64
}

pub const PLANCK_2015: Parameters = Parameters {
    hubble: 67.8,
    matter: 0.308,
    vacuum: 0.692
};

impl Default for Parameters {
    fn default() -> Self {
        PLANCK_2015
    }
}

impl Parameters {
    pub fn curvature(&self) -> f64 {
        1.0 - self.matter - self.vacuum
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_hubble(self.hubble)?;
        check_matter(self.matter)?;
        check_vacuum(self.vacuum)?;
        Ok(())
    }
}

pub fn check_hubble(h: f64) -> Result<f64, Error> {
    if !h.is_finite() {
        Err(Error::parameter("hubble", h, "must be finite"))
    } else if h <= 0.0 {
        Err(Error::parameter("hubble", h, "must be positive"))
    } else {
        Ok(h)
    }
}

pub fn check_matter(m: f64) -> Result<f64, Error> {
    if !m.is_finite() {
        Err(Error::parameter("matter", m, "must be finite"))
    } else if m < 0.0 {
        Err(Error::parameter("matter", m, "must be non-negative"))
    } else {
        Ok(m)
    }
}

pub fn check_vacuum(v: f64) -> Result<f64, Error> {
    if !v.is_finite() {
        Err(Error::parameter("vacuum", v, "must be finite"))
    } else {
        Ok(v)
    }
}

/// Only non-negative redshifts are accepted; blueshifts are rejected.
pub fn check_redshift(z: f64) -> Result<f64, Error> {
    if z.is_finite() && z >= 0.0 {
        Ok(z)
    } else {
        Err(Error::InvalidRedshift(z))
    }
}

#[inline]
pub fn hubble_radius(hubble: f64) -> f64 {
    SPEED_OF_LIGHT / hubble
}

#[inline]
pub fn hubble_time(hubble: f64) -> f64 {
    1.0 / (hubble * KM_PER_MPC * SEC_PER_GYR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_hubble_scales() {
        assert_approx_eq!(hubble_radius(50.0), 5995.84916, 1e-5);
        assert_approx_eq!(hubble_time(50.0), 977.792222 / 50.0, 1e-5);
        assert_approx_eq!(hubble_time(70.0), 13.968, 1e-3);
    }

    #[test]
    fn test_planck_is_nearly_flat() {
        assert!(PLANCK_2015.validate().is_ok());
        assert_approx_eq!(PLANCK_2015.curvature(), 0.0, 1e-12);
    }

    #[test]
    fn test_parameters_validate() {
        assert_eq!(Parameters { hubble: 70.0, matter: 0.3, vacuum: -0.2 }.validate(), Ok(()));
        assert!(matches!(Parameters { vacuum: f64::NAN, ..PLANCK_2015 }.validate(),
                         Err(Error::InvalidParameter { name: "vacuum", .. })));
        assert!(matches!(Parameters { hubble: 0.0, ..PLANCK_2015 }.validate(),
                         Err(Error::InvalidParameter { name: "hubble", .. })));
    }

    #[test]
    fn test_parameter_checks() {
        assert!(check_hubble(0.0).is_err());
        assert!(check_hubble(-70.0).is_err());
        assert!(check_hubble(f64::INFINITY).is_err());
        assert!(check_matter(-0.1).is_err());
        assert!(check_matter(f64::NAN).is_err());
        assert!(check_vacuum(-0.5).is_ok());
        assert!(check_vacuum(f64::NEG_INFINITY).is_err());
        assert_eq!(check_matter(0.0), Ok(0.0));
    }

    #[test]
    fn test_redshift_checks() {
        assert_eq!(check_redshift(0.0), Ok(0.0));
        assert_eq!(check_redshift(-0.5), Err(Error::InvalidRedshift(-0.5)));
        assert!(check_redshift(f64::NAN).is_err());
        assert!(check_redshift(f64::INFINITY).is_err());
    }
}
