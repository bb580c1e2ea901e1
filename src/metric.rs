use crate::error::{Error};
use crate::flrw::{Flrw};
use crate::flrw_nat::{FlrwNat};

/// Distance and time queries shared by the physical and natural-unit
/// metrics, so that tables can be produced from either.
pub trait Metric {
    fn comoving_distance_los(&self, z: f64) -> Result<f64, Error>;
    fn comoving_distance_transverse(&self, z: f64) -> Result<f64, Error>;
    fn angular_diameter_distance(&self, z: f64) -> Result<f64, Error>;
    fn luminosity_distance(&self, z: f64) -> Result<f64, Error>;
    fn lookback_time(&self, z: f64) -> Result<f64, Error>;
    fn age_at(&self, z: f64) -> Result<f64, Error>;
    fn comoving_volume(&self, z: f64) -> Result<f64, Error>;

    /// Needs a length unit, so natural units have none.
    fn angular_scale(&self, _z: f64) -> Result<f64, Error> {
        Err(Error::Unsupported("angular scale"))
    }

    fn is_natural(&self) -> bool;
}

macro_rules! delegate {
    ($($name:ident),*) => {
        $(fn $name(&self, z: f64) -> Result<f64, Error> { Self::$name(self, z) })*
    };
}

impl Metric for Flrw {
    delegate!(comoving_distance_los, comoving_distance_transverse, angular_diameter_distance,
              luminosity_distance, lookback_time, age_at, comoving_volume, angular_scale);

    fn is_natural(&self) -> bool { false }
}

impl Metric for FlrwNat {
    delegate!(comoving_distance_los, comoving_distance_transverse, angular_diameter_distance,
              luminosity_distance, lookback_time, age_at, comoving_volume);

    fn is_natural(&self) -> bool { true }
}
