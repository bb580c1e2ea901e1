use crate::error::{Error};
use crate::metric::{Metric};

use ndarray::{Array1, Array2};

use std::fmt;
use std::str::FromStr;

/// A column of a distance table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    ComovingLos,
    ComovingTransverse,
    AngularDiameter,
    Luminosity,
    LookbackTime,
    Age,
    Volume,
    AngularScale
}

impl Quantity {
    pub const ALL: [Quantity; 8] = [
        Quantity::ComovingLos, Quantity::ComovingTransverse, Quantity::AngularDiameter,
        Quantity::Luminosity, Quantity::LookbackTime, Quantity::Age, Quantity::Volume,
        Quantity::AngularScale
    ];

    pub const NAMES: [&'static str; 8] = ["dc", "dm", "da", "dl", "lt", "age", "vol", "scale"];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::ComovingLos => "dc",
            Quantity::ComovingTransverse => "dm",
            Quantity::AngularDiameter => "da",
            Quantity::Luminosity => "dl",
            Quantity::LookbackTime => "lt",
            Quantity::Age => "age",
            Quantity::Volume => "vol",
            Quantity::AngularScale => "scale"
        }
    }

    pub fn unit(&self, natural: bool) -> &'static str {
        match (self, natural) {
            (Quantity::LookbackTime, false) | (Quantity::Age, false) => "Gyr",
            (Quantity::Volume, false) => "Mpc3/sr",
            (Quantity::AngularScale, _) => "pc/arcsec",
            (_, false) => "Mpc",
            (Quantity::LookbackTime, true) | (Quantity::Age, true) => "1/H0",
            (Quantity::Volume, true) => "(c/H0)3/sr",
            (_, true) => "c/H0"
        }
    }

    pub fn evaluate<M: Metric + ?Sized>(&self, metric: &M, z: f64) -> Result<f64, Error> {
        match self {
            Quantity::ComovingLos => metric.comoving_distance_los(z),
            Quantity::ComovingTransverse => metric.comoving_distance_transverse(z),
            Quantity::AngularDiameter => metric.angular_diameter_distance(z),
            Quantity::Luminosity => metric.luminosity_distance(z),
            Quantity::LookbackTime => metric.lookback_time(z),
            Quantity::Age => metric.age_at(z),
            Quantity::Volume => metric.comoving_volume(z),
            Quantity::AngularScale => metric.angular_scale(z)
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Quantity::ALL.iter()
            .find(|q| q.name() == s)
            .copied()
            .ok_or_else(|| Error::Argument(format!("unknown quantity '{}', expected one of {}", s, Quantity::NAMES.join(", "))))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluate `quantities` at every redshift. Column 0 holds the redshift,
/// the remaining columns follow the order of `quantities`.
pub fn tabulate<M: Metric + ?Sized>(metric: &M, redshifts: &[f64], quantities: &[Quantity]) -> Result<Array2<f64>, Error> {
    let mut table = Array2::zeros((redshifts.len(), quantities.len() + 1));
    for (mut row, &z) in table.rows_mut().into_iter().zip(redshifts) {
        row[0] = z;
        for (j, q) in quantities.iter().enumerate() {
            row[j + 1] = q.evaluate(metric, z)?;
        }
    }
    Ok(table)
}

/// `n` evenly spaced redshifts from `start` to `stop` inclusive.
pub fn redshift_grid(start: f64, stop: f64, n: usize) -> Result<Array1<f64>, Error> {
    if n == 0 {
        return Err(Error::Argument("redshift grid needs at least one point".into()));
    }
    for &z in &[start, stop] {
        crate::cosmology::check_redshift(z)?;
    }
    if n == 1 {
        return Ok(Array1::from_elem(1, start));
    }
    Ok(Array1::linspace(start, stop, n))
}
