/// Curvature densities smaller than this in magnitude are treated as flat;
/// the sinh/sin forms lose all precision as the density goes to zero.
pub const FLAT_EPSILON: f64 = 1e-8;

// Below this |omega dc^2| the curved volume is summed as a series.
const SERIES_THRESHOLD: f64 = 1e-3;

/// Sign of the spatial curvature, with the curvature density `omega` and
/// `scale = sqrt(|omega|)` for the curved cases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curvature {
    Open { omega: f64, scale: f64 },
    Flat,
    Closed { omega: f64, scale: f64 }
}

impl Curvature {
    pub fn from_density(omega: f64) -> Self {
        if omega.abs() < FLAT_EPSILON {
            Curvature::Flat
        } else if omega > 0.0 {
            Curvature::Open { omega, scale: omega.sqrt() }
        } else {
            Curvature::Closed { omega, scale: (-omega).sqrt() }
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Curvature::Flat)
    }

    /// Transverse comoving distance from the line-of-sight one.
    pub fn sinn(&self, dc: f64) -> f64 {
        match *self {
            Curvature::Open { scale, .. } => (scale * dc).sinh() / scale,
            Curvature::Flat => dc,
            Curvature::Closed { scale, .. } => (scale * dc).sin() / scale
        }
    }

    pub fn cosn(&self, dc: f64) -> f64 {
        match *self {
            Curvature::Open { scale, .. } => (scale * dc).cosh(),
            Curvature::Flat => 1.0,
            Curvature::Closed { scale, .. } => (scale * dc).cos()
        }
    }

    /// Inverse of `sinn`, on the principal branch for closed models.
    pub fn asinn(&self, dm: f64) -> f64 {
        match *self {
            Curvature::Open { scale, .. } => (scale * dm).asinh() / scale,
            Curvature::Flat => dm,
            Curvature::Closed { scale, .. } => (scale * dm).asin() / scale
        }
    }

    /// Comoving volume per steradian enclosed by line-of-sight distance `dc`.
    pub fn volume(&self, dc: f64) -> f64 {
        let dm = self.sinn(dc);
        match *self {
            Curvature::Flat => dm * dm * dm / 3.0,
            Curvature::Open { omega, .. } | Curvature::Closed { omega, .. } => {
                let x = omega * dc * dc;
                if x.abs() < SERIES_THRESHOLD {
                    // the closed form cancels to nothing here
                    dc * dc * dc / 3.0 * (1.0 + x / 5.0 + 2.0 * x * x / 105.0)
                } else {
                    (dm * self.cosn(dc) - dc) / (2.0 * omega)
                }
            }
        }
    }
}
