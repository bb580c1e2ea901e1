use crate::curvature::{Curvature};

// Below this redshift, closed forms that subtract nearly equal terms give way
// to quadrature.
const SMALL_REDSHIFT: f64 = 1e-4;
// The Mattig numerator is of order matter^2 z / 2.
const MATTIG_CUTOFF: f64 = 1e-6;
// The matter-only age divides by 1 - matter.
const NEAR_CRITICAL: f64 = 1e-3;

/// Parameter families whose Friedmann integrals are elementary. Everything
/// else goes through quadrature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// No matter, no vacuum energy (Milne).
    Empty,
    /// Flat, matter only.
    EinsteinDeSitter,
    /// Flat, vacuum only. Has no big bang.
    DeSitter,
    /// Curved, matter only.
    MatterOnly,
    /// Open, vacuum only with 0 < vacuum < 1.
    VacuumOnly,
    /// Flat with 0 < matter < 1.
    FlatLambda,
    General
}

impl Regime {
    pub fn select(matter: f64, vacuum: f64, curvature: &Curvature) -> Regime {
        let flat = curvature.is_flat();
        match (matter == 0.0, vacuum == 0.0) {
            (true, true) => Regime::Empty,
            (false, true) if flat => Regime::EinsteinDeSitter,
            (false, true) => Regime::MatterOnly,
            (true, false) if flat => Regime::DeSitter,
            (true, false) if vacuum > 0.0 && vacuum < 1.0 => Regime::VacuumOnly,
            (false, false) if flat && matter < 1.0 => Regime::FlatLambda,
            _ => Regime::General
        }
    }

    /// Line-of-sight comoving distance in Hubble radii, when elementary and
    /// free of cancellation at this redshift.
    pub fn comoving_distance(&self, matter: f64, vacuum: f64, z: f64) -> Option<f64> {
        let zp1 = 1.0 + z;
        match *self {
            Regime::Empty => Some(z.ln_1p()),
            Regime::EinsteinDeSitter => {
                let s = zp1.sqrt();
                Some(2.0 * z / (s * (s + 1.0)))
            }
            Regime::DeSitter => Some(z),
            Regime::MatterOnly if matter < 1.0 && z >= SMALL_REDSHIFT && matter * matter * z >= MATTIG_CUTOFF => {
                // Mattig relation, then back through the open sinh
                let k = (1.0 - matter).sqrt();
                let dl = 2.0 * (2.0 - matter * (1.0 - z) - (2.0 - matter) * (1.0 + matter * z).sqrt())
                    / (matter * matter);
                Some((k * dl / zp1).asinh() / k)
            }
            Regime::VacuumOnly if z >= SMALL_REDSHIFT => {
                let ok = 1.0 - vacuum;
                let q = (ok / vacuum).sqrt();
                Some(((zp1 * q).asinh() - q.asinh()) / ok.sqrt())
            }
            _ => None
        }
    }

    /// Age at redshift `z` in Hubble times, when elementary.
    pub fn age(&self, matter: f64, vacuum: f64, z: f64) -> Option<f64> {
        let zp1 = 1.0 + z;
        match *self {
            Regime::Empty => Some(1.0 / zp1),
            Regime::EinsteinDeSitter => Some(2.0 / (3.0 * zp1 * zp1.sqrt())),
            Regime::MatterOnly if (1.0 - matter).abs() >= NEAR_CRITICAL => {
                let ok = 1.0 - matter;
                let pre = (1.0 + matter * z).sqrt();
                let arc = if ok > 0.0 {
                    matter / ok.sqrt() * (ok.sqrt() / pre).atanh()
                } else {
                    matter / (-ok).sqrt() * ((-ok).sqrt() / pre).atan()
                };
                Some((pre / zp1 - arc) / ok)
            }
            Regime::VacuumOnly =>
                Some((1.0 / (zp1 * (1.0 / vacuum - 1.0).sqrt())).asinh() / vacuum.sqrt()),
            Regime::FlatLambda =>
                Some(2.0 / (3.0 * vacuum.sqrt()) * ((1.0 / matter - 1.0) / zp1.powi(3)).sqrt().asinh()),
            _ => None
        }
    }

    /// Lookback time in Hubble times, when elementary. Differences of ages
    /// are only taken where they keep their precision.
    pub fn lookback_time(&self, matter: f64, vacuum: f64, z: f64) -> Option<f64> {
        match *self {
            Regime::DeSitter => Some(z.ln_1p()),
            Regime::Empty => Some(z / (1.0 + z)),
            _ if z < SMALL_REDSHIFT => None,
            _ => {
                let now = self.age(matter, vacuum, 0.0)?;
                let then = self.age(matter, vacuum, z)?;
                Some(now - then)
            }
        }
    }
}
