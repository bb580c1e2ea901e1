use crate::cosmology::{check_matter, check_vacuum, check_redshift};
use crate::curvature::{Curvature};
use crate::error::{Error};
use crate::numeric::{Quadrature};
use crate::regime::{Regime};

use lru_cache::LruCache;
use tracing::debug;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

const CACHE_SIZE: usize = 128;

/// The Friedmann-Lemaitre-Robertson-Walker metric in natural units: the
/// Hubble constant is one, distances are in Hubble radii and times in Hubble
/// times.
pub struct FlrwNat {
    matter: f64,
    vacuum: f64,
    curvature: Curvature,
    regime: Regime,
    quadrature: Quadrature,
    // line-of-sight comoving distances from quadrature, keyed by redshift bits
    cache: Mutex<LruCache<u64, f64>>
}

impl FlrwNat {
    pub fn new(matter: f64, vacuum: f64) -> Result<Self, Error> {
        Self::with_quadrature(matter, vacuum, Quadrature::default())
    }

    pub fn with_quadrature(matter: f64, vacuum: f64, quadrature: Quadrature) -> Result<Self, Error> {
        check_matter(matter)?;
        check_vacuum(vacuum)?;
        quadrature.validate()?;

        let curvature = Curvature::from_density(1.0 - matter - vacuum);
        let mut result = FlrwNat {
            matter,
            vacuum,
            curvature,
            regime: Regime::General,
            quadrature,
            cache: Mutex::new(LruCache::new(CACHE_SIZE))
        };
        result.reselect();
        Ok(result)
    }

    fn reselect(&mut self) {
        self.curvature = Curvature::from_density(self.curvature_density());
        self.regime = Regime::select(self.matter, self.vacuum, &self.curvature);
        self.cache().clear();
        debug!(matter = self.matter, vacuum = self.vacuum,
               curvature = ?self.curvature, regime = ?self.regime, "model selected");
    }

    fn cache(&self) -> MutexGuard<'_, LruCache<u64, f64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn matter(&self) -> f64 { self.matter }
    pub fn vacuum(&self) -> f64 { self.vacuum }
    pub fn curvature(&self) -> Curvature { self.curvature }
    pub fn regime(&self) -> Regime { self.regime }
    pub fn quadrature(&self) -> Quadrature { self.quadrature }

    pub fn curvature_density(&self) -> f64 {
        1.0 - self.matter - self.vacuum
    }

    pub fn set_matter(&mut self, matter: f64) -> Result<(), Error> {
        self.matter = check_matter(matter)?;
        self.reselect();
        Ok(())
    }

    pub fn set_vacuum(&mut self, vacuum: f64) -> Result<(), Error> {
        self.vacuum = check_vacuum(vacuum)?;
        self.reselect();
        Ok(())
    }

    pub fn set_quadrature(&mut self, quadrature: Quadrature) -> Result<(), Error> {
        quadrature.validate()?;
        self.quadrature = quadrature;
        self.cache().clear();
        Ok(())
    }

    /// Squared expansion rate E^2 as a function of x = 1 + z.
    #[inline]
    fn e2(&self, x: f64) -> f64 {
        (self.matter * x + self.curvature_density()) * x * x + self.vacuum
    }

    /// Fails if E^2 goes negative anywhere on 1 + z in [lo, hi]; `hi` may be
    /// infinite. E^2 is a cubic in x with a single interior critical point.
    fn check_expansion(&self, lo: f64, hi: f64) -> Result<(), Error> {
        let imaginary = |x: f64| Error::Domain(
            format!("{} has an imaginary expansion rate at redshift {}", self, x - 1.0));

        if self.e2(lo) < 0.0 {
            return Err(imaginary(lo));
        }
        if hi.is_finite() {
            if self.e2(hi) < 0.0 {
                return Err(imaginary(hi));
            }
        } else if self.matter == 0.0 && self.curvature_density() < 0.0 {
            return Err(imaginary(hi));
        }
        if self.matter > 0.0 {
            let x = -2.0 * self.curvature_density() / (3.0 * self.matter);
            if x > lo && x < hi && self.e2(x) < 0.0 {
                return Err(imaginary(x));
            }
        }
        Ok(())
    }

    fn has_big_bang(&self) -> bool {
        self.matter > 0.0 || matches!(self.curvature, Curvature::Open { .. })
    }

    /// Integrand of the age and lookback time in the scale factor a = 1 / (1 + z).
    #[inline]
    fn time_integrand(&self, a: f64) -> f64 {
        (a / (self.matter + a * (self.curvature_density() + self.vacuum * a * a))).sqrt()
    }

    fn comoving_distance_quadrature(&self, z: f64) -> Result<f64, Error> {
        self.quadrature.integrate(|x| 1.0 / self.e2(1.0 + x).sqrt(), 0.0, z)
    }

    fn age_quadrature(&self, z: f64) -> Result<f64, Error> {
        self.quadrature.integrate(|a| self.time_integrand(a), 0.0, 1.0 / (1.0 + z))
    }

    /// In redshift up to z = 1, where [1 / (1 + z), 1] would lose its width
    /// to rounding; in scale factor beyond.
    fn lookback_time_quadrature(&self, z: f64) -> Result<f64, Error> {
        if z < 1.0 {
            self.quadrature.integrate(|x| 1.0 / ((1.0 + x) * self.e2(1.0 + x).sqrt()), 0.0, z)
        } else {
            self.quadrature.integrate(|a| self.time_integrand(a), 1.0 / (1.0 + z), 1.0)
        }
    }

    /// The dimensionless Hubble parameter E(z) = H(z) / H0.
    pub fn hubble(&self, z: f64) -> Result<f64, Error> {
        let z = check_redshift(z)?;
        self.check_expansion(1.0 + z, 1.0 + z)?;
        Ok(self.e2(1.0 + z).sqrt())
    }

    /// Comoving distance in the line of sight.
    pub fn comoving_distance_los(&self, z: f64) -> Result<f64, Error> {
        let z = check_redshift(z)?;
        self.check_expansion(1.0, 1.0 + z)?;

        if let Some(dc) = self.regime.comoving_distance(self.matter, self.vacuum, z) {
            return Ok(dc);
        }
        let key = z.to_bits();
        if let Some(dc) = self.cache().get_mut(&key) {
            return Ok(*dc);
        }
        let dc = self.comoving_distance_quadrature(z)?;
        self.cache().insert(key, dc);
        Ok(dc)
    }

    /// Comoving distance in the transverse direction.
    pub fn comoving_distance_transverse(&self, z: f64) -> Result<f64, Error> {
        Ok(self.curvature.sinn(self.comoving_distance_los(z)?))
    }

    pub fn angular_diameter_distance(&self, z: f64) -> Result<f64, Error> {
        Ok(self.comoving_distance_transverse(z)? / (1.0 + z))
    }

    pub fn luminosity_distance(&self, z: f64) -> Result<f64, Error> {
        Ok(self.comoving_distance_transverse(z)? * (1.0 + z))
    }

    /// Comoving volume per steradian out to redshift `z`.
    pub fn comoving_volume(&self, z: f64) -> Result<f64, Error> {
        Ok(self.curvature.volume(self.comoving_distance_los(z)?))
    }

    pub fn lookback_time(&self, z: f64) -> Result<f64, Error> {
        let z = check_redshift(z)?;
        self.check_expansion(1.0, 1.0 + z)?;

        match self.regime.lookback_time(self.matter, self.vacuum, z) {
            Some(t) => Ok(t),
            None => self.lookback_time_quadrature(z)
        }
    }

    /// Age of the universe today.
    pub fn age(&self) -> Result<f64, Error> {
        self.age_at(0.0)
    }

    /// Age of the universe at redshift `z`.
    pub fn age_at(&self, z: f64) -> Result<f64, Error> {
        let z = check_redshift(z)?;
        if !self.has_big_bang() {
            return Err(Error::Domain(format!("{} has no big bang, its age is undefined", self)));
        }
        self.check_expansion(1.0 + z, f64::INFINITY)?;

        match self.regime.age(self.matter, self.vacuum, z) {
            Some(t) => Ok(t),
            None => self.age_quadrature(z)
        }
    }
}

impl Clone for FlrwNat {
    fn clone(&self) -> Self {
        FlrwNat {
            matter: self.matter,
            vacuum: self.vacuum,
            curvature: self.curvature,
            regime: self.regime,
            quadrature: self.quadrature,
            cache: Mutex::new(LruCache::new(CACHE_SIZE))
        }
    }
}

impl fmt::Debug for FlrwNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlrwNat")
            .field("matter", &self.matter)
            .field("vacuum", &self.vacuum)
            .field("curvature", &self.curvature)
            .field("regime", &self.regime)
            .field("quadrature", &self.quadrature)
            .finish()
    }
}

impl fmt::Display for FlrwNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlrwNat(matter={}, vacuum={})", self.matter, self.vacuum)
    }
}
