use crate::cosmology::{self, Parameters, check_hubble, PC_PER_MPC, RAD_PER_ARCSEC};
use crate::curvature::{Curvature};
use crate::error::{Error};
use crate::flrw_nat::{FlrwNat};
use crate::numeric::{Quadrature};

use tracing::debug;

use std::fmt;

/// The Friedmann-Lemaitre-Robertson-Walker metric in physical units.
///
/// Distances are in Mpc, times in Gyr and volumes in Mpc^3 / sr. All queries
/// are the natural-unit ones scaled by the Hubble radius or Hubble time.
#[derive(Clone, Debug)]
pub struct Flrw {
    hubble: f64,
    nat: FlrwNat
}

impl Flrw {
    /// Hubble parameter in km / s / Mpc, dimensionless matter and vacuum
    /// energy densities.
    pub fn new(hubble: f64, matter: f64, vacuum: f64) -> Result<Self, Error> {
        Self::with_quadrature(hubble, matter, vacuum, Quadrature::default())
    }

    pub fn with_quadrature(hubble: f64, matter: f64, vacuum: f64, quadrature: Quadrature) -> Result<Self, Error> {
        check_hubble(hubble)?;
        let nat = FlrwNat::with_quadrature(matter, vacuum, quadrature)?;
        Ok(Flrw { hubble, nat })
    }

    pub fn from_parameters(p: &Parameters) -> Result<Self, Error> {
        Self::new(p.hubble, p.matter, p.vacuum)
    }

    pub fn parameters(&self) -> Parameters {
        Parameters { hubble: self.hubble, matter: self.nat.matter(), vacuum: self.nat.vacuum() }
    }

    /// The same model in natural units.
    pub fn natural(&self) -> &FlrwNat { &self.nat }

    pub fn hubble(&self) -> f64 { self.hubble }
    pub fn matter(&self) -> f64 { self.nat.matter() }
    pub fn vacuum(&self) -> f64 { self.nat.vacuum() }
    pub fn curvature(&self) -> Curvature { self.nat.curvature() }
    pub fn curvature_density(&self) -> f64 { self.nat.curvature_density() }

    pub fn set_hubble(&mut self, hubble: f64) -> Result<(), Error> {
        self.hubble = check_hubble(hubble)?;
        debug!(hubble, "hubble parameter changed");
        Ok(())
    }

    pub fn set_matter(&mut self, matter: f64) -> Result<(), Error> {
        self.nat.set_matter(matter)
    }

    pub fn set_vacuum(&mut self, vacuum: f64) -> Result<(), Error> {
        self.nat.set_vacuum(vacuum)
    }

    /// c / H0 in Mpc.
    pub fn hubble_radius(&self) -> f64 {
        cosmology::hubble_radius(self.hubble)
    }

    /// 1 / H0 in Gyr.
    pub fn hubble_time(&self) -> f64 {
        cosmology::hubble_time(self.hubble)
    }

    /// H(z) in km / s / Mpc.
    pub fn hubble_parameter(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble * self.nat.hubble(z)?)
    }

    pub fn comoving_distance_los(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_radius() * self.nat.comoving_distance_los(z)?)
    }

    pub fn comoving_distance_transverse(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_radius() * self.nat.comoving_distance_transverse(z)?)
    }

    pub fn angular_diameter_distance(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_radius() * self.nat.angular_diameter_distance(z)?)
    }

    pub fn luminosity_distance(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_radius() * self.nat.luminosity_distance(z)?)
    }

    pub fn comoving_volume(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_radius().powi(3) * self.nat.comoving_volume(z)?)
    }

    pub fn lookback_time(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_time() * self.nat.lookback_time(z)?)
    }

    pub fn age(&self) -> Result<f64, Error> {
        Ok(self.hubble_time() * self.nat.age()?)
    }

    pub fn age_at(&self, z: f64) -> Result<f64, Error> {
        Ok(self.hubble_time() * self.nat.age_at(z)?)
    }

    /// Proper size in pc subtended by one arc second at redshift `z`.
    pub fn angular_scale(&self, z: f64) -> Result<f64, Error> {
        Ok(self.angular_diameter_distance(z)? * PC_PER_MPC * RAD_PER_ARCSEC)
    }
}

impl fmt::Display for Flrw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flrw(hubble={}, matter={}, vacuum={})", self.hubble, self.matter(), self.vacuum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    type Table = [((f64, f64, f64), [(f64, f64); 5])];

    fn check(table: &Table, query: fn(&Flrw, f64) -> Result<f64, Error>) {
        for &((h, m, v), rows) in table {
            let metric = Flrw::new(h, m, v).unwrap();
            for &(expected, z) in rows.iter() {
                let got = query(&metric, z).unwrap();
                assert!(((got - expected) / expected).abs() < 2e-5,
                        "{} at z = {}: got {}, expected {}", metric, z, got, expected);
            }
        }
    }

    #[test]
    fn test_luminosity_distance_table() {
        let table = [
            ((50., 0.0, 0.0), [(5.99884708458, 0.001), (60.258284058, 0.01), (629.5641618, 0.1),
                               (8993.77374, 1.), (359750.9496, 10.)]),
            ((70., 0.3, 0.7), [(4.28606, 0.001), (43.1582, 0.01), (460.299, 0.1),
                               (6607.65, 1.), (103843., 10.)]),
            ((50., 0.0, 0.5), [(6.00034529785633, 0.001), (60.4074354667724, 0.01), (643.848885216858, 0.1),
                               (10045.7135751853, 1.), (420755.759629146, 10.)]),
            ((50., 0.0, 1.0), [(6.00184500916, 0.001), (60.558076516, 0.01), (659.5434076, 0.1),
                               (11991.69832, 1.), (659543.4076, 10.)]),
            ((50., 0.5, 0.0), [(5.99809, 0.001), (60.1827, 0.01), (621.524, 0.1),
                               (7812.96, 1.), (135543., 10.)]),
            ((50., 1.0, 0.0), [(5.99734, 0.001), (60.1076, 0.01), (613.868, 0.1),
                               (7024.57, 1.), (92136.7, 10.)]),
            ((50., 0.3, 0.2), [(5.99899, 0.001), (60.2722, 0.01), (630.081, 0.1),
                               (8470.22, 1.), (168260., 10.)]),
        ];
        check(&table, Flrw::luminosity_distance);
    }

    #[test]
    fn test_angular_and_comoving_distance_tables() {
        check(&[((50., 1.0, 0.0), [(5.98537, 0.001), (58.9232, 0.01), (507.329, 0.1),
                                    (1756.14, 1.), (761.460, 10.)])],
              Flrw::angular_diameter_distance);
        check(&[((50., 1.0, 0.0), [(5.99135, 0.001), (59.5125, 0.01), (558.062, 0.1),
                                    (3512.28, 1.), (8376.05, 10.)])],
              Flrw::comoving_distance_transverse);

        let table = [
            ((50., 1.0, 0.0), [(5.99135, 0.001), (59.5125, 0.01), (558.062, 0.1),
                               (3512.28, 1.), (8376.05, 10.)]),
            ((50., 0.5, 0.6), [(5.99390, 0.001), (59.7635, 0.01), (580.027, 0.1),
                               (4275.74, 1.), (11212.1, 10.)]),
            ((50., 0.5, 0.4), [(5.99330, 0.001), (59.7042, 0.01), (574.702, 0.1),
                               (4085.51, 1.), (10714.2, 10.)]),
        ];
        check(&table, Flrw::comoving_distance_los);
    }

    #[test]
    fn test_age_table() {
        let table = [
            ((50., 0.0, 0.0), [(19.55584444, 0.), (17.7780, 0.1), (9.77792222, 1.),
                               (1.77780, 10.), (0.193622, 100.)]),
            ((70., 0.3, 0.7), [(13.4669, 0.), (12.1656, 0.1), (5.75164, 1.),
                               (0.465887, 10.), (0.0167499, 100.)]),
            ((50., 0.0, 0.5), [(24.3753, 0.), (22.5565, 0.1), (13.3084, 1.),
                               (2.51074, 10.), (0.273818, 100.)]),
            ((50., 0.5, 0.0), [(14.7362, 0.), (12.9794, 0.1), (5.73993, 1.),
                               (0.492223, 10.), (0.0181106, 100.)]),
            ((50., 1.0, 0.0), [(13.037229, 0.), (11.3004, 0.1), (4.60935, 1.),
                               (0.357352, 10.), (0.0128440, 100.)]),
            ((50., 0.3, 0.2), [(16.5055784617336, 0.), (14.7250045860962, 0.1), (6.87687623769365, 1.),
                               (0.624924600328037, 10.), (0.0233349119803707, 100.)]),
            ((70., 0.23, 0.73), [(14.2684, 0.), (12.9629, 0.1), (6.33995, 1.),
                                 (0.529525558080137, 10.), (0.0191199557036697, 100.)]),
        ];
        check(&table, Flrw::age_at);
    }

    #[test]
    fn test_volume_table() {
        let table = [
            ((50., 0.5, 0.0), [(71.7161408548458, 1e-3), (70522.0339930576, 1e-2), (60047832.08635, 1e-1),
                               (18733087921.7912, 1.), (425218980174.27, 10.)]),
            ((71., 0.31, 0.70), [(25.0766380119768, 1e-3), (24922.5144468078, 1e-2), (23387784.8229885, 1e-1),
                                 (11406084150.5617, 1.), (259503559696.949, 10.)]),
            ((50., 1.0, 0.0), [(71.6892647166395, 1e-3), (70259., 1e-2), (5.79331e+07, 1e-1),
                               (1.44427e+10, 1.), (1.95883e+11, 10.)]),
            ((71., 0.27, 0.73), [(25.078518575672, 1e-3), (24941.2341109484, 1e-2), (23565185.7509809, 1e-1),
                                 (12169565883.3662, 1.), (300884961157.615, 10.)]),
        ];
        check(&table, Flrw::comoving_volume);
    }

    #[test]
    fn test_lambda_cdm_benchmarks() {
        let metric = Flrw::new(70.0, 0.3, 0.7).unwrap();
        assert_approx_eq!(metric.luminosity_distance(1.0).unwrap(), 6607.0, 66.0);
        assert_approx_eq!(metric.age().unwrap(), 13.5, 0.27);
        assert_eq!(metric.age().unwrap(), metric.age_at(0.0).unwrap());
        assert_approx_eq!(metric.hubble_radius(), 4282.749, 1e-3);
        assert_approx_eq!(metric.hubble_parameter(0.0).unwrap(), 70.0, 1e-12);
    }

    #[test]
    fn test_distance_relations() {
        let metric = Flrw::new(70.0, 0.3, 0.2).unwrap();
        for &z in &[0.01, 0.5, 1.0, 4.0] {
            let dm = metric.comoving_distance_transverse(z).unwrap();
            let da = metric.angular_diameter_distance(z).unwrap();
            let dl = metric.luminosity_distance(z).unwrap();
            assert_approx_eq!(da, dl / ((1.0 + z) * (1.0 + z)), 1e-9 * dl);
            assert_approx_eq!(dm, da * (1.0 + z), 1e-9 * dm);
            assert_approx_eq!(metric.angular_scale(z).unwrap(), da * 1e6 * std::f64::consts::PI / 648000.0, 1e-9 * da);
        }
    }

    #[test]
    fn test_angular_scale() {
        // about 8 kpc per arc second at z = 1 for the concordance model
        let metric = Flrw::new(70.0, 0.3, 0.7).unwrap();
        assert_approx_eq!(metric.angular_scale(1.0).unwrap(), 8008.0, 10.0);
    }

    #[test]
    fn test_constructor_validation() {
        assert!(matches!(Flrw::new(70.0, -0.1, 0.7), Err(Error::InvalidParameter { name: "matter", .. })));
        assert!(matches!(Flrw::new(0.0, 0.3, 0.7), Err(Error::InvalidParameter { name: "hubble", .. })));
        assert!(matches!(Flrw::new(f64::NAN, 0.3, 0.7), Err(Error::InvalidParameter { .. })));
        assert!(matches!(Flrw::new(70.0, 0.3, f64::INFINITY), Err(Error::InvalidParameter { .. })));
        let metric = Flrw::new(70.0, 0.3, 0.7).unwrap();
        assert_eq!(metric.luminosity_distance(-0.5), Err(Error::InvalidRedshift(-0.5)));
    }

    #[test]
    fn test_setters_round_trip() {
        let mut metric = Flrw::new(70.0, 0.3, 0.7).unwrap();
        metric.set_hubble(67.8).unwrap();
        metric.set_matter(0.308).unwrap();
        metric.set_vacuum(0.692).unwrap();
        assert_eq!(metric.parameters(), cosmology::PLANCK_2015);

        assert!(metric.set_hubble(-1.0).is_err());
        assert!(metric.set_matter(f64::NAN).is_err());
        assert_eq!(metric.hubble(), 67.8);
        assert_eq!(metric.matter(), 0.308);

        let before = metric.luminosity_distance(1.0).unwrap();
        metric.set_hubble(2.0 * 67.8).unwrap();
        assert_approx_eq!(metric.luminosity_distance(1.0).unwrap(), before / 2.0, 1e-9 * before);
    }

    #[test]
    fn test_display() {
        let metric = Flrw::new(70.0, 0.3, 0.7).unwrap();
        assert_eq!(metric.to_string(), "Flrw(hubble=70, matter=0.3, vacuum=0.7)");
    }
}
