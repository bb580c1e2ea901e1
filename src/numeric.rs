use crate::error::{Error};

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Kronrod abscissae on [-1, 1], largest first; the odd entries are the
/// 7-point Gauss nodes, the last entry is the centre.
const XGK: [f64; 8] =
    [ 0.991455371120812639206854697526329
    , 0.949107912342758524526189684047851
    , 0.864864423359769072789712788640926
    , 0.741531185599394439863864773280788
    , 0.586087235467691130294144845693013
    , 0.405845151377397166906606412076961
    , 0.207784955007898467600689403773245
    , 0.000000000000000000000000000000000 ];

const WGK: [f64; 8] =
    [ 0.022935322010529224963732008058970
    , 0.063092092629978553290700663189204
    , 0.104790010322250183839876322541518
    , 0.140653259715525918745189590510238
    , 0.169004726639267902826583426598550
    , 0.190350578064785409913256402421014
    , 0.204432940075298892414161999234649
    , 0.209482141084727828012999174891714 ];

const WG: [f64; 4] =
    [ 0.129484966168869693270611432679082
    , 0.279705391489276667901467771423780
    , 0.381830050505118944950369775488975
    , 0.417959183673469387755102040816327 ];

/// Tolerances and subdivision budget of the adaptive integrator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quadrature {
    pub epsrel: f64,
    pub epsabs: f64,
    pub limit: usize
}

impl Default for Quadrature {
    fn default() -> Self {
        Quadrature { epsrel: 1e-8, epsabs: 1e-12, limit: 200 }
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64
}

fn gauss_kronrod<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Segment {
    let c = 0.5 * (a + b);
    let h = 0.5 * (b - a);

    let fc = f(c);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];
    for j in 0..7 {
        let dx = h * XGK[j];
        let pair = f(c - dx) + f(c + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment { a, b, value: kronrod * h, error: ((kronrod - gauss) * h).abs() }
}

impl Quadrature {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.epsrel.is_finite() || self.epsrel < 0.0 {
            return Err(Error::parameter("epsrel", self.epsrel, "must be finite and non-negative"));
        }
        if !self.epsabs.is_finite() || self.epsabs < 0.0 {
            return Err(Error::parameter("epsabs", self.epsabs, "must be finite and non-negative"));
        }
        if self.epsrel == 0.0 && self.epsabs == 0.0 {
            return Err(Error::parameter("epsrel", self.epsrel, "one tolerance must be positive"));
        }
        if self.limit == 0 {
            return Err(Error::parameter("limit", 0.0, "must allow at least one interval"));
        }
        Ok(())
    }

    /// Integrate `f` over the finite interval [a, b], bisecting the segment
    /// with the largest error estimate until the total error is within
    /// tolerance or `limit` segments are in use.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F, a: f64, b: f64) -> Result<f64, Error> {
        if a == b {
            return Ok(0.0);
        }

        let mut segments = vec![gauss_kronrod(&f, a, b)];
        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();

            if !value.is_finite() || !error.is_finite() {
                return Err(Error::Integration { subdivisions: segments.len(), error: f64::INFINITY });
            }
            if error <= self.epsabs.max(self.epsrel * value.abs()) {
                trace!(a, b, value, error, segments = segments.len(), "quadrature converged");
                return Ok(value);
            }
            if segments.len() >= self.limit {
                return Err(Error::Integration { subdivisions: segments.len(), error });
            }

            let (worst, _) = segments.iter().enumerate()
                .fold((0, f64::NEG_INFINITY), |(i, e), (j, s)| {
                    if s.error > e { (j, s.error) } else { (i, e) }
                });
            let s = segments.swap_remove(worst);
            let mid = 0.5 * (s.a + s.b);
            segments.push(gauss_kronrod(&f, s.a, mid));
            segments.push(gauss_kronrod(&f, mid, s.b));
        }
    }
}
