use crate::cosmology::{Parameters};
use crate::error::{Error};
use crate::flrw::{Flrw};
use crate::flrw_nat::{FlrwNat};
use crate::numeric::{Quadrature};

use serde::{Deserialize, Serialize};
use tracing::debug;

use std::path::Path;

/// Contents of a TOML configuration file, e.g.
///
/// ```toml
/// [cosmology]
/// hubble = 70.0
/// matter = 0.3
/// vacuum = 0.7
///
/// [quadrature]
/// epsrel = 1e-10
/// ```
///
/// Missing tables and keys take their defaults (Planck 2015, standard
/// quadrature tolerances).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cosmology: Parameters,
    pub quadrature: Quadrature
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.cosmology.validate()?;
        self.quadrature.validate()
    }

    pub fn metric(&self) -> Result<Flrw, Error> {
        let p = &self.cosmology;
        Flrw::with_quadrature(p.hubble, p.matter, p.vacuum, self.quadrature)
    }

    pub fn natural_metric(&self) -> Result<FlrwNat, Error> {
        FlrwNat::with_quadrature(self.cosmology.matter, self.cosmology.vacuum, self.quadrature)
    }
}
