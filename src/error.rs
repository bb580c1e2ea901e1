use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    #[error("invalid redshift {0}: must be finite and non-negative")]
    InvalidRedshift(f64),

    #[error("integration did not converge within {subdivisions} subdivisions (error estimate {error:e})")]
    Integration { subdivisions: usize, error: f64 },

    #[error("unphysical model: {0}")]
    Domain(String),

    #[error("unsupported in natural units: {0}")]
    Unsupported(&'static str),

    #[error("argument error: {0}")]
    Argument(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn parameter(name: &'static str, value: f64, reason: &'static str) -> Error {
        Error::InvalidParameter { name, value, reason }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(format!("{}", e))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Error {
        Error::Config(format!("{}", e))
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(e: std::num::ParseFloatError) -> Error {
        Error::Argument(format!("{}", e))
    }
}
