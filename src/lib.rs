//! Distances, times and volumes in Friedmann-Lemaitre-Robertson-Walker
//! cosmologies with matter and a cosmological constant.

pub mod config;
pub mod cosmology;
pub mod curvature;
pub mod error;
pub mod flrw;
pub mod flrw_nat;
pub mod metric;
pub mod numeric;
pub mod regime;
pub mod table;

pub use config::Config;
pub use cosmology::{Parameters, PLANCK_2015};
pub use curvature::Curvature;
pub use error::Error;
pub use flrw::Flrw;
pub use flrw_nat::FlrwNat;
pub use metric::Metric;
pub use numeric::Quadrature;
pub use table::{tabulate, Quantity};
