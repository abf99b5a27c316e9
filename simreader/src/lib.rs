#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

//! Read-only access to the ASCII output of Einstein Toolkit
//! simulations: scalar timeseries, apparent horizons and 2D grid
//! functions.

pub mod error;
pub mod gridfunctions;
pub mod hardio;
pub mod horizons;
pub mod math;
pub mod scalars;
pub mod simdir;
pub mod timeseries;

pub use error::{Result, SimError};
pub use gridfunctions::hierarchy::{
    HierarchicalGridData, UniformComponent, UniformGrid,
};
pub use gridfunctions::{GridFunction, GridFunctionsDir};
pub use horizons::shape::Shape;
pub use horizons::{HorizonsDir, OneHorizon};
pub use math::geometry::{BBox, CubeBounds, Plane};
pub use scalars::{Reduction, ScalarsDir};
pub use simdir::{ScanOptions, SimDir};
pub use timeseries::TimeSeries;
