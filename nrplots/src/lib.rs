#![allow(clippy::too_many_arguments)]

//! Plotting programs over the output of Einstein Toolkit simulations.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod figure;
pub mod logging;
pub mod naming;
pub mod render;

pub use error::{PlotError, Result};
