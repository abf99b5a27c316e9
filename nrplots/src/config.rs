// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::args::{CommonArgs, FigExtension, FigureArgs};
use crate::error::{PlotError, Result};
use crate::figure::FigureConfig;
use serde::{Deserialize, Serialize};
use simreader::{ScanOptions, SimDir};
use std::convert::TryFrom;
use std::fs::OpenOptions;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Defaults read from the `--config` JSON file. Options given on the
/// command line take precedence.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub datadir: Option<PathBuf>,
    pub outdir: Option<PathBuf>,
    pub fig_extension: Option<FigExtension>,
    pub as_markup: Option<bool>,
    pub fig_width: Option<u32>,
    pub fig_height: Option<u32>,
}

impl TryFrom<&PathBuf> for FileConfig {
    type Error = PlotError;

    fn try_from(json_path: &PathBuf) -> Result<Self> {
        let mut f = OpenOptions::new()
            .read(true)
            .open(json_path)
            .map_err(|e| PlotError::io(json_path, e))?;
        let mut json = String::new();
        f.read_to_string(&mut json)
            .map_err(|e| PlotError::io(json_path, e))?;
        serde_json::from_str(&json).map_err(|source| PlotError::Config {
            path: json_path.clone(),
            source,
        })
    }
}

/// Options of a run after merging the command line with the config
/// file.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub datadir: PathBuf,
    pub outdir: PathBuf,
    pub scan: ScanOptions,
    pub figure: FigureConfig,
}

impl Settings {
    pub fn resolve(common: &CommonArgs, figure: &FigureArgs) -> Result<Settings> {
        let file = match &common.config {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                FileConfig::try_from(path)?
            }
            None => FileConfig::default(),
        };
        let mut fig = FigureConfig::default();
        if let Some(width) = file.fig_width {
            fig = fig.with_width(width);
        }
        if let Some(height) = file.fig_height {
            fig = fig.with_height(height);
        }
        let as_markup = if figure.as_markup {
            true
        } else if figure.no_as_markup {
            false
        } else {
            file.as_markup.unwrap_or(false)
        };
        let fig = fig
            .with_extension(
                figure
                    .fig_extension
                    .or(file.fig_extension)
                    .unwrap_or_default(),
            )
            .with_as_markup(as_markup);
        Ok(Settings {
            datadir: common
                .datadir
                .clone()
                .or(file.datadir)
                .unwrap_or_else(|| PathBuf::from(".")),
            outdir: common
                .outdir
                .clone()
                .or(file.outdir)
                .unwrap_or_else(|| PathBuf::from(".")),
            scan: ScanOptions {
                ignore_symlinks: common.ignore_symlinks,
                ..ScanOptions::default()
            },
            figure: fig,
        })
    }

    pub fn open_sim(&self) -> Result<SimDir> {
        debug!("Opening simulation in {}", self.datadir.display());
        Ok(SimDir::new(&self.datadir, self.scan)?)
    }
}
