// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scalar and reduction timeseries (`CarpetIOScalar`, 0D
//! `CarpetIOASCII`).

use crate::error::{Result, SimError};
use crate::hardio::{find_data_columns, read_header, visit_rows};
use crate::timeseries::TimeSeries;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

static SCALAR_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>[^.]+)\.?(?P<red>minimum|maximum|norm1|norm2|average|infnorm)?\.asc$",
    )
    .unwrap()
});

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub enum Reduction {
    Scalar,
    Minimum,
    Maximum,
    Norm1,
    Norm2,
    Average,
    Infnorm,
}

impl Reduction {
    pub const ALL: [Reduction; 7] = [
        Reduction::Scalar,
        Reduction::Minimum,
        Reduction::Maximum,
        Reduction::Norm1,
        Reduction::Norm2,
        Reduction::Average,
        Reduction::Infnorm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reduction::Scalar => "scalar",
            Reduction::Minimum => "minimum",
            Reduction::Maximum => "maximum",
            Reduction::Norm1 => "norm1",
            Reduction::Norm2 => "norm2",
            Reduction::Average => "average",
            Reduction::Infnorm => "infnorm",
        }
    }
}

impl Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Reduction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Reduction::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown reduction: {}", s))
    }
}

/// Classify a file name as scalar output. Returns the file stem (group
/// or variable) and the reduction.
pub fn classify(file_name: &str) -> Option<(String, Reduction)> {
    let caps = SCALAR_FILE.captures(file_name)?;
    let name = caps.name("name")?.as_str().to_string();
    let red = match caps.name("red") {
        Some(m) => Reduction::from_str(m.as_str()).ok()?,
        None => Reduction::Scalar,
    };
    Some((name, red))
}

/// Where a variable lives inside a file.
#[derive(Clone, Debug, PartialEq)]
struct ScalarSource {
    path: PathBuf,
    time_col: usize,
    data_col: usize,
}

impl ScalarSource {
    fn read_into(&self, samples: &mut Vec<(f64, f64)>) -> Result<()> {
        let need = self.time_col.max(self.data_col);
        visit_rows(&self.path, |line, row| {
            if row.len() <= need {
                return Err(SimError::parse(
                    &self.path,
                    line,
                    format!(
                        "expected at least {} columns, found {}",
                        need + 1,
                        row.len()
                    ),
                ));
            }
            samples.push((row[self.time_col], row[self.data_col]));
            Ok(())
        })
    }
}

fn strip_thorn(name: &str) -> String {
    match name.rsplit_once("::") {
        Some((_, var)) => var.to_string(),
        None => name.to_string(),
    }
}

/// Variables declared by one file, with their columns.
fn variables_in(path: &Path, stem: &str) -> Result<Vec<(String, ScalarSource)>> {
    let header = read_header(path)?;
    if let Some(columns) = find_data_columns(&header) {
        let time_col = 1;
        return Ok(columns
            .into_iter()
            .map(|(col, name)| {
                (
                    strip_thorn(&name),
                    ScalarSource {
                        path: path.to_path_buf(),
                        time_col,
                        data_col: col,
                    },
                )
            })
            .collect());
    }

    let carpet_0d = header.iter().any(|c| {
        c.starts_with("column format:") && c.contains("9:time")
    });
    let (time_col, data_col) = if carpet_0d { (8, 12) } else { (1, 2) };
    let name = match stem.rsplit_once('-') {
        Some((_, var)) => var,
        None => stem,
    };
    Ok(vec![(
        name.to_string(),
        ScalarSource {
            path: path.to_path_buf(),
            time_col,
            data_col,
        },
    )])
}

/// All the scalar timeseries found in a simulation, keyed by reduction
/// and then by variable name.
#[derive(Clone, Debug, Default)]
pub struct ScalarsDir {
    sources: BTreeMap<Reduction, BTreeMap<String, Vec<ScalarSource>>>,
}

impl ScalarsDir {
    /// Index `files`. Files that do not look like scalar output are
    /// ignored. The order of `files` is the merge order of restarts.
    pub fn new(files: &[PathBuf]) -> Result<ScalarsDir> {
        let mut sources: BTreeMap<
            Reduction,
            BTreeMap<String, Vec<ScalarSource>>,
        > = BTreeMap::new();
        for path in files {
            let file_name =
                match path.file_name().and_then(|f| f.to_str()) {
                    Some(f) => f,
                    None => continue,
                };
            if let Some((stem, red)) = classify(file_name) {
                for (var, source) in variables_in(path, &stem)? {
                    debug!(
                        "Found {} ({}) in {}",
                        var,
                        red,
                        path.display()
                    );
                    sources
                        .entry(red)
                        .or_default()
                        .entry(var)
                        .or_default()
                        .push(source);
                }
            }
        }
        Ok(ScalarsDir { sources })
    }

    pub fn reduction(&self, reduction: Reduction) -> ReductionReader<'_> {
        ReductionReader {
            reduction,
            vars: self.sources.get(&reduction),
        }
    }
}

/// Variables available for one reduction.
pub struct ReductionReader<'a> {
    reduction: Reduction,
    vars: Option<&'a BTreeMap<String, Vec<ScalarSource>>>,
}

impl<'a> ReductionReader<'a> {
    pub fn available_variables(&self) -> Vec<String> {
        self.vars
            .map(|v| v.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.map_or(false, |v| v.contains_key(name))
    }

    /// Read `name`, merging every file that carries it.
    pub fn get(&self, name: &str) -> Result<TimeSeries> {
        let sources =
            self.vars.and_then(|v| v.get(name)).ok_or_else(|| {
                SimError::unavailable_variable(
                    name,
                    self.reduction.as_str(),
                    self.available_variables().iter(),
                )
            })?;
        let mut samples = vec![];
        for source in sources {
            source.read_into(&mut samples)?;
        }
        TimeSeries::from_samples(name, samples)
    }
}

impl<'a> Display for ReductionReader<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Available {} timeseries: [{}]",
            self.reduction,
            self.available_variables().join(", ")
        )
    }
}
