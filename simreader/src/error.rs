// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not scan simulation directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}:{line}: {msg}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    /// Requested apparent horizon index is not in the data.
    #[error("Apparent horizons {0} is not available")]
    HorizonUnavailable(u32),
    #[error("Variable {name} is not available for {kind} (available: {available})")]
    VariableUnavailable {
        name: String,
        kind: String,
        available: String,
    },
    #[error("Iteration {0} is not available")]
    IterationUnavailable(i64),
    #[error("Shape of horizon {ah} is not available at time {time}")]
    ShapeUnavailable { ah: u32, time: f64 },
    #[error("malformed grid data in {}: {msg}", path.display())]
    MalformedGrid { path: PathBuf, msg: String },
    #[error("no samples found for {0}")]
    EmptySeries(String),
}

impl SimError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SimError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        msg: impl Into<String>,
    ) -> Self {
        SimError::Parse {
            path: path.into(),
            line,
            msg: msg.into(),
        }
    }

    pub fn unavailable_variable<'a, I>(
        name: &str,
        kind: &str,
        available: I,
    ) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        SimError::VariableUnavailable {
            name: name.into(),
            kind: kind.into(),
            available: available
                .into_iter()
                .map(|s| s.as_str())
                .collect::<Vec<&str>>()
                .join(", "),
        }
    }
}
