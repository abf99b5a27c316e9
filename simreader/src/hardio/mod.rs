// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-oriented access to the ASCII files written by Cactus thorns.
//!
//! All the formats read by this crate share the same conventions:
//! comment lines start with `#`, blocks are separated by blank lines and
//! columns are separated by whitespace.

use crate::error::{Result, SimError};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of an ASCII output file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line<'a> {
    /// Comment text, without the leading `#` characters.
    Comment(&'a str),
    Blank,
    Data(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Line<'a> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Line::Blank
        } else if let Some(rest) = trimmed.strip_prefix('#') {
            Line::Comment(rest.trim_start_matches('#').trim())
        } else {
            Line::Data(trimmed)
        }
    }
}

pub fn get_read_file(path: &Path) -> Result<BufReader<File>> {
    OpenOptions::new()
        .read(true)
        .open(path)
        .map(BufReader::new)
        .map_err(|e| SimError::io(path, e))
}

/// Parse the whitespace separated columns of a data line.
pub fn parse_row(
    data: &str,
    path: &Path,
    line: usize,
) -> Result<Vec<f64>> {
    data.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                SimError::parse(
                    path,
                    line,
                    format!("could not parse {:?} as a number", tok),
                )
            })
        })
        .collect()
}

/// Visit every line of `path`. The callback receives the 1-based line
/// number with the classified line.
pub fn visit_lines<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, Line) -> Result<()>,
{
    let reader = get_read_file(path)?;
    for (ix, raw) in reader.lines().enumerate() {
        let raw = raw.map_err(|e| SimError::io(path, e))?;
        f(ix + 1, Line::classify(&raw))?;
    }
    Ok(())
}

/// Visit every data row of `path`, already split into numbers.
pub fn visit_rows<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &[f64]) -> Result<()>,
{
    visit_lines(path, |line, l| match l {
        Line::Data(data) => {
            let row = parse_row(data, path, line)?;
            f(line, &row)
        }
        _ => Ok(()),
    })
}

/// Comment lines preceding the first data line.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let reader = get_read_file(path)?;
    let mut header = vec![];
    for raw in reader.lines() {
        let raw = raw.map_err(|e| SimError::io(path, e))?;
        match Line::classify(&raw) {
            Line::Comment(c) => header.push(c.to_string()),
            Line::Blank => {}
            Line::Data(_) => break,
        }
    }
    Ok(header)
}

/// Parse a `data columns: 3:rho 4:press` comment into 0-based column
/// indices and variable names.
pub fn parse_data_columns(comment: &str) -> Option<Vec<(usize, String)>> {
    let rest = comment.strip_prefix("data columns:")?;
    let columns = rest
        .split_whitespace()
        .filter_map(|entry| {
            let (num, name) = entry.split_once(':')?;
            let num: usize = num.parse().ok()?;
            if num == 0 || name.is_empty() {
                None
            } else {
                Some((num - 1, name.to_string()))
            }
        })
        .collect::<Vec<(usize, String)>>();
    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

/// Find the `data columns` declaration in a header, if any.
pub fn find_data_columns(
    header: &[String],
) -> Option<Vec<(usize, String)>> {
    header.iter().find_map(|c| parse_data_columns(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_lines() {
        assert_eq!(Line::classify("  "), Line::Blank);
        assert_eq!(
            Line::classify("### +z patch"),
            Line::Comment("+z patch")
        );
        assert_eq!(Line::classify(" 1 2 3 "), Line::Data("1 2 3"));
    }

    #[test]
    fn data_columns_are_zero_based() {
        let cols =
            parse_data_columns("data columns: 3:rho 4:press").unwrap();
        assert_eq!(
            cols,
            vec![(2, "rho".to_string()), (3, "press".to_string())]
        );
        assert!(parse_data_columns("column format: 1:it").is_none());
    }

    #[test]
    fn rows_report_line_numbers() {
        let err = parse_row("1 x", Path::new("f.asc"), 7).unwrap_err();
        assert!(err.to_string().starts_with("f.asc:7:"));
        let row = parse_row("1 2.5 nan", Path::new("f.asc"), 1).unwrap();
        assert_eq!(row[1], 2.5);
        assert!(row[2].is_nan());
    }
}
