use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use ndarray::Array2;

use super::{DataErr, Dataset, Result};

const PROGRESS_EVERY: usize = 1000;

/// Reads a labelled dataset from a CSV file.
///
/// The first line is a header and is skipped. Every other line is `label,x_1,..,x_k`.
///
/// # Arguments
/// * `path` - The CSV file.
/// * `limit` - The maximum amount of records to read, `None` reads them all.
pub fn read_dataset<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Dataset> {
    let path = path.as_ref();
    info!("reading dataset from {}", path.display());
    read_dataset_from(File::open(path)?, limit)
}

/// Same as `read_dataset` but reads from any reader.
pub fn read_dataset_from<R: io::Read>(reader: R, limit: Option<usize>) -> Result<Dataset> {
    let rows = read_rows(reader, limit)?;
    Dataset::from_rows(&rows)
}

/// Reads an unlabelled feature matrix from a CSV file, one example per line after the header.
///
/// # Arguments
/// * `path` - The CSV file.
/// * `limit` - The maximum amount of records to read, `None` reads them all.
pub fn read_features<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Array2<f32>> {
    let path = path.as_ref();
    info!("reading features from {}", path.display());
    read_features_from(File::open(path)?, limit)
}

/// Same as `read_features` but reads from any reader.
pub fn read_features_from<R: io::Read>(reader: R, limit: Option<usize>) -> Result<Array2<f32>> {
    let rows = read_rows(reader, limit)?;

    let width = rows.first().map(Vec::len).unwrap_or_default();
    if width == 0 {
        return Err(DataErr::Empty);
    }

    let mut data = Vec::with_capacity(rows.len() * width);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(DataErr::RowWidth {
                row: i,
                got: row.len(),
                expected: width,
            });
        }

        data.extend_from_slice(row);
    }

    Ok(Array2::from_shape_vec((rows.len(), width), data)?)
}

fn read_rows<R: io::Read>(reader: R, limit: Option<usize>) -> Result<Vec<Vec<f32>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader
        .records()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
    {
        rows.push(parse_record(i, &record?)?);

        if (i + 1) % PROGRESS_EVERY == 0 {
            debug!("read {} records", i + 1);
        }
    }

    info!(records = rows.len(); "finished reading");
    Ok(rows)
}

fn parse_record(row: usize, record: &StringRecord) -> Result<Vec<f32>> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            field.trim().parse().map_err(|_| DataErr::Parse {
                row,
                column,
                value: field.to_string(),
            })
        })
        .collect()
}
