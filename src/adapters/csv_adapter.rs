//! CSV input and output: simulated action logs and balance series.
//!
//! Action files have the header `direction,symbol,amount`; series files are
//! written as `day,label,balance`.

use crate::domain::error::LendsimError;
use crate::domain::interest::SeriesPoint;
use crate::domain::session::Action;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub fn read_actions<P: AsRef<Path>>(path: P) -> Result<Vec<Action>, LendsimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LendsimError::Csv {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    read_actions_from(file)
}

pub fn read_actions_from<R: Read>(reader: R) -> Result<Vec<Action>, LendsimError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut actions = Vec::new();
    for (line, result) in rdr.deserialize::<Action>().enumerate() {
        let action = result.map_err(|e| LendsimError::Csv {
            reason: format!("row {}: {}", line + 1, e),
        })?;
        actions.push(action);
    }
    Ok(actions)
}

pub fn write_series<P: AsRef<Path>>(path: P, series: &[SeriesPoint]) -> Result<(), LendsimError> {
    let file = File::create(path.as_ref())?;
    write_series_to(file, series)
}

pub fn write_series_to<W: Write>(writer: W, series: &[SeriesPoint]) -> Result<(), LendsimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in series {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}
