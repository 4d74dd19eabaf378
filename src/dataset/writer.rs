use std::{fs::File, io, path::Path};

use csv::Writer;
use log::info;

use super::Result;

/// Written in place of a class when the network had no output to pick from.
const NO_CLASS: i64 = -1;

/// Writes one prediction per line as `ImageId,Label`, ids starting at 1.
pub fn write_predictions<P: AsRef<Path>>(path: P, predictions: &[Option<usize>]) -> Result<()> {
    let path = path.as_ref();
    write_predictions_to(File::create(path)?, predictions)?;

    info!("wrote {} predictions to {}", predictions.len(), path.display());
    Ok(())
}

/// Same as `write_predictions` but writes to any writer.
pub fn write_predictions_to<W: io::Write>(writer: W, predictions: &[Option<usize>]) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(["ImageId", "Label"])?;

    for (i, prediction) in predictions.iter().enumerate() {
        let label = prediction.map_or(NO_CLASS, |class| class as i64);
        writer.serialize((i + 1, label))?;
    }

    writer.flush()?;
    Ok(())
}
