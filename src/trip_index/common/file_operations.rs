use crate::error::TripInsightsError;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::Serialize;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `object` as pretty JSON; readers never observe a partially written file
pub fn atomic_save_json<T: Serialize>(path: &Path, object: &T) -> Result<(), TripInsightsError> {
    let af = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    let res = af.write(|f| {
        let mut writer = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut writer, object)?;
        writer.flush()?;
        Ok::<(), io::Error>(())
    });
    match res {
        Ok(_) => Ok(()),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string()).into()),
    }
}
