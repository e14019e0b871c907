// metaindex-core/src/infrastructure/fs.rs

use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

/// Writes `records` as newline-delimited JSON, replacing `path` atomically.
///
/// The records go to a temporary file next to `path` which is then renamed
/// over it, so a bulk loader never reads a half written file.
pub fn write_ndjson_atomic<P, T>(path: P, records: &[T]) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let temp_file = tempfile::NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;
    Ok(())
}

/// Pretty JSON variant of the same atomic replace.
pub fn write_json_atomic<P, T>(path: P, value: &T) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut temp_file, value)?;
    temp_file.write_all(b"\n")?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;
    Ok(())
}
