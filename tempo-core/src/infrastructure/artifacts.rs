// tempo-core/src/infrastructure/artifacts.rs
//
// Run artifacts (quality reports, run summaries) are small JSON files a
// failed write must never leave half-written: write to a temp file in the
// same directory, then persist.

use std::io::Write;
use std::path::Path;

use crate::error::TempoError;
use crate::infrastructure::error::InfrastructureError;

pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

pub fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    data: &T,
) -> Result<(), TempoError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| TempoError::InternalError(format!("Serialization: {}", e)))?;
    atomic_write(path, content)?;
    Ok(())
}
