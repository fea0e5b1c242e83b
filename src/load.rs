use std::path::Path;

use crate::error::BmpError;

/// Read a whole file into memory in one blocking call.
///
/// The handle is closed before this returns; the caller owns the buffer.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, BmpError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| BmpError::Io {
        path: path.to_path_buf(),
        source,
    })
}
