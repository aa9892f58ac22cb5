use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub(super) enum SaveError {
    Decode(image::ImageError),
    Write(std::io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Decode(e) => write!(f, "blob does not decode as an image: {e}"),
            SaveError::Write(e) => write!(f, "cannot write image file: {e}"),
        }
    }
}

/// Decode a resolved blob and persist it as PNG under the given name.
/// The embedded format is whatever the document author pasted in; the
/// output is always PNG so downstream consumers see one format.
pub(super) fn save_image(
    blob: &[u8],
    out_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, SaveError> {
    let img = image::load_from_memory(blob).map_err(SaveError::Decode)?;
    let path = out_dir.join(file_name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => SaveError::Write(io),
            other => SaveError::Decode(other),
        })?;
    Ok(path)
}
