use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T,ConvertError>;

#[derive(Debug,Error)]
pub enum ConvertError {
    /// the source file has no numeric array with the expected name. MAT readers skip char,
    /// struct, cell and sparse variables, so those report here as well.
    #[error("no numeric array named `{name}` in {path} (char, struct, cell and sparse variables are not read)")]
    NotFound { name:String, path:PathBuf },

    #[error("depth range [{z_min}, {z_max}) is outside of the volume depth 0..{z_extent}")]
    OutOfRange { z_min:usize, z_max:usize, z_extent:usize },

    /// the source could not be parsed as a MAT file holding a 3-D numeric array
    #[error("format error: {0}")]
    Format(String),

    #[error("cannot normalize volume: {0}")]
    DegenerateInput(String),

    #[error("volume has no pages to write")]
    EmptyVolume,

    #[error("i/o error on {path}: {source}")]
    Io { path:PathBuf, #[source] source:std::io::Error },

    /// non-i/o failures of the tiff encoder. I/O failures are reported as `Io`.
    #[cfg(feature = "io-tiff")]
    #[error("tiff encoder error: {0}")]
    Encode(tiff::TiffError),

    #[error("page of {rows}x{cols} samples exceeds the tiff size limit")]
    PageTooLarge { rows:usize, cols:usize },
}

impl ConvertError {
    pub(crate) fn io(path:impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> ConvertError {
        let path = path.into();
        move |source| ConvertError::Io { path, source }
    }
}
