use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use matfile::{MatFile, NumericData};
use crate::loader::source_volume;
use crate::{ConvertError, Result, SourceVolume};

/// read a numeric variable from a Level 5 MAT file, keeping its element type.
/// Only the real part of complex arrays is kept.
pub fn read_mat_variable(file:impl AsRef<Path>, name:&str) -> Result<SourceVolume>
{
    let path = file.as_ref();
    let f = File::open(path).map_err(ConvertError::io(path))?;
    let mat = MatFile::parse(BufReader::new(f))
        .map_err(|e| ConvertError::Format(format!("failed to parse {}: {:?}",path.display(),e)))?;

    let array = mat.find_by_name(name).ok_or_else(|| ConvertError::NotFound {
        name: name.to_string(),
        path: path.to_path_buf(),
    })?;
    let size = array.size();

    macro_rules! convert {
        ($($class:ident),*) => {
            match array.data() {
                $(NumericData::$class { real, imag } => {
                    if imag.is_some() {
                        log::warn!("`{}` is complex, discarding the imaginary part",name);
                    }
                    SourceVolume::$class(source_volume(real.clone(),size)?)
                })*
            }
        };
    }

    Ok(convert!(Int8, UInt8, Int16, UInt16, Int32, UInt32, Int64, UInt64, Single, Double))
}
