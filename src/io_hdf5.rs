use std::path::Path;
use hdf5::types::{FixedAscii, TypeDescriptor};
use hdf5::{Dataset, H5Type};
use crate::loader::source_volume;
use crate::{ConvertError, Result, SourceVolume};

/// attribute MATLAB attaches to every variable of a v7.3 file
const CLASS_ATTR: &str = "MATLAB_class";

/// layout of a complex MATLAB array, one compound element per sample
#[derive(H5Type,Clone,Copy,Debug,PartialEq)]
#[repr(C)]
pub struct ComplexSample<T> {
    pub real: T,
    pub imag: T,
}


/// MATLAB class of a dataset. Plain HDF5 datasets without the attribute are read as double.
fn matlab_class(ds:&Dataset) -> Result<String> {
    let names = ds.attr_names().map_err(|e| ConvertError::Format(e.to_string()))?;
    if !names.iter().any(|n| n == CLASS_ATTR) {
        return Ok("double".to_string());
    }
    let class:FixedAscii<16> = ds.attr(CLASS_ATTR)
        .and_then(|a| a.read_scalar())
        .map_err(|e| ConvertError::Format(format!("unreadable {}: {}",CLASS_ATTR,e)))?;
    Ok(class.as_str().to_string())
}

/// samples of `ds` as `T`, taking the `real` member of complex (compound) datasets
fn read_real<T:H5Type + Copy>(ds:&Dataset, name:&str) -> Result<Vec<T>> {
    let desc = ds.dtype().and_then(|t| t.to_descriptor())
        .map_err(|e| ConvertError::Format(format!("unknown type of `{}`: {}",name,e)))?;
    let read_err = |e:hdf5::Error| ConvertError::Format(format!("failed to read `{}` as numeric data: {}",name,e));
    if let TypeDescriptor::Compound(_) = desc {
        log::warn!("`{}` is complex, discarding the imaginary part",name);
        let samples:Vec<ComplexSample<T>> = ds.read_raw().map_err(read_err)?;
        Ok(samples.into_iter().map(|c| c.real).collect())
    } else {
        ds.read_raw().map_err(read_err)
    }
}

/// read a numeric variable from a v7.3 (HDF5) MAT file, keeping its MATLAB class.
/// HDF5 stores MATLAB arrays with their dimensions reversed, so the raw row-major buffer is
/// already column-major in MATLAB order.
pub fn read_hdf5_variable(file:impl AsRef<Path>, name:&str) -> Result<SourceVolume>
{
    let path = file.as_ref();
    let h5 = hdf5::File::open(path)
        .map_err(|e| ConvertError::Format(format!("failed to open {} as HDF5: {}",path.display(),e)))?;
    if !h5.link_exists(name) {
        return Err(ConvertError::NotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    let ds = h5.dataset(name)
        .map_err(|e| ConvertError::Format(format!("`{}` is not a dataset: {}",name,e)))?;
    let mut size = ds.shape();
    size.reverse();

    let class = matlab_class(&ds)?;
    Ok(match class.as_str() {
        "int8" => SourceVolume::Int8(source_volume(read_real(&ds,name)?,&size)?),
        "uint8" | "logical" => SourceVolume::UInt8(source_volume(read_real(&ds,name)?,&size)?),
        "int16" => SourceVolume::Int16(source_volume(read_real(&ds,name)?,&size)?),
        "uint16" => SourceVolume::UInt16(source_volume(read_real(&ds,name)?,&size)?),
        "int32" => SourceVolume::Int32(source_volume(read_real(&ds,name)?,&size)?),
        "uint32" => SourceVolume::UInt32(source_volume(read_real(&ds,name)?,&size)?),
        "int64" => SourceVolume::Int64(source_volume(read_real(&ds,name)?,&size)?),
        "uint64" => SourceVolume::UInt64(source_volume(read_real(&ds,name)?,&size)?),
        "single" => SourceVolume::Single(source_volume(read_real(&ds,name)?,&size)?),
        "double" => SourceVolume::Double(source_volume(read_real(&ds,name)?,&size)?),
        other => return Err(ConvertError::Format(format!("`{}` is a {} array, not a numeric one",name,other))),
    })
}
