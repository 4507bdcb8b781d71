//! Reading the refractive-index variable out of a MAT file.
//!
//! Level 5 files (v5 through v7) go through `io_mat`, v7.3 files are HDF5 containers and go
//! through `io_hdf5` when the crate is built with the `io-hdf5` feature.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::{ConvertError, DepthRange, Result, SourceVolume, StageEvent, StageObserver, Volume, VolumeDim};

/// size of the descriptive text at the start of every MAT header
const HEADER_TEXT_LEN: usize = 116;
/// v7.3 files carry a 512 byte user block in front of the HDF5 superblock
const HDF5_USER_BLOCK: usize = 512;
const HDF5_SIGNATURE: &[u8; 8] = b"\x89HDF\r\n\x1a\n";

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum MatVersion {
    /// Level 5 layout, used by v5, v6 and v7
    Level5,
    /// HDF5 based v7.3 layout
    Hdf5,
}


/// identifies the MAT layout from the first bytes of the file
pub fn sniff_version(head:&[u8]) -> Result<MatVersion> {
    if head.len() >= HDF5_USER_BLOCK + HDF5_SIGNATURE.len()
        && &head[HDF5_USER_BLOCK..HDF5_USER_BLOCK + HDF5_SIGNATURE.len()] == HDF5_SIGNATURE {
        return Ok(MatVersion::Hdf5);
    }
    if head.len() < HEADER_TEXT_LEN || !head.starts_with(b"MATLAB ") {
        return Err(ConvertError::Format("missing MAT-file header".to_string()));
    }
    if head.starts_with(b"MATLAB 7.3") {
        Ok(MatVersion::Hdf5)
    } else {
        Ok(MatVersion::Level5)
    }
}

/// maps a MATLAB size vector onto (X, Y, Z). MATLAB drops trailing singleton dimensions.
pub fn volume_shape(size:&[usize]) -> Result<VolumeDim> {
    if size.len() < 2 {
        return Err(ConvertError::Format(format!("expected a 3-D array, got size {:?}",size)));
    }
    if size[3.min(size.len())..].iter().any(|&d| d != 1) {
        return Err(ConvertError::Format(format!("expected a 3-D array, got size {:?}",size)));
    }
    let shape = [size[0],size[1],size.get(2).copied().unwrap_or(1)];
    if shape.contains(&0) {
        return Err(ConvertError::Format(format!("array of size {:?} is empty",size)));
    }
    Ok(VolumeDim::from_shape(shape))
}

/// wraps a decoded column-major buffer after checking its shape
pub(crate) fn source_volume<T>(data:Vec<T>, size:&[usize]) -> Result<Volume<T>> {
    Volume::new(data,volume_shape(size)?)
}

fn read_head(path:&Path) -> Result<Vec<u8>> {
    let f = File::open(path).map_err(ConvertError::io(path))?;
    let mut head = Vec::with_capacity(HDF5_USER_BLOCK + HDF5_SIGNATURE.len());
    f.take((HDF5_USER_BLOCK + HDF5_SIGNATURE.len()) as u64)
        .read_to_end(&mut head)
        .map_err(ConvertError::io(path))?;
    Ok(head)
}

/// reads variable `name` from the MAT file at `path` without cutting it
pub fn read_variable(path:&Path, name:&str) -> Result<SourceVolume> {
    match sniff_version(&read_head(path)?)? {
        MatVersion::Level5 => read_level5(path,name),
        MatVersion::Hdf5 => read_hdf5(path,name),
    }
}

#[cfg(feature = "io-mat")]
fn read_level5(path:&Path, name:&str) -> Result<SourceVolume> {
    crate::io_mat::read_mat_variable(path,name)
}

#[cfg(not(feature = "io-mat"))]
fn read_level5(_path:&Path, _name:&str) -> Result<SourceVolume> {
    Err(ConvertError::Format("reading MAT v5 files requires the io-mat feature".to_string()))
}

#[cfg(feature = "io-hdf5")]
fn read_hdf5(path:&Path, name:&str) -> Result<SourceVolume> {
    crate::io_hdf5::read_hdf5_variable(path,name)
}

#[cfg(not(feature = "io-hdf5"))]
fn read_hdf5(_path:&Path, _name:&str) -> Result<SourceVolume> {
    Err(ConvertError::Format("reading MAT v7.3 files requires the io-hdf5 feature".to_string()))
}

/// loads the refractive-index volume restricted to the depth range `z`
pub fn read_ri_volume(path:impl AsRef<Path>, z:DepthRange, observer:&mut dyn StageObserver) -> Result<SourceVolume> {
    let path = path.as_ref();
    let full = read_variable(path,crate::RI_VARIABLE)?;
    let volume = full.depth_range(z)?;
    observer.on_event(StageEvent::Loaded {
        path: path.to_path_buf(),
        shape: *volume.dims().shape(),
    });
    Ok(volume)
}
