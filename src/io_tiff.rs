use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tiff::encoder::{colortype, TiffEncoder};
use crate::{ConvertError, Result, StageEvent, StageObserver, Volume};


/// write every depth page of `volume` as one 8-bit grayscale page of a tiff file.
/// Page `i` holds depth index `i`, rows run along x and columns along y.
pub fn write_tiff_pages(file:impl AsRef<Path>, volume:&Volume<u8>, observer:&mut dyn StageObserver) -> Result<()>
{
    let path = file.as_ref();
    let [nx,ny,nz] = *volume.dims().shape();
    if nz == 0 || nx * ny == 0 {
        return Err(ConvertError::EmptyVolume);
    }
    let (height,width) = match (u32::try_from(nx),u32::try_from(ny)) {
        (Ok(h),Ok(w)) => (h,w),
        _ => return Err(ConvertError::PageTooLarge { rows: nx, cols: ny }),
    };

    write_atomic(path,|writer| {
        let mut encoder = TiffEncoder::new(writer).map_err(|e| encode_error(path,e))?;
        for z in 0..nz {
            encoder.write_image::<colortype::Gray8>(width,height,&volume.page_row_major(z))
                .map_err(|e| encode_error(path,e))?;
        }
        Ok(())
    })?;

    observer.on_event(StageEvent::Written { path: path.to_path_buf(), pages: nz });
    Ok(())
}

fn parent_dir(path:&Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// runs `encode` against a temporary file in the destination directory and renames it onto
/// `path` once it is flushed and synced. On error the temporary file is removed and whatever
/// was at `path` stays untouched.
fn write_atomic<F>(path:&Path, encode:F) -> Result<()>
where F: FnOnce(&mut BufWriter<NamedTempFile>) -> Result<()>
{
    let tmp = NamedTempFile::new_in(parent_dir(path)).map_err(ConvertError::io(path))?;
    let mut writer = BufWriter::new(tmp);
    encode(&mut writer)?;
    writer.flush().map_err(ConvertError::io(path))?;
    let tmp = writer.into_inner().map_err(|e| ConvertError::Io { path: path.to_path_buf(), source: e.into_error() })?;
    tmp.as_file().sync_all().map_err(ConvertError::io(path))?;
    tmp.persist(path).map_err(|e| ConvertError::Io { path: path.to_path_buf(), source: e.error })?;
    Ok(())
}

/// i/o failures inside the encoder surface as `Io`, everything else as `Encode`
fn encode_error(path:&Path, e:tiff::TiffError) -> ConvertError {
    match e {
        tiff::TiffError::IoError(source) => ConvertError::Io { path: path.to_path_buf(), source },
        other => ConvertError::Encode(other),
    }
}
