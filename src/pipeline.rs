use std::path::Path;
use crate::io_tiff::write_tiff_pages;
use crate::loader::read_ri_volume;
use crate::{DepthRange, Result, StageObserver, Volume};

/// read the refractive-index volume from a MAT file, normalize it to [0, 255] and write it as a
/// multi-page tiff. Returns the normalized volume. Errors from any stage are returned unchanged.
pub fn mat_to_tiff(mat_file:impl AsRef<Path>, tiff_file:impl AsRef<Path>, z:DepthRange, observer:&mut dyn StageObserver) -> Result<Volume<u8>>
{
    let source = read_ri_volume(mat_file,z,observer)?;
    let normalized = source.normalize(observer)?;
    write_tiff_pages(tiff_file,&normalized,observer)?;
    Ok(normalized)
}
