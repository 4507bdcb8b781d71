/*
    Conversion of 3-D refractive-index volumes stored in MAT files into normalized multi-page tiffs.
    Volumes use a column-major (X, Y, Z) layout, the same layout MATLAB writes, so a depth page
    is always one contiguous run of the sample buffer.
 */
pub mod error;
pub mod observer;
pub mod source;
pub mod normalize;
pub mod loader;
pub mod config;

#[cfg(feature = "io-mat")]
pub mod io_mat;

#[cfg(feature = "io-hdf5")]
pub mod io_hdf5;

#[cfg(feature = "io-tiff")]
pub mod io_tiff;

#[cfg(all(feature = "io-mat", feature = "io-tiff"))]
pub mod pipeline;

pub use error::{ConvertError, Result};
pub use observer::{LogObserver, RecordingObserver, StageEvent, StageObserver};
pub use source::SourceVolume;
pub use loader::read_ri_volume;
pub use config::ConvertConfig;

#[cfg(all(feature = "io-mat", feature = "io-tiff"))]
pub use pipeline::mat_to_tiff;

/// name of the refractive-index variable expected in every input file
pub const RI_VARIABLE: &str = "n_rec";

const N_AXES: usize = 3;


/// column-major shape of a volume with axes (X, Y, Z)
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct VolumeDim {
    shape: [usize; N_AXES],
    strides: [usize; N_AXES],
}

impl VolumeDim {

    pub fn from_shape(shape: [usize; N_AXES]) -> VolumeDim {
        let mut strides = [1;N_AXES];
        let mut stride = 1;
        for (s,dim) in strides.iter_mut().zip(shape.iter()) {
            *s = stride;
            stride *= dim;
        }
        VolumeDim { shape, strides }
    }

    pub fn shape(&self) -> &[usize; N_AXES] {
        &self.shape
    }

    pub fn size(&self, axis:usize) -> usize {
        assert!(axis < N_AXES,"volumes only have 3 axes");
        self.shape[axis]
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// number of samples in a single depth page
    pub fn page_len(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    /// same in-plane shape with a new depth extent
    pub fn with_depth(mut self, depth:usize) -> VolumeDim {
        self.shape[2] = depth;
        VolumeDim::from_shape(self.shape)
    }

    #[inline]
    /// calculate the element address from the index (subscripts)
    pub fn calc_addr(&self, idx:[usize; N_AXES]) -> usize {
        idx.iter().zip(self.strides.iter()).map(|(i,s)| i * s).sum()
    }

    #[inline]
    /// calculate the element index (subscript) from the address
    pub fn calc_idx(&self, addr:usize) -> [usize; N_AXES] {
        debug_assert!(addr < self.numel(), "offset {} exceeds total number of elements {}", addr, self.numel());
        let mut addr = addr;
        let mut idx = [0usize; N_AXES];
        for k in 0..N_AXES {
            idx[k] = addr % self.shape[k];
            addr /= self.shape[k];
        }
        idx
    }

}

/// half-open selection `[z_min, z_max)` along the depth axis
#[derive(Clone,Copy,Debug,PartialEq,Eq,serde::Serialize,serde::Deserialize)]
pub struct DepthRange {
    pub z_min: usize,
    pub z_max: usize,
}

impl DepthRange {

    pub fn new(z_min:usize, z_max:usize) -> DepthRange {
        DepthRange { z_min, z_max }
    }

    /// number of selected pages. Zero for reversed ranges.
    pub fn len(&self) -> usize {
        self.z_max.saturating_sub(self.z_min)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// checks `z_min < z_max <= z_extent`
    pub fn validate(&self, z_extent:usize) -> Result<()> {
        if self.z_min >= self.z_max || self.z_max > z_extent {
            Err(ConvertError::OutOfRange {
                z_min: self.z_min,
                z_max: self.z_max,
                z_extent,
            })
        } else {
            Ok(())
        }
    }

}

/// owned sample buffer with its column-major shape
#[derive(Clone,Debug,PartialEq)]
pub struct Volume<T> {
    data: Vec<T>,
    dims: VolumeDim,
}

impl<T> Volume<T> {

    pub fn new(data:Vec<T>, dims:VolumeDim) -> Result<Volume<T>> {
        if data.len() != dims.numel() {
            return Err(ConvertError::Format(format!(
                "buffer holds {} samples but shape {:?} needs {}",data.len(),dims.shape(),dims.numel()
            )));
        }
        Ok(Volume { data, dims })
    }

    pub fn dims(&self) -> VolumeDim {
        self.dims
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// samples of depth index `z`, x running fastest
    pub fn page(&self, z:usize) -> &[T] {
        let n = self.dims.page_len();
        &self.data[z*n..(z+1)*n]
    }

    /// depth pages in ascending z order
    pub fn pages(&self) -> impl ExactSizeIterator<Item = &[T]> {
        (0..self.dims.size(2)).map(move |z| self.page(z))
    }

}

impl<T:Copy> Volume<T> {

    pub fn get(&self, idx:[usize; N_AXES]) -> T {
        self.data[self.dims.calc_addr(idx)]
    }

    /// copies the pages selected by `range` into a new volume
    pub fn depth_range(&self, range:DepthRange) -> Result<Volume<T>> {
        range.validate(self.dims.size(2))?;
        let n = self.dims.page_len();
        let data = self.data[range.z_min*n..range.z_max*n].to_vec();
        Volume::new(data,self.dims.with_depth(range.len()))
    }

    /// page `z` laid out as image rows, one row per x and one column per y
    pub fn page_row_major(&self, z:usize) -> Vec<T> {
        let [nx,ny,_] = *self.dims.shape();
        let page = self.page(z);
        let mut out = Vec::with_capacity(page.len());
        for x in 0..nx {
            out.extend((0..ny).map(|y| page[x + y*nx]));
        }
        out
    }

}
