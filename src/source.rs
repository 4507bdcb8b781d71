use crate::normalize::normalize_volume;
use crate::{DepthRange, Result, StageObserver, Volume, VolumeDim};

/// a loaded volume with the element type of the source file preserved
#[derive(Clone,Debug,PartialEq)]
pub enum SourceVolume {
    Int8(Volume<i8>),
    UInt8(Volume<u8>),
    Int16(Volume<i16>),
    UInt16(Volume<u16>),
    Int32(Volume<i32>),
    UInt32(Volume<u32>),
    Int64(Volume<i64>),
    UInt64(Volume<u64>),
    Single(Volume<f32>),
    Double(Volume<f64>),
}

/// runs `$body` with `$v` bound to the inner volume of any variant
macro_rules! with_volume {
    ($src:expr, $v:ident => $body:expr) => {
        match $src {
            SourceVolume::Int8($v) => $body,
            SourceVolume::UInt8($v) => $body,
            SourceVolume::Int16($v) => $body,
            SourceVolume::UInt16($v) => $body,
            SourceVolume::Int32($v) => $body,
            SourceVolume::UInt32($v) => $body,
            SourceVolume::Int64($v) => $body,
            SourceVolume::UInt64($v) => $body,
            SourceVolume::Single($v) => $body,
            SourceVolume::Double($v) => $body,
        }
    };
}

/// like `with_volume` but wraps the result back into the same variant
macro_rules! map_volume {
    ($src:expr, $v:ident => $body:expr) => {
        match $src {
            SourceVolume::Int8($v) => SourceVolume::Int8($body),
            SourceVolume::UInt8($v) => SourceVolume::UInt8($body),
            SourceVolume::Int16($v) => SourceVolume::Int16($body),
            SourceVolume::UInt16($v) => SourceVolume::UInt16($body),
            SourceVolume::Int32($v) => SourceVolume::Int32($body),
            SourceVolume::UInt32($v) => SourceVolume::UInt32($body),
            SourceVolume::Int64($v) => SourceVolume::Int64($body),
            SourceVolume::UInt64($v) => SourceVolume::UInt64($body),
            SourceVolume::Single($v) => SourceVolume::Single($body),
            SourceVolume::Double($v) => SourceVolume::Double($body),
        }
    };
}

impl SourceVolume {

    pub fn dims(&self) -> VolumeDim {
        with_volume!(self, v => v.dims())
    }

    /// MATLAB class name of the samples
    pub fn class_name(&self) -> &'static str {
        match self {
            SourceVolume::Int8(_) => "int8",
            SourceVolume::UInt8(_) => "uint8",
            SourceVolume::Int16(_) => "int16",
            SourceVolume::UInt16(_) => "uint16",
            SourceVolume::Int32(_) => "int32",
            SourceVolume::UInt32(_) => "uint32",
            SourceVolume::Int64(_) => "int64",
            SourceVolume::UInt64(_) => "uint64",
            SourceVolume::Single(_) => "single",
            SourceVolume::Double(_) => "double",
        }
    }

    pub fn depth_range(&self, range:DepthRange) -> Result<SourceVolume> {
        Ok(map_volume!(self, v => v.depth_range(range)?))
    }

    pub fn normalize(&self, observer:&mut dyn StageObserver) -> Result<Volume<u8>> {
        with_volume!(self, v => normalize_volume(v, observer))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingObserver;

    #[test]
    fn depth_range_keeps_class() {
        let dims = VolumeDim::from_shape([1,1,4]);
        let src = SourceVolume::Int16(Volume::new(vec![-3i16,0,7,9],dims).unwrap());
        let sub = src.depth_range(DepthRange::new(1,3)).unwrap();
        assert_eq!(sub.class_name(),"int16");
        assert_eq!(sub,SourceVolume::Int16(Volume::new(vec![0,7],dims.with_depth(2)).unwrap()));
    }

    #[test]
    fn integer_sources_normalize() {
        let dims = VolumeDim::from_shape([1,1,3]);
        let src = SourceVolume::UInt16(Volume::new(vec![100u16,200,300],dims).unwrap());
        let out = src.normalize(&mut RecordingObserver::default()).unwrap();
        assert_eq!(out.data(),&[0,128,255]);
    }
}
