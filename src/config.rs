//! Conversion job description.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{ConvertError, DepthRange, Result};

pub const DEFAULT_INPUT: &str = "measurement.mat";
pub const DEFAULT_OUTPUT: &str = "result.tiff";
pub const DEFAULT_Z_MIN: usize = 0;
pub const DEFAULT_Z_MAX: usize = 221;


/// the three parameters of a conversion: source file, destination file and depth range
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ConvertConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub z_range: DepthRange,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            z_range: DepthRange::new(DEFAULT_Z_MIN,DEFAULT_Z_MAX),
        }
    }
}

impl ConvertConfig {

    /// Loads a job from a json file such as
    /// `{"input_path": "a.mat", "output_path": "a.tiff", "z_range": {"z_min": 0, "z_max": 10}}`.
    pub fn from_json_file(path:impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(ConvertError::io(path))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ConvertError::Format(format!("invalid job file {}: {}",path.display(),e)))
    }

    #[cfg(all(feature = "io-mat", feature = "io-tiff"))]
    pub fn run(&self, observer:&mut dyn crate::StageObserver) -> Result<crate::Volume<u8>> {
        crate::mat_to_tiff(&self.input_path,&self.output_path,self.z_range,observer)
    }

}
