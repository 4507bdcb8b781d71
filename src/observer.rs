//! Stage diagnostics.
//!
//! Every stage of the conversion reports its milestones to a [`StageObserver`] instead of
//! printing. [`LogObserver`] forwards them to the `log` facade, [`RecordingObserver`] keeps them
//! in memory.

use std::fmt;
use std::path::PathBuf;


#[derive(Clone,Debug,PartialEq)]
pub enum StageEvent {
    /// the source variable was read and cut to the requested depth range
    Loaded { path:PathBuf, shape:[usize;3] },
    /// global intensity range of the loaded volume
    RangeFound { min:f64, max:f64 },
    /// samples mapped onto [0, 1]
    ScaledUnit,
    /// samples mapped onto [0, 256)
    ScaledLevels { levels:u32 },
    /// samples narrowed to u8, `clamped` counts samples that hit the upper bound
    Narrowed { clamped:usize },
    Written { path:PathBuf, pages:usize },
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageEvent::Loaded { path, shape } => write!(f,"read {:?} volume from {}",shape,path.display()),
            StageEvent::RangeFound { min, max } => write!(f,"intensity range [{min}, {max}]"),
            StageEvent::ScaledUnit => write!(f,"pixel values normalized to [0; 1]"),
            StageEvent::ScaledLevels { levels } => write!(f,"pixel values scaled to {levels} levels"),
            StageEvent::Narrowed { clamped } => write!(f,"pixel values converted to u8 ({clamped} clamped to 255)"),
            StageEvent::Written { path, pages } => write!(f,"wrote {pages}-page tiff to {}",path.display()),
        }
    }
}

pub trait StageObserver {
    fn on_event(&mut self, event:StageEvent);
}

/// Forwards events to `log::info!`.
#[derive(Clone,Copy,Debug,Default)]
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn on_event(&mut self, event:StageEvent) {
        log::info!("{event}");
    }
}

#[derive(Clone,Debug,Default)]
pub struct RecordingObserver {
    pub events: Vec<StageEvent>,
}

impl StageObserver for RecordingObserver {
    fn on_event(&mut self, event:StageEvent) {
        log::debug!("{event}");
        self.events.push(event);
    }
}
