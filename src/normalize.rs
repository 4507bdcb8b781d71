//! Linear rescaling of a volume onto the 8-bit range.
//!
//! Samples are mapped with `trunc(256 * (v - min) / (max - min))`. The maximum sample lands on
//! exactly 256, one past `u8::MAX`; narrowing saturates it to 255 instead of wrapping to 0.

use num_traits::ToPrimitive;
use rayon::prelude::*;
use crate::{ConvertError, Result, StageEvent, StageObserver, Volume};

/// number of output levels the unit interval is stretched onto
pub const LEVELS: u32 = 256;


/// global (min, max) of the samples. Fails when empty or when any sample is not finite.
pub fn intensity_range<T>(data:&[T]) -> Result<(f64,f64)>
where T: ToPrimitive + Sync
{
    if data.is_empty() {
        return Err(ConvertError::DegenerateInput("volume has no samples".to_string()));
    }
    let (min,max,finite) = data.par_iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .fold(
            || (f64::INFINITY,f64::NEG_INFINITY,true),
            |(lo,hi,ok),v| (lo.min(v),hi.max(v),ok && v.is_finite()),
        )
        .reduce(
            || (f64::INFINITY,f64::NEG_INFINITY,true),
            |a,b| (a.0.min(b.0),a.1.max(b.1),a.2 && b.2),
        );
    if !finite {
        return Err(ConvertError::DegenerateInput("volume contains non-finite samples".to_string()));
    }
    Ok((min,max))
}

/// truncates a scaled sample and narrows it to u8, saturating at 255
#[inline]
pub fn narrow_level(scaled:f64) -> u8 {
    scaled.trunc().to_u8().unwrap_or(u8::MAX)
}

/// rescales `volume` onto [0, 255], preserving its shape
pub fn normalize_volume<T>(volume:&Volume<T>, observer:&mut dyn StageObserver) -> Result<Volume<u8>>
where T: ToPrimitive + Sync
{
    let (min,max) = intensity_range(volume.data())?;
    observer.on_event(StageEvent::RangeFound { min, max });

    if max <= min {
        return Err(ConvertError::DegenerateInput(format!("every sample equals {min}")));
    }

    // halved operands keep `max - min` finite for samples near f64::MAX. Halving is exact, so
    // the ratio is unchanged for every other input.
    let (half_min,half_span) = (min * 0.5,max * 0.5 - min * 0.5);
    let mut scaled:Vec<f64> = volume.data().par_iter()
        .map(|v| (v.to_f64().unwrap_or(min) * 0.5 - half_min) / half_span)
        .collect();
    observer.on_event(StageEvent::ScaledUnit);

    let levels = LEVELS as f64;
    scaled.par_iter_mut().for_each(|s| *s *= levels);
    observer.on_event(StageEvent::ScaledLevels { levels: LEVELS });

    let clamped = scaled.par_iter().filter(|s| s.trunc() > u8::MAX as f64).count();
    let data:Vec<u8> = scaled.par_iter().map(|&s| narrow_level(s)).collect();
    observer.on_event(StageEvent::Narrowed { clamped });

    Volume::new(data,volume.dims())
}
