//! Ruler tick generation
//!
//! A bar has two end ticks plus evenly spaced interior ticks. Interior
//! ticks follow the usual ruler convention: every fifth one is a long
//! (major) tick, the four between are short (minor).

use geo::{Coord, Line};
use serde::{Deserialize, Serialize};

use crate::domain::Placement;

/// Every n-th interior tick is major
pub const MAJOR_TICK_INTERVAL: usize = 5;

/// Scale sizes from this length upward get one interior tick per centimetre
pub const CENTIMETRE_TICKS_FROM_MM: u32 = 50;

/// The two perpendicular strokes closing the bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndTicks {
    /// Tick at the first (left or top) bar point
    pub end_tick1: Line<f64>,
    /// Tick at the second (right or bottom) bar point
    pub end_tick2: Line<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickKind {
    Minor,
    Major,
}

/// Stroke lengths for interior ticks, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickLengths {
    pub major: f64,
    pub minor: f64,
}

impl Default for TickLengths {
    fn default() -> Self {
        Self {
            major: 10.0,
            minor: 5.0,
        }
    }
}

/// One interior tick, ready to be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerTick {
    /// Draw-layer data id, `{prefix}-tick{index}`
    pub id: String,
    /// Per-annotation element uid, `tick{index}`
    pub uid: String,
    pub index: usize,
    pub kind: TickKind,
    pub segment: Line<f64>,
}

/// Perpendicular strokes of `length` px at both bar ends, pointing inward
pub fn compute_end_scale_ticks(bar: [Coord<f64>; 2], placement: Placement, length: f64) -> EndTicks {
    let stroke = placement.inward() * length;
    EndTicks {
        end_tick1: Line::new(bar[0], bar[0] + stroke),
        end_tick2: Line::new(bar[1], bar[1] + stroke),
    }
}

/// Number of subdivisions of a bar: centimetres from 50 mm, millimetres below
pub fn inner_tick_count(scale_size: u32) -> u32 {
    if scale_size >= CENTIMETRE_TICKS_FROM_MM {
        scale_size / 10
    } else {
        scale_size
    }
}

pub fn tick_kind(tick_index: usize) -> TickKind {
    if (tick_index + 1) % MAJOR_TICK_INTERVAL == 0 {
        TickKind::Major
    } else {
        TickKind::Minor
    }
}

/// Offset of interior tick `tick_index` from the first end tick, along the bar
pub fn tick_offset_for(placement: Placement, tick_index: usize, spacing: f64) -> Coord<f64> {
    placement.along() * (spacing * (tick_index + 1) as f64)
}

/// Interior ticks between the two end ticks
///
/// The bar is divided into [`inner_tick_count`] equal parts. The last
/// division boundary coincides with `end_tick2`, so one tick fewer than
/// the count is produced.
pub fn compute_inner_scale_ticks(
    scale_size: u32,
    placement: Placement,
    id_prefix: &str,
    end_tick1: &Line<f64>,
    end_tick2: &Line<f64>,
    lengths: TickLengths,
) -> Vec<InnerTick> {
    let count = inner_tick_count(scale_size);
    if count < 2 {
        return Vec::new();
    }

    let along = placement.along();
    let span = end_tick2.start - end_tick1.start;
    let spacing = (span.x * along.x + span.y * along.y) / f64::from(count);
    let inward = placement.inward();

    (0..(count - 1) as usize)
        .map(|i| {
            let kind = tick_kind(i);
            let length = match kind {
                TickKind::Major => lengths.major,
                TickKind::Minor => lengths.minor,
            };
            let start = end_tick1.start + tick_offset_for(placement, i, spacing);
            InnerTick {
                id: format!("{id_prefix}-tick{i}"),
                uid: format!("tick{i}"),
                index: i,
                kind,
                segment: Line::new(start, start + inward * length),
            }
        })
        .collect()
}
