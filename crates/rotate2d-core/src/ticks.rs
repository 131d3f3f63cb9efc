//! Axis tick placement for downsampled views.
//!
//! Ticks are labelled in full-resolution pixel units but placed at
//! downsampled display positions, so a view rendered at any downsample
//! factor still reads in volume coordinates.

/// Number of ticks placed along each axis.
pub const DEFAULT_TICK_COUNT: usize = 6;

/// Order in which ticks are listed along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    /// Labels increase along the list (usual horizontal axis).
    #[default]
    Ascending,
    /// Labels decrease along the list (usual vertical axis).
    Descending,
}

/// One tick: where it goes on the display and what it reads.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tick {
    /// Position in downsampled display pixels.
    pub position: f64,
    /// Full-resolution coordinate shown at that position.
    pub label: i64,
}

/// Ticks for one axis.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TickSet {
    pub direction: AxisDirection,
    pub ticks: Vec<Tick>,
}

impl TickSet {
    /// Display positions in list order.
    pub fn positions(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.position).collect()
    }

    /// Labels in list order.
    pub fn labels(&self) -> Vec<i64> {
        self.ticks.iter().map(|t| t.label).collect()
    }
}

/// Evenly spaced ticks over `[0, length]` in full-resolution units.
///
/// Each stop is labelled with its truncated integer value and placed at
/// `stop / downsample`. A downsample of zero is treated as one.
pub fn axis_ticks(
    length: usize,
    downsample: usize,
    count: usize,
    direction: AxisDirection,
) -> TickSet {
    let ds = downsample.max(1) as f64;
    let len = length as f64;

    let mut ticks: Vec<Tick> = match count {
        0 => Vec::new(),
        1 => vec![Tick {
            position: 0.0,
            label: 0,
        }],
        _ => (0..count)
            .map(|i| {
                let stop = len * i as f64 / (count - 1) as f64;
                Tick {
                    position: stop / ds,
                    label: stop as i64,
                }
            })
            .collect(),
    };

    if direction == AxisDirection::Descending {
        ticks.reverse();
    }

    TickSet { direction, ticks }
}
