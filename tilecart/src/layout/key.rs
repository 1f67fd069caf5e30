//! Tile identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies one imaging tile by its scan lane and tile number.
///
/// Displays as `lane-tile` (e.g. `2-2113`), the form used for per-tile
/// output names and metadata keys. Parsing also accepts the `lane_tile`
/// form found in manifest tables.
///
/// ```
/// use tilecart::layout::TileKey;
///
/// let key: TileKey = "2_2113".parse().unwrap();
/// assert_eq!(key, TileKey::new(2, 2113));
/// assert_eq!(key.to_string(), "2-2113");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TileKey {
    /// Physical scan lane
    pub lane: u32,
    /// Instrument tile number within the lane
    pub tile: u32,
}

impl TileKey {
    pub fn new(lane: u32, tile: u32) -> Self {
        Self { lane, tile }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lane, self.tile)
    }
}

/// Error returned when a string is not a `lane-tile` identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tile key '{0}' (expected lane-tile or lane_tile, e.g. 2-2113)")]
pub struct ParseTileKeyError(pub String);

impl FromStr for TileKey {
    type Err = ParseTileKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (lane, tile) = trimmed
            .split_once(['-', '_'])
            .ok_or_else(|| ParseTileKeyError(s.to_string()))?;
        let lane = lane
            .parse()
            .map_err(|_| ParseTileKeyError(s.to_string()))?;
        let tile = tile
            .parse()
            .map_err(|_| ParseTileKeyError(s.to_string()))?;
        Ok(TileKey { lane, tile })
    }
}
