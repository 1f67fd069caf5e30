//! Decoding of instrument tile numbers.
//!
//! Flow cell tiles are numbered `SWTT`: surface digit `S`, swath digit `W`
//! and a two-digit tile index `TT` within the swath (e.g. `2113` is surface
//! 2, swath 1, tile 13). Three-digit numbers (`WTT`) come from single
//! surface runs and decode with surface 1.
//!
//! The number splits losslessly into a hundreds group (`tile / 100`, the
//! surface and swath digits) and a tens-units group (`tile % 100`, the tile
//! index); [`TileNumber::from_groups`] is the exact inverse.

use crate::error::MosaicError;

use super::TileKey;

/// A validated 3 or 4 digit tile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileNumber(u32);

impl TileNumber {
    /// Smallest accepted tile number (surface-less, swath 1, tile 00).
    pub const MIN: u32 = 100;
    /// Largest accepted tile number.
    pub const MAX: u32 = 9999;

    /// Validate the digit structure of a tile number.
    pub fn decode(tile: u32) -> Result<Self, MosaicError> {
        if !(Self::MIN..=Self::MAX).contains(&tile) {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: "must have 3 or 4 digits".to_string(),
            });
        }
        let number = TileNumber(tile);
        if number.swath() == 0 {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: "swath digit must be at least 1".to_string(),
            });
        }
        if number.index() == 0 {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: "tile index must be at least 1".to_string(),
            });
        }
        Ok(number)
    }

    /// Rebuild a tile number from its hundreds and tens-units groups.
    pub fn from_groups(group_hundreds: u32, group_tens_units: u32) -> Result<Self, MosaicError> {
        if group_tens_units > 99 {
            return Err(MosaicError::InvalidTileNumber {
                tile: group_hundreds.saturating_mul(100).saturating_add(group_tens_units),
                reason: format!("tens-units group {} exceeds 99", group_tens_units),
            });
        }
        Self::decode(group_hundreds.saturating_mul(100) + group_tens_units)
    }

    /// The raw tile number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Surface and swath digits (`tile / 100`).
    pub fn group_hundreds(self) -> u32 {
        self.0 / 100
    }

    /// Tile index within the swath (`tile % 100`).
    pub fn group_tens_units(self) -> u32 {
        self.0 % 100
    }

    /// Flow cell surface; 1 for three-digit numbers.
    pub fn surface(self) -> u32 {
        match self.0 / 1000 {
            0 => 1,
            s => s,
        }
    }

    pub fn swath(self) -> u32 {
        self.group_hundreds() % 10
    }

    pub fn index(self) -> u32 {
        self.group_tens_units()
    }
}

/// Position of a tile in the mosaic, derived from its number and lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicPosition {
    /// Row counted from the bottom of the mosaic, starting at 1 (`m`)
    pub row_from_bottom: u32,
    /// Column counted from the left of the mosaic, starting at 1 (`n`)
    pub col_from_left: u32,
}

/// Physical numbering scheme of a flow cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileNumbering {
    pub lanes: u32,
    pub surfaces: u32,
    pub swaths_per_surface: u32,
    pub tiles_per_swath: u32,
}

impl TileNumbering {
    /// HiSeq rapid run flow cell: 2 lanes, 2 surfaces, 2 swaths, 16 tiles.
    pub const fn hiseq() -> Self {
        Self {
            lanes: 2,
            surfaces: 2,
            swaths_per_surface: 2,
            tiles_per_swath: 16,
        }
    }

    /// Number of mosaic rows (`surfaces * tiles_per_swath`).
    pub fn rows(&self) -> u32 {
        self.surfaces * self.tiles_per_swath
    }

    /// Number of mosaic columns (`lanes * swaths_per_surface`).
    pub fn cols(&self) -> u32 {
        self.lanes * self.swaths_per_surface
    }

    /// Decode a tile number and check it against this scheme's bounds.
    pub fn decode(&self, tile: u32) -> Result<TileNumber, MosaicError> {
        let number = TileNumber::decode(tile)?;
        if number.surface() > self.surfaces {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: format!("surface {} exceeds {}", number.surface(), self.surfaces),
            });
        }
        if number.swath() > self.swaths_per_surface {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: format!(
                    "swath {} exceeds {}",
                    number.swath(),
                    self.swaths_per_surface
                ),
            });
        }
        if number.index() > self.tiles_per_swath {
            return Err(MosaicError::InvalidTileNumber {
                tile,
                reason: format!(
                    "tile index {} exceeds {}",
                    number.index(),
                    self.tiles_per_swath
                ),
            });
        }
        Ok(number)
    }

    /// Mosaic row and column of a tile.
    ///
    /// Rows stack the surfaces bottom to top; columns run lane by lane from
    /// the highest lane on the left:
    ///
    /// ```text
    /// m = (surface - 1) * tiles_per_swath + index
    /// n = swaths_per_surface * (lanes - lane) + swath
    /// ```
    pub fn mosaic_position(&self, key: TileKey) -> Result<MosaicPosition, MosaicError> {
        if key.lane == 0 || key.lane > self.lanes {
            return Err(MosaicError::InvalidTileNumber {
                tile: key.tile,
                reason: format!("lane {} outside 1..={}", key.lane, self.lanes),
            });
        }
        let number = self.decode(key.tile)?;
        Ok(MosaicPosition {
            row_from_bottom: (number.surface() - 1) * self.tiles_per_swath + number.index(),
            col_from_left: self.swaths_per_surface * (self.lanes - key.lane) + number.swath(),
        })
    }

    /// Every valid tile key of this scheme, lane-major.
    pub fn keys(&self) -> impl Iterator<Item = TileKey> + '_ {
        (1..=self.lanes).flat_map(move |lane| {
            (1..=self.surfaces).flat_map(move |surface| {
                (1..=self.swaths_per_surface).flat_map(move |swath| {
                    (1..=self.tiles_per_swath).map(move |index| {
                        TileKey::new(lane, surface * 1000 + swath * 100 + index)
                    })
                })
            })
        })
    }
}

impl Default for TileNumbering {
    fn default() -> Self {
        Self::hiseq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_four_digits() {
        let number = TileNumber::decode(2113).unwrap();
        assert_eq!(number.surface(), 2);
        assert_eq!(number.swath(), 1);
        assert_eq!(number.index(), 13);
        assert_eq!(number.group_hundreds(), 21);
        assert_eq!(number.group_tens_units(), 13);
    }

    #[test]
    fn test_decode_three_digits_uses_first_surface() {
        let number = TileNumber::decode(214).unwrap();
        assert_eq!(number.surface(), 1);
        assert_eq!(number.swath(), 2);
        assert_eq!(number.index(), 14);
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(matches!(
            TileNumber::decode(99),
            Err(MosaicError::InvalidTileNumber { tile: 99, .. })
        ));
        assert!(TileNumber::decode(10000).is_err());
        // swath digit zero
        assert!(TileNumber::decode(1013).is_err());
        // tile index zero
        assert!(TileNumber::decode(1100).is_err());
    }

    #[test]
    fn test_groups_roundtrip() {
        for tile in [101, 216, 1101, 1216, 2113, 2216] {
            let number = TileNumber::decode(tile).unwrap();
            let rebuilt =
                TileNumber::from_groups(number.group_hundreds(), number.group_tens_units())
                    .unwrap();
            assert_eq!(rebuilt.get(), tile);
        }
        assert!(TileNumber::from_groups(21, 113).is_err());
    }

    #[test]
    fn test_scheme_bounds() {
        let scheme = TileNumbering::hiseq();
        assert!(scheme.decode(2216).is_ok());
        assert!(scheme.decode(3101).is_err());
        assert!(scheme.decode(1301).is_err());
        assert!(scheme.decode(1117).is_err());
    }

    #[test]
    fn test_mosaic_position() {
        let scheme = TileNumbering::hiseq();

        // surface 2, swath 1, tile 13 on lane 2
        let pos = scheme.mosaic_position(TileKey::new(2, 2113)).unwrap();
        assert_eq!(pos.row_from_bottom, 16 + 13);
        assert_eq!(pos.col_from_left, 1);

        // lane 1 sits to the right of lane 2
        let pos = scheme.mosaic_position(TileKey::new(1, 1102)).unwrap();
        assert_eq!(pos.row_from_bottom, 2);
        assert_eq!(pos.col_from_left, 2 + 1);

        assert!(scheme.mosaic_position(TileKey::new(3, 1101)).is_err());
        assert!(scheme.mosaic_position(TileKey::new(0, 1101)).is_err());
    }

    #[test]
    fn test_keys_cover_every_cell_once() {
        let scheme = TileNumbering::hiseq();
        let mut cells = std::collections::HashSet::new();
        for key in scheme.keys() {
            let pos = scheme.mosaic_position(key).unwrap();
            assert!(cells.insert((pos.row_from_bottom, pos.col_from_left)));
        }
        assert_eq!(cells.len() as u32, scheme.rows() * scheme.cols());
    }
}
