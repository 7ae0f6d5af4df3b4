//! Key identities and grid geometry
//!
//! Keys are numbered 0..15 in row-major order, four columns per row:
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of columns in the grid
pub const GRID_WIDTH: u8 = 4;

/// Number of rows in the grid
pub const GRID_HEIGHT: u8 = 4;

/// Total number of keys
pub const KEY_COUNT: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Convert a key number to its (x, y) grid coordinate
pub const fn number_to_xy(number: u8) -> (u8, u8) {
    (number % GRID_WIDTH, number / GRID_WIDTH)
}

/// Convert an (x, y) grid coordinate to a key number
pub const fn xy_to_number(x: u8, y: u8) -> u8 {
    y * GRID_WIDTH + x
}

/// Identity of one key on the grid
///
/// Only valid indices can be constructed, so code holding a `Key` can index
/// the per-key arrays without bounds checks failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Key(u8);

impl Key {
    /// Create a key from its number, or None if out of range
    pub const fn new(number: u8) -> Option<Self> {
        if (number as usize) < KEY_COUNT {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Create a key from its grid coordinate, or None if off the grid
    pub const fn from_xy(x: u8, y: u8) -> Option<Self> {
        if x < GRID_WIDTH && y < GRID_HEIGHT {
            Some(Self(xy_to_number(x, y)))
        } else {
            None
        }
    }

    /// Key number (0-15)
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Key number as an array index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Column (0 = left)
    pub const fn x(self) -> u8 {
        number_to_xy(self.0).0
    }

    /// Row (0 = top)
    pub const fn y(self) -> u8 {
        number_to_xy(self.0).1
    }

    /// All keys in scan order
    pub fn all() -> impl Iterator<Item = Key> {
        (0..KEY_COUNT as u8).map(Key)
    }
}

impl TryFrom<u8> for Key {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Key::new(number).ok_or(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_range() {
        assert!(Key::new(0).is_some());
        assert!(Key::new(15).is_some());
        assert!(Key::new(16).is_none());
        assert_eq!(Key::try_from(20), Err(20));
    }

    #[test]
    fn test_grid_coordinates() {
        let key = Key::new(5).unwrap();
        assert_eq!((key.x(), key.y()), (1, 1));

        let key = Key::new(14).unwrap();
        assert_eq!((key.x(), key.y()), (2, 3));

        assert_eq!(Key::from_xy(3, 0), Key::new(3));
        assert_eq!(Key::from_xy(0, 3), Key::new(12));
        assert!(Key::from_xy(4, 0).is_none());
    }

    #[test]
    fn test_all_keys_in_order() {
        let mut expected = 0;
        for key in Key::all() {
            assert_eq!(key.number(), expected);
            assert_eq!(xy_to_number(key.x(), key.y()), expected);
            expected += 1;
        }
        assert_eq!(expected as usize, KEY_COUNT);
    }
}
