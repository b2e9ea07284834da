//! Two-cell piece geometry.
//!
//! Every piece — home or neutral — covers exactly two cells: an anchor
//! carrying "+" and an offset cell carrying "-". The orientation determines
//! where the offset cell sits relative to the anchor:
//!
//! | orientation | offset   |
//! |-------------|----------|
//! | 0           | (0, +1)  |
//! | 90          | (+1, 0)  |
//! | 180         | (0, −1)  |
//! | 270         | (−1, 0)  |

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Polarity};

/// Piece orientation in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Orientation {
    /// Offset cell to the right.
    Deg0,
    /// Offset cell below.
    Deg90,
    /// Offset cell to the left.
    Deg180,
    /// Offset cell above.
    Deg270,
}

impl Orientation {
    /// All orientations, in rotation order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    /// Parse a degree value; only 0, 90, 180 and 270 are valid.
    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Orientation::Deg0),
            90 => Some(Orientation::Deg90),
            180 => Some(Orientation::Deg180),
            270 => Some(Orientation::Deg270),
            _ => None,
        }
    }

    /// Degree value of this orientation.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// The next orientation, 90 degrees on.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    /// `(dr, dc)` of the offset cell relative to the anchor.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Orientation::Deg0 => (0, 1),
            Orientation::Deg90 => (1, 0),
            Orientation::Deg180 => (0, -1),
            Orientation::Deg270 => (-1, 0),
        }
    }

    /// Recover the orientation from an offset, if it is one of the four.
    #[must_use]
    pub fn from_offset(dr: i32, dc: i32) -> Option<Self> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.offset() == (dr, dc))
    }
}

impl From<Orientation> for u16 {
    fn from(orientation: Orientation) -> Self {
        orientation.degrees()
    }
}

impl TryFrom<u16> for Orientation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Orientation::from_degrees(value).ok_or_else(|| format!("invalid orientation {value}"))
    }
}

/// The two cells of a piece, with their polarities.
pub type Footprint = [(Coord, Polarity); 2];

/// Compute the footprint of a piece anchored at `anchor`.
///
/// The anchor always carries "+", the offset cell "-".
#[must_use]
pub fn footprint(anchor: Coord, orientation: Orientation) -> Footprint {
    let (dr, dc) = orientation.offset();
    [
        (anchor, Polarity::Plus),
        (anchor.step(dr, dc), Polarity::Minus),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_table() {
        assert_eq!(Orientation::Deg0.offset(), (0, 1));
        assert_eq!(Orientation::Deg90.offset(), (1, 0));
        assert_eq!(Orientation::Deg180.offset(), (0, -1));
        assert_eq!(Orientation::Deg270.offset(), (-1, 0));
    }

    #[test]
    fn test_degrees_roundtrip() {
        for orientation in Orientation::ALL {
            assert_eq!(
                Orientation::from_degrees(orientation.degrees()),
                Some(orientation)
            );
        }
        assert_eq!(Orientation::from_degrees(45), None);
        assert_eq!(Orientation::from_degrees(360), None);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Orientation::Deg0.next(), Orientation::Deg90);
        assert_eq!(Orientation::Deg270.next(), Orientation::Deg0);

        let mut orientation = Orientation::Deg0;
        for _ in 0..4 {
            orientation = orientation.next();
        }
        assert_eq!(orientation, Orientation::Deg0);
    }

    #[test]
    fn test_from_offset() {
        for orientation in Orientation::ALL {
            let (dr, dc) = orientation.offset();
            assert_eq!(Orientation::from_offset(dr, dc), Some(orientation));
        }
        assert_eq!(Orientation::from_offset(1, 1), None);
        assert_eq!(Orientation::from_offset(0, 0), None);
    }

    #[test]
    fn test_footprint_polarities() {
        // For every orientation, one "+" at the anchor and one "-" at the
        // table offset.
        let anchor = Coord::new(3, 3);
        for orientation in Orientation::ALL {
            let cells = footprint(anchor, orientation);
            assert_eq!(cells[0], (anchor, Polarity::Plus));

            let (dr, dc) = orientation.offset();
            assert_eq!(cells[1], (anchor.step(dr, dc), Polarity::Minus));
        }
    }

    #[test]
    fn test_orientation_serialization() {
        assert_eq!(serde_json::to_string(&Orientation::Deg90).unwrap(), "90");
        let parsed: Orientation = serde_json::from_str("270").unwrap();
        assert_eq!(parsed, Orientation::Deg270);
        assert!(serde_json::from_str::<Orientation>("91").is_err());
    }
}
