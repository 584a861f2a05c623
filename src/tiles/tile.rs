//! Tiles: the immutable game pieces.
//!
//! A tile has an id, a colour and a face number 1..=13. Whether it acts as
//! a wildcard is decided after the indicator is revealed, so the flag is
//! applied as a second construction step producing a new `Tile` value
//! (see [`Tile::as_wildcard`]) rather than by mutating a shared tile.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest face number.
pub const MIN_NUMBER: u8 = 1;

/// Highest face number.
pub const MAX_NUMBER: u8 = 13;

/// Face number after `number`, wrapping 13 → 1.
#[must_use]
pub const fn successor(number: u8) -> u8 {
    if number >= MAX_NUMBER {
        MIN_NUMBER
    } else {
        number + 1
    }
}

/// Face number before `number`, wrapping 1 → 13.
#[must_use]
pub const fn predecessor(number: u8) -> u8 {
    if number <= MIN_NUMBER {
        MAX_NUMBER
    } else {
        number - 1
    }
}

/// Tile colour.
///
/// Declaration order is the canonical order used everywhere tiles are
/// sorted: red, black, blue, yellow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Blue,
    Yellow,
}

impl Color {
    /// All colours in canonical order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Black, Color::Blue, Color::Yellow];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tile identifier, unique within one tile set.
///
/// Serialized as the opaque string `"tile_<n>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TileId(pub u8);

impl TileId {
    const PREFIX: &'static str = "tile_";

    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Returned when a string is not of the form `tile_<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed tile id {0:?}")]
pub struct ParseTileIdError(pub String);

impl std::str::FromStr for TileId {
    type Err = ParseTileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse::<u8>().ok())
            .map(TileId)
            .ok_or_else(|| ParseTileIdError(s.to_string()))
    }
}

impl From<TileId> for String {
    fn from(id: TileId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for TileId {
    type Error = ParseTileIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    id: TileId,
    color: Color,
    number: u8,
    is_wildcard: bool,
}

impl Tile {
    /// Create a plain (non-wildcard) tile.
    #[must_use]
    pub const fn new(id: TileId, color: Color, number: u8) -> Self {
        debug_assert!(number >= MIN_NUMBER && number <= MAX_NUMBER);
        Self {
            id,
            color,
            number,
            is_wildcard: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// The same physical tile, flagged as a wildcard.
    #[must_use]
    pub const fn as_wildcard(self) -> Self {
        Self {
            is_wildcard: true,
            ..self
        }
    }

    /// Compare faces (colour, number, wildcard flag), ignoring identity.
    #[must_use]
    pub fn same_face(&self, other: &Tile) -> bool {
        self.color == other.color
            && self.number == other.number
            && self.is_wildcard == other.is_wildcard
    }

    /// Text shown on the tile face: `JOKER` for wildcards, else the number.
    #[must_use]
    pub fn display_value(&self) -> String {
        if self.is_wildcard {
            "JOKER".to_string()
        } else {
            self.number.to_string()
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wildcard {
            write!(f, "{} {} (joker)", self.color, self.number)
        } else {
            write!(f, "{} {}", self.color, self.number)
        }
    }
}

/// The joker criterion derived from the indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Joker {
    pub color: Color,
    pub number: u8,
}

impl Joker {
    /// Same colour as the indicator, next number up (13 wraps to 1).
    #[must_use]
    pub const fn from_indicator(indicator: &Tile) -> Self {
        Self {
            color: indicator.color,
            number: successor(indicator.number),
        }
    }

    /// Does `tile` have the joker's face?
    #[must_use]
    pub fn matches(&self, tile: &Tile) -> bool {
        tile.color == self.color && tile.number == self.number
    }
}

/// The revealed indicator tile together with the joker it selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub tile: Tile,
    pub joker: Joker,
}

impl Indicator {
    #[must_use]
    pub const fn new(tile: Tile) -> Self {
        Self {
            tile,
            joker: Joker::from_indicator(&tile),
        }
    }
}
