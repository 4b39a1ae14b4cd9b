use crate::assets::Assets;
use glam::UVec2;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a world could not be built.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read world file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("world source has no `WIDTH HEIGHT` header")]
    MissingHeader,

    #[error("invalid world header value: {0}")]
    InvalidHeader(String),

    #[error("world dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("world is truncated: expected {expected} tiles, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Wall(char),
}

impl Tile {
    pub fn from_code(code: char) -> Self {
        match code {
            ' ' => Tile::Empty,
            other => Tile::Wall(other),
        }
    }

    pub fn code(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall(code) => code,
        }
    }

    pub fn is_passable(self) -> bool {
        self == Tile::Empty
    }
}

/// Rectangular tile grid, immutable once built.
#[derive(Clone, PartialEq, Debug)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Map {
    /// build a map from row-major tiles
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyDimensions { width, height });
        }

        let expected = tile_count(width, height)?;
        if tiles.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                found: tiles.len(),
            });
        }

        let mut tiles = tiles;
        tiles.truncate(expected);

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// build a map from equally long rows of tile codes
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LoadError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(tile_count(width, rows.len())?);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LoadError::RaggedRow {
                    row: index,
                    expected: width,
                    found,
                });
            }
            tiles.extend(row.chars().map(Tile::from_code));
        }

        Self::new(width, rows.len(), tiles)
    }

    /// load a world file through the asset cache
    pub fn load(assets: &mut Assets, name: impl AsRef<Path>) -> Result<Self, LoadError> {
        let name = name.as_ref();
        log::info!("loading world at {}", name.display());
        let path = assets.resolve(name);
        let source = assets
            .text(name)
            .map_err(|source| LoadError::Io { path, source })?;

        let map = Self::parse(source)?;
        log::debug!("world is {}x{}", map.width, map.height);
        Ok(map)
    }

    /// parse a `WIDTH HEIGHT` header followed by `HEIGHT` rows of `WIDTH` tile codes
    ///
    /// Line breaks between rows are skipped and never count as tiles. Anything after the
    /// last expected tile is ignored.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let (width, rest) = header_value(source)?;
        let (height, rest) = header_value(rest)?;

        // the rest of the header line is not tile data
        let body = match rest.split_once('\n') {
            Some((line, body)) if line.trim().is_empty() => body,
            _ => rest,
        };

        let expected = tile_count(width, height)?;
        let tiles = body
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .take(expected)
            .map(Tile::from_code)
            .collect::<Vec<_>>();

        Self::new(width, height, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> UVec2 {
        UVec2::new(self.width as u32, self.height as u32)
    }

    /// whether `(x, y)` names a tile of this map
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is outside the map; callers are expected to check with
    /// [`Map::contains`] first.
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        assert!(
            x < self.width && y < self.height,
            "out of bounds world-tile access at ({x}, {y}) in a {}x{} world",
            self.width,
            self.height
        );
        self.tiles[y * self.width + x]
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).is_passable()
    }

    /// every tile with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (UVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(idx, tile)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (UVec2::new(x as u32, y as u32), *tile)
        })
    }
}

fn header_value(source: &str) -> Result<(usize, &str), LoadError> {
    let source = source.trim_start();
    if source.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let end = source.find(char::is_whitespace).unwrap_or(source.len());
    let (token, rest) = source.split_at(end);
    let value = token
        .parse()
        .map_err(|_| LoadError::InvalidHeader(token.to_owned()))?;

    Ok((value, rest))
}

/// `width * height`, or an error when the header describes more tiles than fit in memory
fn tile_count(width: usize, height: usize) -> Result<usize, LoadError> {
    width
        .checked_mul(height)
        .ok_or_else(|| LoadError::InvalidHeader(format!("{width}x{height}")))
}
