use serde::Deserialize;
use std::fs;
use std::num::NonZeroU8;
use std::path::Path;

use crate::error::ConfigError;

/// Result of a bounds-checked grid lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall(NonZeroU8),
    OutOfBounds,
}

impl Tile {
    pub fn is_open(self) -> bool {
        self == Tile::Open
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}

// 1 = bricks, 2 = blue tiles
#[rustfmt::skip]
const LEGACY_MAP: [[u8; 16]; 16] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 2, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[derive(Deserialize)]
struct MapFile {
    map: Vec<Vec<u8>>,
}

/// Immutable tile grid. Id 0 is walkable, anything else is a wall whose id
/// picks a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl WorldGrid {
    /// Builds a grid from row-major `cells`.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroGridDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(ConfigError::DimensionsTooLarge { width, height })?;
        if cells.len() != expected {
            return Err(ConfigError::GridSizeMismatch {
                width,
                height,
                expected,
                got: cells.len(),
            });
        }
        Ok(WorldGrid {
            width,
            height,
            cells,
        })
    }

    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroGridDimension { width, height });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ConfigError::RaggedGrid {
                row,
                len: r.len(),
                expected: width,
            });
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// The compiled-in 16x16 level.
    pub fn legacy() -> Self {
        WorldGrid {
            width: 16,
            height: 16,
            cells: LEGACY_MAP.iter().flatten().copied().collect(),
        }
    }

    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: MapFile = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_rows(file.map)
    }

    /// Reads a map file of the form `map = [[1, 1, 1], [1, 0, 1], [1, 1, 1]]`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let world = Self::from_toml_str(&contents, path)?;
        if !world.has_solid_border() {
            log::warn!(
                "map {} has open border cells, rays may leave the grid",
                path.display()
            );
        }
        Ok(world)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_at(&self, x: i64, y: i64) -> Tile {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Tile::OutOfBounds;
        }
        match NonZeroU8::new(self.cells[y as usize * self.width + x as usize]) {
            Some(id) => Tile::Wall(id),
            None => Tile::Open,
        }
    }

    /// Raw tile id, `None` outside the grid.
    pub fn id_at(&self, x: i64, y: i64) -> Option<u8> {
        match self.tile_at(x, y) {
            Tile::Open => Some(0),
            Tile::Wall(id) => Some(id.get()),
            Tile::OutOfBounds => None,
        }
    }

    pub fn is_open(&self, x: i64, y: i64) -> bool {
        self.tile_at(x, y).is_open()
    }

    pub fn has_solid_border(&self) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        (0..w).all(|x| self.tile_at(x, 0).is_wall() && self.tile_at(x, h - 1).is_wall())
            && (0..h).all(|y| self.tile_at(0, y).is_wall() && self.tile_at(w - 1, y).is_wall())
    }
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_map_is_bordered() {
        let world = WorldGrid::legacy();
        assert_eq!((world.width(), world.height()), (16, 16));
        assert!(world.has_solid_border());
        assert_eq!(world.id_at(9, 1), Some(2));
        assert_eq!(world.id_at(9, 2), Some(1));
        assert!(world.is_open(3, 3));
    }

    #[test]
    fn out_of_bounds_is_distinct_from_open_and_wall() {
        let world = WorldGrid::legacy();
        assert_eq!(world.tile_at(-1, 0), Tile::OutOfBounds);
        assert_eq!(world.tile_at(0, 16), Tile::OutOfBounds);
        assert_eq!(world.tile_at(16, 3), Tile::OutOfBounds);
        assert_eq!(world.id_at(-1, -1), None);
        assert!(!world.is_open(-1, 5));
        assert!(world.tile_at(0, 0).is_wall());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            WorldGrid::new(0, 4, vec![]),
            Err(ConfigError::ZeroGridDimension { .. })
        ));
        assert!(matches!(
            WorldGrid::new(2, 2, vec![1, 1, 1]),
            Err(ConfigError::GridSizeMismatch { expected: 4, got: 3, .. })
        ));
        assert!(matches!(
            WorldGrid::from_rows(vec![]),
            Err(ConfigError::ZeroGridDimension { .. })
        ));
        assert!(matches!(
            WorldGrid::from_rows(vec![vec![1, 1], vec![1]]),
            Err(ConfigError::RaggedGrid { row: 1, len: 1, expected: 2 })
        ));
    }

    #[test]
    fn huge_dimensions_are_an_error() {
        assert!(matches!(
            WorldGrid::new(usize::MAX, 2, vec![]),
            Err(ConfigError::DimensionsTooLarge { height: 2, .. })
        ));
    }

    #[test]
    fn parses_toml_map() {
        let src = "map = [[1, 1, 1], [1, 0, 1], [1, 1, 1]]";
        let world = WorldGrid::from_toml_str(src, Path::new("inline.toml")).unwrap();
        assert_eq!(world.width(), 3);
        assert!(world.is_open(1, 1));
        assert!(world.has_solid_border());
    }

    #[test]
    fn detects_open_border() {
        let world = WorldGrid::from_rows(vec![vec![1, 0, 1], vec![1, 0, 1], vec![1, 1, 1]]).unwrap();
        assert!(!world.has_solid_border());
    }
}
