use crate::collision::{Shape, ShapeDefinition};
use crate::components::Agent;
use crate::errors::{GridSightError, GridSightResult};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use validator::Validate;

pub mod grid;

pub use grid::*;

/// Characters understood by every map, before the map's own legend is applied
const DEFAULT_LEGEND: [(char, f32); 3] = [('.', 1.0), ('~', 0.5), ('#', 0.0)];

/// A tile map as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MapDefinition {
    pub name: String,
    #[validate(range(min = 1, max = 2048))]
    pub width: u32,
    #[validate(range(min = 1, max = 2048))]
    pub height: u32,
    /// One string per row, one character per cell
    pub rows: Vec<String>,
    /// Extra or overriding character to movement modifier mappings
    #[serde(default)]
    pub legend: BTreeMap<String, f32>,
    /// Shape of the agent travelling this map; a unit square when absent
    #[serde(default)]
    pub agent: Option<ShapeDefinition>,
}

impl MapDefinition {
    /// Create a new map definition with validation
    pub fn new(name: String, rows: Vec<String>) -> GridSightResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count() as u32);
        let map = Self {
            name,
            width,
            height,
            rows,
            legend: BTreeMap::new(),
            agent: None,
        };

        map.check()?;
        Ok(map)
    }

    /// Generate a map where each cell is independently blocked with probability `density`
    pub fn random(
        name: String,
        width: u32,
        height: u32,
        density: f32,
        seed: u64,
    ) -> GridSightResult<Self> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let density = f64::from(density.clamp(0.0, 1.0));

        let rows = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| if rng.gen_bool(density) { '#' } else { '.' })
                    .collect()
            })
            .collect();

        let map = Self {
            name,
            width,
            height,
            rows,
            legend: BTreeMap::new(),
            agent: None,
        };
        map.check()?;
        Ok(map)
    }

    /// Validate ranges, row shapes and legend coverage
    pub fn check(&self) -> GridSightResult<()> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            GridSightError::MapValidationFailed {
                reason: error_details,
            }
        })?;

        if self.rows.len() != self.height as usize {
            return Err(GridSightError::InvalidMapData {
                reason: format!(
                    "Map has {} rows but declares height {}",
                    self.rows.len(),
                    self.height
                ),
            });
        }

        let legend = self.legend_map()?;
        for (y, row) in self.rows.iter().enumerate() {
            let length = row.chars().count();
            if length != self.width as usize {
                return Err(GridSightError::InvalidMapData {
                    reason: format!(
                        "Row {y} has {length} cells but the map is {} wide",
                        self.width
                    ),
                });
            }
            if let Some(unknown) = row.chars().find(|c| !legend.contains_key(c)) {
                return Err(GridSightError::InvalidMapData {
                    reason: format!("Row {y} uses unknown tile character '{unknown}'"),
                });
            }
        }

        Ok(())
    }

    fn legend_map(&self) -> GridSightResult<BTreeMap<char, f32>> {
        let mut legend: BTreeMap<char, f32> = DEFAULT_LEGEND.into_iter().collect();

        for (key, modifier) in &self.legend {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    legend.insert(symbol, *modifier);
                }
                _ => {
                    return Err(GridSightError::InvalidMapData {
                        reason: format!("Legend key '{key}' must be a single character"),
                    });
                }
            }
        }

        Ok(legend)
    }

    /// Build the tile grid described by this map
    pub fn to_grid(&self) -> GridSightResult<TileGrid> {
        self.check()?;
        let legend = self.legend_map()?;

        let tiles = self
            .rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|symbol| Tile::new(legend.get(&symbol).copied().unwrap_or(0.0)))
            .collect();

        let grid = TileGrid::new(self.width, self.height, tiles)?;
        let blocked = grid.blocked_count();
        let total = grid.tiles().len();
        info!(
            "Map '{name}': {width}x{height}, {blocked}/{total} cells blocked ({percentage:.1}%)",
            name = self.name,
            width = self.width,
            height = self.height,
            percentage = (blocked as f32 / total as f32) * 100.0
        );

        Ok(grid)
    }

    /// The agent described by this map, placed at `position`
    pub fn agent_at(&self, position: Vec2) -> GridSightResult<Agent> {
        let shape = match &self.agent {
            Some(definition) => Shape::try_from(definition)?,
            None => Shape::unit_square(),
        };
        Ok(Agent::new(position, shape))
    }

    /// Load a map; `.toml` files are read as text, anything else as binary
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GridSightResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GridSightError::MapFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let map: MapDefinition = if is_toml(path) {
            toml::from_str(&std::fs::read_to_string(path)?)?
        } else {
            let data = std::fs::read(path)?;
            let (map, _): (MapDefinition, usize) =
                bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(
                    |e| GridSightError::CorruptedMapFile {
                        reason: format!("Failed to deserialize map data: {e}"),
                    },
                )?;
            map
        };

        map.check()?;
        Ok(map)
    }

    /// Save the map; the format follows the file extension as in [`MapDefinition::load_from_file`]
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GridSightResult<()> {
        self.check()?;
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if is_toml(path) {
            std::fs::write(path, toml::to_string_pretty(self)?)?;
        } else {
            let data =
                bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                    GridSightError::InvalidMapData {
                        reason: format!("Failed to serialize map: {e}"),
                    }
                })?;
            std::fs::write(path, data)?;
        }

        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::ShapeGeometry;
    use crate::pathfinding::GridAdapter;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn temp_path(file: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("gridsight-test-{}", std::process::id()))
            .join(file)
    }

    #[test]
    fn test_map_creation() {
        let map = MapDefinition::new("small".to_string(), rows(&["..#", "~.."])).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);

        let grid = map.to_grid().unwrap();
        assert_eq!(grid.blocked_count(), 1);
        assert!(!grid.is_passable(IVec2::new(2, 0)));
        assert_eq!(
            grid.tile_at(0, 1).map(|tile| tile.movement_modifier.get()),
            Some(0.5)
        );
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = MapDefinition::new("ragged".to_string(), rows(&["...", ".."]));
        assert!(matches!(result, Err(GridSightError::InvalidMapData { .. })));
    }

    #[test]
    fn test_empty_map_rejected() {
        let result = MapDefinition::new("empty".to_string(), Vec::new());
        assert!(matches!(
            result,
            Err(GridSightError::MapValidationFailed { .. })
        ));
    }

    #[test]
    fn test_unknown_character_rejected() {
        let result = MapDefinition::new("odd".to_string(), rows(&[".x."]));
        assert!(matches!(result, Err(GridSightError::InvalidMapData { .. })));
    }

    #[test]
    fn test_custom_legend() {
        let mut map = MapDefinition::new("legend".to_string(), rows(&["..", ".."])).unwrap();
        map.rows = rows(&["ab", ".."]);
        map.legend.insert("a".to_string(), 2.0);
        map.legend.insert("b".to_string(), 0.0);

        let grid = map.to_grid().unwrap();
        assert_eq!(grid.tile_at(0, 0).unwrap().movement_modifier.get(), 2.0);
        assert!(!grid.tile_at(1, 0).unwrap().is_passable());

        map.legend.insert("ab".to_string(), 1.0);
        assert!(map.check().is_err());
    }

    #[test]
    fn test_parse_toml_map() {
        let text = r###"
            name = "corridor"
            width = 4
            height = 2
            rows = ["....", "##.."]

            [agent]
            kind = "rectangle"
            size = [2.0, 1.0]
        "###;
        let map: MapDefinition = toml::from_str(text).unwrap();
        map.check().unwrap();

        let agent = map.agent_at(Vec2::ZERO).unwrap();
        assert_eq!(agent.shape.bounding_box().size(), Vec2::new(2.0, 1.0));
        assert_eq!(map.to_grid().unwrap().blocked_count(), 2);
    }

    #[test]
    fn test_default_agent_is_unit_square() {
        let map = MapDefinition::new("plain".to_string(), rows(&["."])).unwrap();
        assert_eq!(map.agent_at(Vec2::ONE).unwrap(), Agent::unit(Vec2::ONE));
    }

    #[test]
    fn test_random_map_is_reproducible() {
        let a = MapDefinition::random("a".to_string(), 16, 8, 0.3, 99).unwrap();
        let b = MapDefinition::random("a".to_string(), 16, 8, 0.3, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows.len(), 8);
        assert!(a.rows.iter().all(|row| row.len() == 16));

        let empty = MapDefinition::random("open".to_string(), 4, 4, 0.0, 1).unwrap();
        assert_eq!(empty.to_grid().unwrap().blocked_count(), 0);
        let full = MapDefinition::random("full".to_string(), 4, 4, 1.0, 1).unwrap();
        assert_eq!(full.to_grid().unwrap().blocked_count(), 16);
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let mut map = MapDefinition::random("disk".to_string(), 6, 5, 0.25, 3).unwrap();
        map.agent = Some(ShapeDefinition::rectangle(Vec2::new(1.0, 2.0)));

        for file in ["map.toml", "map.bin"] {
            let path = temp_path(file);
            map.save_to_file(&path).unwrap();
            let loaded = MapDefinition::load_from_file(&path).unwrap();
            assert_eq!(loaded, map);
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_missing_and_corrupted_files() {
        let missing = MapDefinition::load_from_file(temp_path("missing.toml"));
        assert!(matches!(
            missing,
            Err(GridSightError::MapFileNotFound { .. })
        ));

        let path = temp_path("corrupt.bin");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0xff, 0x00, 0x13]).unwrap();
        let corrupt = MapDefinition::load_from_file(&path);
        assert!(matches!(
            corrupt,
            Err(GridSightError::CorruptedMapFile { .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
