//! Physics configuration resource.
//!
//! Manages the settings of the collision pipeline loaded from an INI
//! configuration file. Provides defaults for a safe startup and methods to
//! load/save the configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! x = 0
//! y = 0
//! width = 1024
//! height = 1024
//!
//! [quadtree]
//! max_objects = 10
//! max_levels = 5
//!
//! [events]
//! dedupe_pairs = true
//!
//! [simulation]
//! fixed_delta = 0.016666668
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::geometry::Rect;
use crate::resources::spatialindex::{MAX_LEVELS, MAX_OBJECTS};

/// Default safe values for startup
const DEFAULT_WORLD_X: f32 = 0.0;
const DEFAULT_WORLD_Y: f32 = 0.0;
const DEFAULT_WORLD_WIDTH: f32 = 1024.0;
const DEFAULT_WORLD_HEIGHT: f32 = 1024.0;
const DEFAULT_DEDUPE_PAIRS: bool = true;
const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./physics.ini";

/// Physics configuration resource.
///
/// The world rectangle becomes the root of the broad-phase quadtree. Bodies
/// outside of it still collide, they just lose spatial pruning.
#[derive(Resource, Debug, Clone)]
pub struct PhysicsConfig {
    pub world_x: f32,
    pub world_y: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Bucket capacity of a quadtree node before it splits.
    pub max_objects: usize,
    /// Deepest quadtree level (root is 0).
    pub max_levels: usize,
    /// Report each unordered colliding pair at most once per tick.
    pub dedupe_pairs: bool,
    /// Delta time in seconds used by fixed-step runners.
    pub fixed_delta: f32,
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_x: DEFAULT_WORLD_X,
            world_y: DEFAULT_WORLD_Y,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            max_objects: MAX_OBJECTS,
            max_levels: MAX_LEVELS,
            dedupe_pairs: DEFAULT_DEDUPE_PAIRS,
            fixed_delta: DEFAULT_FIXED_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [world] section
        if let Some(x) = config.getfloat("world", "x").ok().flatten() {
            self.world_x = x as f32;
        }
        if let Some(y) = config.getfloat("world", "y").ok().flatten() {
            self.world_y = y as f32;
        }
        if let Some(width) = config.getfloat("world", "width").ok().flatten() {
            self.world_width = width as f32;
        }
        if let Some(height) = config.getfloat("world", "height").ok().flatten() {
            self.world_height = height as f32;
        }

        // [quadtree] section
        if let Some(max_objects) = config.getuint("quadtree", "max_objects").ok().flatten() {
            self.max_objects = max_objects as usize;
        }
        if let Some(max_levels) = config.getuint("quadtree", "max_levels").ok().flatten() {
            self.max_levels = max_levels as usize;
        }

        // [events] section
        if let Some(dedupe) = config.getbool("events", "dedupe_pairs").ok().flatten() {
            self.dedupe_pairs = dedupe;
        }

        // [simulation] section
        if let Some(dt) = config.getfloat("simulation", "fixed_delta").ok().flatten() {
            self.fixed_delta = dt as f32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }

        info!(
            "Loaded physics config: world=({}, {}, {}x{}), quadtree={}/{}, dedupe={}, dt={}, time_scale={}",
            self.world_x,
            self.world_y,
            self.world_width,
            self.world_height,
            self.max_objects,
            self.max_levels,
            self.dedupe_pairs,
            self.fixed_delta,
            self.time_scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "x", Some(self.world_x.to_string()));
        config.set("world", "y", Some(self.world_y.to_string()));
        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));

        // [quadtree] section
        config.set("quadtree", "max_objects", Some(self.max_objects.to_string()));
        config.set("quadtree", "max_levels", Some(self.max_levels.to_string()));

        // [events] section
        config.set("events", "dedupe_pairs", Some(self.dedupe_pairs.to_string()));

        // [simulation] section
        config.set("simulation", "fixed_delta", Some(self.fixed_delta.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved physics config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the world rectangle covered by the quadtree root.
    pub fn set_world_bounds(&mut self, bounds: Rect) {
        self.world_x = bounds.x;
        self.world_y = bounds.y;
        self.world_width = bounds.w;
        self.world_height = bounds.h;
    }

    /// Get the world rectangle covered by the quadtree root.
    pub fn world_bounds(&self) -> Rect {
        Rect::new(self.world_x, self.world_y, self.world_width, self.world_height)
    }
}
