use crate::surface::Rgb;
use anyhow::Context;
use glam::{IVec2, UVec2, Vec3};
use std::path::PathBuf;

// dimensions of screen
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

pub const TARGET_FPS: u64 = 30;

pub const WORLD_PATH: &str = "map/demo.txt";
pub const SPAWN: Vec3 = Vec3::new(6.5, 6.5, 0.5);
pub const SPAWN_HEADING: f32 = 0.;

pub const COLUMNS: usize = 300;
/// horizontal field of view in radians
pub const FOV: f32 = 1.2;
pub const WALL_HEIGHT: f32 = 3.;

/// tiles per second
pub const MOVEMENT_SPEED: f32 = 3.;
/// radians per second
pub const ROTATION_SPEED: f32 = 2.;

pub const MAX_PHYSICS_STEPS: u32 = 8;

pub const SKY_COLOR: Rgb = Rgb::new(227, 243, 255);
pub const WALL_COLOR: Rgb = Rgb::new(128, 0, 0);
/// brightness of east/west wall faces relative to north/south ones
pub const SIDE_SHADE: f32 = 0.75;

pub const ENV_LOG: &str = "RAYCASTER_LOG";
pub const ENV_WORLD: &str = "RAYCASTER_WORLD";
pub const ENV_FIXED_STEP: &str = "RAYCASTER_FIXED_STEP";
pub const ENV_FPS: &str = "RAYCASTER_FPS";

/// What a column whose ray leaves the map draws.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NoHitPolicy {
    /// draw nothing
    Skip,
    /// draw a slab as if a wall stood at this distance
    MaxDepth(f32),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewConfig {
    pub columns: usize,
    pub fov: f32,
    pub wall_height: f32,
    pub wall_color: Rgb,
    pub side_shade: f32,
    pub no_hit: NoHitPolicy,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: COLUMNS,
            fov: FOV,
            wall_height: WALL_HEIGHT,
            wall_color: WALL_COLOR,
            side_shade: SIDE_SHADE,
            no_hit: NoHitPolicy::Skip,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlayerConfig {
    pub movement_speed: f32,
    pub rotation_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement_speed: MOVEMENT_SPEED,
            rotation_speed: ROTATION_SPEED,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MinimapConfig {
    pub enabled: bool,
    /// top-left corner on screen
    pub origin: IVec2,
    /// pixels per tile
    pub tile_size: u32,
    pub show_rays: bool,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origin: IVec2::new(10, 10),
            tile_size: 8,
            show_rays: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Config {
    pub window: UVec2,
    pub target_fps: u64,
    pub world_path: PathBuf,
    pub spawn: Vec3,
    pub spawn_heading: f32,
    /// seconds per physics step; `None` integrates the measured frame time directly
    pub fixed_step: Option<f32>,
    pub sky_color: Rgb,
    pub view: ViewConfig,
    pub player: PlayerConfig,
    pub minimap: MinimapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: UVec2::new(WIDTH, HEIGHT),
            target_fps: TARGET_FPS,
            world_path: WORLD_PATH.into(),
            spawn: SPAWN,
            spawn_heading: SPAWN_HEADING,
            fixed_step: None,
            sky_color: SKY_COLOR,
            view: ViewConfig::default(),
            player: PlayerConfig::default(),
            minimap: MinimapConfig::default(),
        }
    }
}

impl Config {
    /// defaults, overridden by `RAYCASTER_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut this = Self::default();

        if let Some(path) = var(ENV_WORLD) {
            this.world_path = path.into();
        }

        if let Some(step) = var(ENV_FIXED_STEP) {
            let step: f32 = step
                .trim()
                .parse()
                .with_context(|| format!("{ENV_FIXED_STEP} is not a number: {step}"))?;
            if !(step > 0. && step.is_finite()) {
                anyhow::bail!("{ENV_FIXED_STEP} must be a positive number of seconds, got {step}");
            }
            this.fixed_step = Some(step);
        }

        if let Some(fps) = var(ENV_FPS) {
            this.target_fps = fps
                .trim()
                .parse()
                .with_context(|| format!("{ENV_FPS} is not an integer: {fps}"))?;
        }

        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.view.columns, 300);
        assert_eq!(config.view.no_hit, NoHitPolicy::Skip);
        assert_eq!(config.fixed_step, None);
    }

    #[test]
    fn environment_overrides() {
        let config = Config::from_vars(vars(&[
            (ENV_WORLD, "worlds/big.txt"),
            (ENV_FIXED_STEP, " 0.01 "),
            (ENV_FPS, "60"),
        ]))
        .unwrap();
        assert_eq!(config.world_path, PathBuf::from("worlds/big.txt"));
        assert_eq!(config.fixed_step, Some(0.01));
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn malformed_overrides_fail() {
        assert!(Config::from_vars(vars(&[(ENV_FIXED_STEP, "fast")])).is_err());
        assert!(Config::from_vars(vars(&[(ENV_FIXED_STEP, "-1")])).is_err());
        assert!(Config::from_vars(vars(&[(ENV_FPS, "thirty")])).is_err());
    }
}
