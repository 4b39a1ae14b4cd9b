use crate::assets::Assets;
use crate::config::{Config, MinimapConfig, ViewConfig, MAX_PHYSICS_STEPS};
use crate::frame::FixedStep;
use crate::map::{LoadError, Map};
use crate::minimap::MinimapView;
use crate::player::{Action, Player};
use crate::surface::{Rgb, Surface};
use crate::view::{Column, WorldView};
use glam::UVec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    Minimap,
    Exit,
}

/// The logical inputs the session reacts to, independent of any key binding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
    ToggleMinimap,
    Quit,
}

pub struct Game {
    map: Map,
    player: Player,
    pub game_state: GameState,
    view: ViewConfig,
    minimap: MinimapConfig,
    sky_color: Rgb,
    fixed_step: Option<FixedStep>,
    columns: Vec<Column>,
}

impl Game {
    /// start a session on `map` with the player at the configured spawn
    pub fn new(map: Map, config: &Config) -> Self {
        let player = Player::new(config.spawn, config.spawn_heading, &config.player);

        let spawn = config.spawn.truncate().floor().as_ivec2();
        if !map.contains(spawn.x, spawn.y) {
            log::warn!("spawn {} is outside the world", config.spawn);
        } else if !map.is_passable(spawn.x as usize, spawn.y as usize) {
            log::warn!("spawn {} is inside a wall", config.spawn);
        }

        let game_state = if config.minimap.enabled {
            GameState::Minimap
        } else {
            GameState::Playing
        };

        Self {
            map,
            player,
            game_state,
            view: config.view,
            minimap: config.minimap,
            sky_color: config.sky_color,
            fixed_step: config
                .fixed_step
                .map(|step| FixedStep::new(step, MAX_PHYSICS_STEPS)),
            columns: Vec::with_capacity(config.view.columns),
        }
    }

    /// load the configured world through `assets` and start a session on it
    pub fn load(assets: &mut Assets, config: &Config) -> Result<Self, LoadError> {
        let map = Map::load(assets, &config.world_path)?;
        Ok(Self::new(map, config))
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// columns computed by the last [`Game::render`]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => self.player.set_flag(action, true),
            InputEvent::Released(action) => self.player.set_flag(action, false),
            InputEvent::ToggleMinimap => {
                self.game_state = match self.game_state {
                    GameState::Minimap => GameState::Playing,
                    GameState::Playing => GameState::Minimap,
                    GameState::Exit => GameState::Exit,
                }
            }
            InputEvent::Quit => {
                log::info!("quit requested");
                self.player.release_all();
                self.game_state = GameState::Exit;
            }
        }
    }

    /// advance the player by the measured frame time
    pub fn update(&mut self, dt: f32) {
        match self.fixed_step.as_mut() {
            Some(fixed) => {
                let step = fixed.step();
                for _ in 0..fixed.steps(dt) {
                    self.player.advance(step);
                }
            }
            None => self.player.advance(dt),
        }
    }

    /// draw the world view, then the minimap when it is shown
    pub fn render(&mut self, surface: &mut impl Surface, viewport: UVec2) -> anyhow::Result<()> {
        // one pose for the whole frame
        let pose = self.player.pose();

        surface.clear(self.sky_color)?;

        self.columns.clear();
        let view = WorldView::new(&self.map, &self.view);
        for column in view.columns(pose, viewport) {
            if let Some(slab) = column.slab {
                surface.fill_rect(slab.rect, slab.color)?;
            }
            self.columns.push(column);
        }

        if self.game_state == GameState::Minimap {
            MinimapView::new(&self.map, &self.minimap).render(pose, &self.columns, surface)?;
        }

        Ok(())
    }
}
