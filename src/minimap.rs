//! Top-down debug view of the map and the player.

use crate::config::MinimapConfig;
use crate::map::Map;
use crate::player::Pose;
use crate::ray::heading_vector;
use crate::surface::{Rgb, ScreenRect, Surface};
use crate::view::Column;
use glam::{IVec2, Vec2};

const FLOOR: Rgb = Rgb::new(255, 255, 255);
const WALL: Rgb = Rgb::new(32, 32, 32);
const PLAYER: Rgb = Rgb::new(0, 0, 128);
const FACING: Rgb = Rgb::new(255, 0, 0);
const RAY: Rgb = Rgb::new(0, 0xDD, 0);

/// length of the facing line in pixels
const FACING_LENGTH: f32 = 8.;

pub struct MinimapView<'a> {
    map: &'a Map,
    config: &'a MinimapConfig,
}

impl<'a> MinimapView<'a> {
    pub fn new(map: &'a Map, config: &'a MinimapConfig) -> Self {
        Self { map, config }
    }

    /// screen position of a map-space point
    pub fn to_screen(&self, point: Vec2) -> IVec2 {
        (self.config.origin.as_vec2() + point * self.config.tile_size as f32).as_ivec2()
    }

    pub fn render(
        &self,
        pose: Pose,
        columns: &[Column],
        surface: &mut impl Surface,
    ) -> anyhow::Result<()> {
        let size = self.config.tile_size;
        for (pos, tile) in self.map.iter() {
            let corner = self.config.origin + (pos * size).as_ivec2();
            let color = if tile.is_passable() { FLOOR } else { WALL };
            surface.fill_rect(ScreenRect::new(corner.x, corner.y, size, size), color)?;
        }

        let player = self.to_screen(pose.position.truncate());

        if self.config.show_rays {
            for hit in columns.iter().filter_map(|column| column.hit) {
                surface.draw_line(player, self.to_screen(hit.point.truncate()), RAY)?;
            }
        }

        surface.fill_rect(ScreenRect::new(player.x - 1, player.y - 1, 3, 3), PLAYER)?;

        let facing = (heading_vector(pose.heading) * FACING_LENGTH).as_ivec2();
        surface.draw_line(player, player + facing, FACING)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::tests::{Op, Recorder};
    use glam::Vec3;

    fn config() -> MinimapConfig {
        MinimapConfig {
            enabled: true,
            origin: IVec2::new(10, 20),
            tile_size: 4,
            show_rays: false,
        }
    }

    #[test]
    fn draws_tiles_then_player() {
        let map = Map::from_rows(&["##", "# "]).unwrap();
        let config = config();
        let minimap = MinimapView::new(&map, &config);
        let pose = Pose {
            position: Vec3::new(1.5, 1.5, 0.),
            heading: 0.,
        };

        let mut surface = Recorder::default();
        minimap.render(pose, &[], &mut surface).unwrap();

        assert_eq!(
            surface.ops,
            vec![
                Op::Fill(ScreenRect::new(10, 20, 4, 4), WALL),
                Op::Fill(ScreenRect::new(14, 20, 4, 4), WALL),
                Op::Fill(ScreenRect::new(10, 24, 4, 4), WALL),
                Op::Fill(ScreenRect::new(14, 24, 4, 4), FLOOR),
                Op::Fill(ScreenRect::new(15, 25, 3, 3), PLAYER),
                Op::Line(IVec2::new(16, 26), IVec2::new(24, 26), FACING),
            ]
        );
    }

    #[test]
    fn rays_are_drawn_when_enabled() {
        use crate::config::ViewConfig;
        use crate::view::WorldView;

        let map = Map::from_rows(&["####", "#  #", "#  #", "####"]).unwrap();
        let view_config = ViewConfig {
            columns: 5,
            ..ViewConfig::default()
        };
        let pose = Pose {
            position: Vec3::new(2., 2., 0.),
            heading: 1.,
        };
        let columns = WorldView::new(&map, &view_config)
            .columns(pose, glam::UVec2::new(50, 50))
            .collect::<Vec<_>>();

        let config = MinimapConfig {
            show_rays: true,
            ..config()
        };
        let mut surface = Recorder::default();
        MinimapView::new(&map, &config)
            .render(pose, &columns, &mut surface)
            .unwrap();

        let rays = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(_, _, color) if *color == RAY))
            .count();
        assert_eq!(rays, 5);
    }
}
