use crate::config::{NoHitPolicy, ViewConfig};
use crate::map::Map;
use crate::player::Pose;
use crate::ray::{self, Cardinal, RayHit};
use crate::surface::{Rgb, ScreenRect, Surface};
use glam::UVec2;

/// One vertical wall strip.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Slab {
    pub rect: ScreenRect,
    pub color: Rgb,
}

/// Everything computed for one screen column.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Column {
    pub index: usize,
    /// absolute ray angle
    pub angle: f32,
    /// ray angle relative to the view direction
    pub offset: f32,
    pub hit: Option<RayHit>,
    /// distance to the hit along the view direction
    pub distance: Option<f32>,
    pub slab: Option<Slab>,
}

/// First-person projection of a map.
pub struct WorldView<'a> {
    map: &'a Map,
    config: &'a ViewConfig,
}

impl<'a> WorldView<'a> {
    pub fn new(map: &'a Map, config: &'a ViewConfig) -> Self {
        Self { map, config }
    }

    /// angle of column `index` relative to the view direction; positive is left
    pub fn column_offset(&self, index: usize) -> f32 {
        let norm = index as f32 / self.config.columns as f32;
        (0.5 - norm) * self.config.fov
    }

    /// pixel span `(x, width)` owned by column `index`
    pub fn column_span(&self, index: usize, viewport_width: u32) -> (i32, u32) {
        let columns = self.config.columns as f32;
        let px0 = viewport_width as f32 * index as f32 / columns;
        let px1 = viewport_width as f32 * (index + 1) as f32 / columns;
        // round outward so neighbouring columns never leave a seam
        let x0 = px0.floor();
        let x1 = px1.ceil();
        (x0 as i32, ((x1 - x0) as u32).max(1))
    }

    /// on-screen height of a wall at `distance`, capped at the viewport height
    pub fn slab_height(&self, distance: f32, viewport_height: u32) -> u32 {
        let height = (self.config.wall_height / distance) * (viewport_height as f32 / 2.);
        if height.is_nan() {
            return 0;
        }
        height.clamp(0., viewport_height as f32) as u32
    }

    /// cast and project a single column
    pub fn column(&self, pose: Pose, viewport: UVec2, index: usize) -> Column {
        let offset = self.column_offset(index);
        let angle = pose.heading + offset;
        let hit = ray::cast(self.map, pose.position, angle);

        // project onto the view plane rather than the arc around the player
        let distance = match (hit, self.config.no_hit) {
            (Some(hit), _) => Some(hit.distance(pose.position) * offset.cos()),
            (None, NoHitPolicy::MaxDepth(depth)) => Some(depth),
            (None, NoHitPolicy::Skip) => None,
        };

        let slab = distance.and_then(|distance| {
            let h = self.slab_height(distance, viewport.y);
            if h == 0 {
                return None;
            }

            let (x, w) = self.column_span(index, viewport.x);
            let y = (viewport.y as f32 / 2. - h as f32 / 2.) as i32;
            let color = match hit.map(|hit| hit.face) {
                Some(Cardinal::East | Cardinal::West) => {
                    self.config.wall_color.shade(self.config.side_shade)
                }
                _ => self.config.wall_color,
            };

            Some(Slab {
                rect: ScreenRect::new(x, y, w, h),
                color,
            })
        });

        log::trace!("column {index}: angle {angle:.4}, distance {distance:?}");

        Column {
            index,
            angle,
            offset,
            hit,
            distance,
            slab,
        }
    }

    /// every column, left to right, for one captured pose
    pub fn columns(&self, pose: Pose, viewport: UVec2) -> impl Iterator<Item = Column> + '_ {
        (0..self.config.columns).map(move |index| self.column(pose, viewport, index))
    }

    /// draw every column's slab
    pub fn render(
        &self,
        pose: Pose,
        viewport: UVec2,
        surface: &mut impl Surface,
    ) -> anyhow::Result<()> {
        for column in self.columns(pose, viewport) {
            if let Some(slab) = column.slab {
                surface.fill_rect(slab.rect, slab.color)?;
            }
        }

        Ok(())
    }
}
