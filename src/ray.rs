//! Grid ray traversal.
//!
//! Angles are radians counter-clockwise from +X, while grid rows grow downward, so a
//! heading `a` points along `(cos a, -sin a)` in map coordinates.

use crate::map::{Map, Tile};
use glam::{IVec2, Vec2, Vec3};

/// How far past a crossed grid line the next tile is sampled.
pub const LOOK_AHEAD: f32 = 1e-5;

/// Direction components smaller than this are treated as exactly zero, so rays that are
/// (almost) parallel to an axis walk along that axis instead of dividing by ~0.
const AXIS_EPSILON: f32 = 1e-6;

/// unit vector for a heading, in map coordinates
pub fn heading_vector(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, -sin)
}

/// Face of a tile a ray struck.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    /// where the ray met the tile boundary; `z` is the origin's
    pub point: Vec3,
    pub cell: IVec2,
    pub tile: Tile,
    pub face: Cardinal,
}

impl RayHit {
    /// planar distance from `origin` to the hit
    pub fn distance(&self, origin: Vec3) -> f32 {
        self.point.truncate().distance(origin.truncate())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Crossed {
    Vertical,
    Horizontal,
}

fn face(crossed: Crossed, going_right: bool, going_down: bool) -> Cardinal {
    match (crossed, going_right, going_down) {
        (Crossed::Vertical, true, _) => Cardinal::West,
        (Crossed::Vertical, false, _) => Cardinal::East,
        (Crossed::Horizontal, _, true) => Cardinal::North,
        (Crossed::Horizontal, _, false) => Cardinal::South,
    }
}

/// Walk `map` from `origin` along `angle` and return the first occupied tile.
///
/// Each step moves to whichever grid line (vertical or horizontal) the ray reaches
/// first, so every cell the ray passes through is visited in order. `None` means the
/// ray left the map without hitting anything, or that the input was unusable (an origin
/// outside the map or a non-finite value).
pub fn cast(map: &Map, origin: Vec3, angle: f32) -> Option<RayHit> {
    let width = map.width() as f32;
    let height = map.height() as f32;
    let (mut x, mut y) = (origin.x, origin.y);

    if !angle.is_finite() || !(x >= 0. && y >= 0. && x < width && y < height) {
        return None;
    }

    let mut dir = heading_vector(angle);
    if dir.x.abs() < AXIS_EPSILON {
        dir.x = 0.;
    }
    if dir.y.abs() < AXIS_EPSILON {
        dir.y = 0.;
    }
    let going_right = dir.x >= 0.;
    let going_down = dir.y >= 0.;

    // an origin sitting on a grid line is already at the edge of the cell it heads into
    let start = IVec2::new(x.floor() as i32, y.floor() as i32);
    let ahead = (Vec2::new(x, y) + dir * LOOK_AHEAD).floor().as_ivec2();
    if ahead != start && map.contains(ahead.x, ahead.y) {
        let tile = map.tile_at(ahead.x as usize, ahead.y as usize);
        if !tile.is_passable() {
            let crossed = if ahead.x != start.x {
                Crossed::Vertical
            } else {
                Crossed::Horizontal
            };
            return Some(RayHit {
                point: origin,
                cell: ahead,
                tile,
                face: face(crossed, going_right, going_down),
            });
        }
    }

    // each step crosses a grid line; float error can split one crossing into two
    let max_steps = 2 * (map.width() + map.height()) + 4;

    for _ in 0..max_steps {
        let here = Vec2::new(x, y);

        // next vertical grid line and where the ray meets it
        let vertical = (dir.x != 0.).then(|| {
            let tx = if going_right { x.floor() + 1. } else { x.ceil() - 1. };
            Vec2::new(tx, y + (tx - x) * (dir.y / dir.x))
        });

        // next horizontal grid line and where the ray meets it
        let horizontal = (dir.y != 0.).then(|| {
            let ty = if going_down { y.floor() + 1. } else { y.ceil() - 1. };
            Vec2::new(x + (ty - y) * (dir.x / dir.y), ty)
        });

        let (next, crossed) = match (vertical, horizontal) {
            (Some(v), Some(h)) => {
                if v.distance_squared(here) < h.distance_squared(here) {
                    (v, Crossed::Vertical)
                } else {
                    (h, Crossed::Horizontal)
                }
            }
            (Some(v), None) => (v, Crossed::Vertical),
            (None, Some(h)) => (h, Crossed::Horizontal),
            (None, None) => return None,
        };
        x = next.x;
        y = next.y;

        // the tile just past the line, in the direction of travel
        let cell = match crossed {
            Crossed::Vertical => {
                let col = if going_right { x as i32 } else { x as i32 - 1 };
                IVec2::new(col, (y + dir.y * LOOK_AHEAD).floor() as i32)
            }
            Crossed::Horizontal => {
                let row = if going_down { y as i32 } else { y as i32 - 1 };
                IVec2::new((x + dir.x * LOOK_AHEAD).floor() as i32, row)
            }
        };

        if !map.contains(cell.x, cell.y) {
            return None;
        }

        let tile = map.tile_at(cell.x as usize, cell.y as usize);
        if !tile.is_passable() {
            return Some(RayHit {
                point: Vec3::new(x, y, origin.z),
                cell,
                tile,
                face: face(crossed, going_right, going_down),
            });
        }
    }

    log::warn!("ray from {origin} at {angle} rad did not terminate");
    None
}
