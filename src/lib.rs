//! A first-person ray-casting renderer for tile worlds.
//!
//! One ray is cast per screen column; the wall it meets is drawn as a vertical slab whose
//! height falls off with the distance to the wall.

pub mod assets;
pub mod config;
pub mod frame;
pub mod game;
pub mod map;
pub mod minimap;
pub mod player;
pub mod ray;
pub mod surface;
pub mod view;
