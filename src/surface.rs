//! The drawing primitives the renderer needs from whatever presents the frame.

use glam::IVec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// scale every channel by `factor` (clamped to `0..=1`)
    pub fn shade(self, factor: f32) -> Self {
        let factor = factor.clamp(0., 1.);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Axis-aligned screen rectangle in integer pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }
}

/// Something the frame can be drawn onto.
///
/// The SDL canvas implements this in the binary; tests use a recorder.
pub trait Surface {
    fn clear(&mut self, color: Rgb) -> anyhow::Result<()>;

    fn fill_rect(&mut self, rect: ScreenRect, color: Rgb) -> anyhow::Result<()>;

    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Rgb) -> anyhow::Result<()>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    pub(crate) enum Op {
        Clear(Rgb),
        Fill(ScreenRect, Rgb),
        Line(IVec2, IVec2, Rgb),
    }

    /// records every call so frames can be inspected
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn fills(&self) -> impl Iterator<Item = (ScreenRect, Rgb)> + '_ {
            self.ops.iter().filter_map(|op| match op {
                Op::Fill(rect, color) => Some((*rect, *color)),
                _ => None,
            })
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self, color: Rgb) -> anyhow::Result<()> {
            self.ops.push(Op::Clear(color));
            Ok(())
        }

        fn fill_rect(&mut self, rect: ScreenRect, color: Rgb) -> anyhow::Result<()> {
            self.ops.push(Op::Fill(rect, color));
            Ok(())
        }

        fn draw_line(&mut self, from: IVec2, to: IVec2, color: Rgb) -> anyhow::Result<()> {
            self.ops.push(Op::Line(from, to, color));
            Ok(())
        }
    }

    #[test]
    fn shade_scales_channels() {
        assert_eq!(Rgb::new(200, 100, 0).shade(0.5), Rgb::new(100, 50, 0));
        assert_eq!(Rgb::new(10, 20, 30).shade(2.), Rgb::new(10, 20, 30));
    }

    #[test]
    fn rect_edges() {
        let rect = ScreenRect::new(-2, 5, 10, 4);
        assert_eq!(rect.right(), 8);
        assert_eq!(rect.bottom(), 9);
    }
}
