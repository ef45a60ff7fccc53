#![forbid(unsafe_code)]

//! Turning a sprite record into a textured quad.
//!
//! Nothing here talks to a GPU. The functions work out the source rectangle,
//! destination rectangle and rotation pivot, and a [`QuadRenderer`] supplied
//! by the caller does the actual drawing. The rectangle conventions follow
//! the usual immediate mode "draw texture pro" call: the destination is
//! placed at `(x, y)`, rotated by `rotation` degrees around `origin` (which is
//! relative to the destination's top left), and a negative source width means
//! the texels are read right to left.

use pixel_formats::r8g8b8a8_Srgb;

use crate::rtpb::SpriteRecord;

/// An axis aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}
impl Rect {
  #[inline]
  #[must_use]
  pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self { x, y, width, height }
  }
}

/// A point or offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Vec2 {
  pub x: f32,
  pub y: f32,
}

/// Opaque white, draws the texture unchanged.
pub const WHITE: r8g8b8a8_Srgb = r8g8b8a8_Srgb { r: 255, g: 255, b: 255, a: 255 };

/// Where and how to put a sprite on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
  pub x: f32,
  pub y: f32,
  /// A negative value mirrors the sprite horizontally.
  pub scale_x: f32,
  pub scale_y: f32,
  /// Degrees, clockwise.
  pub rotation: f32,
  pub tint: r8g8b8a8_Srgb,
}
impl Placement {
  /// Unscaled, unrotated and untinted at `(x, y)`.
  #[inline]
  #[must_use]
  pub const fn at(x: f32, y: f32) -> Self {
    Self { x, y, scale_x: 1.0, scale_y: 1.0, rotation: 0.0, tint: WHITE }
  }
  #[inline]
  #[must_use]
  pub const fn scaled(self, scale: f32) -> Self {
    self.scaled_xy(scale, scale)
  }
  #[inline]
  #[must_use]
  pub const fn scaled_xy(self, scale_x: f32, scale_y: f32) -> Self {
    Self { scale_x, scale_y, ..self }
  }
  #[inline]
  #[must_use]
  pub const fn rotated(self, rotation: f32) -> Self {
    Self { rotation, ..self }
  }
  #[inline]
  #[must_use]
  pub const fn tinted(self, tint: r8g8b8a8_Srgb) -> Self {
    Self { tint, ..self }
  }
}

/// One draw call's worth of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
  /// Region of the sheet texture to sample.
  pub source: Rect,
  /// Region of the target to fill.
  pub dest: Rect,
  /// Rotation pivot relative to `dest`'s top left.
  pub origin: Vec2,
  pub rotation: f32,
  pub tint: r8g8b8a8_Srgb,
}

/// Something that can draw part of a texture.
pub trait QuadRenderer {
  type Texture;
  fn draw_quad(&mut self, texture: &Self::Texture, quad: &TexturedQuad);
}

/// The quad for a whole sprite, pivoting on the sprite's origin.
///
/// Size and pivot are both multiplied by the scale. With a negative
/// `scale_x` the source width is negated, which mirrors the sprite, while the
/// destination stays a positive size.
#[must_use]
pub fn sprite_quad(sprite: &SpriteRecord, placement: &Placement) -> TexturedQuad {
  let w = sprite.source_width as f32;
  let h = sprite.source_height as f32;
  let flip = placement.scale_x < 0.0;
  let scale_x = placement.scale_x.abs();
  TexturedQuad {
    source: Rect::new(
      sprite.position_x as f32,
      sprite.position_y as f32,
      if flip { -w } else { w },
      h,
    ),
    dest: Rect::new(placement.x, placement.y, w * scale_x, h * placement.scale_y),
    origin: Vec2 {
      x: sprite.origin_x as f32 * scale_x,
      y: sprite.origin_y as f32 * placement.scale_y,
    },
    rotation: placement.rotation,
    tint: placement.tint,
  }
}

/// The quad for part of a sprite.
///
/// `slice` is relative to the sprite's top left within the sheet. The sprite's
/// origin is ignored, the slice rotates around its own top left corner.
#[must_use]
pub fn slice_quad(sprite: &SpriteRecord, slice: Rect, placement: &Placement) -> TexturedQuad {
  TexturedQuad {
    source: Rect::new(
      sprite.position_x as f32 + slice.x,
      sprite.position_y as f32 + slice.y,
      slice.width,
      slice.height,
    ),
    dest: Rect::new(
      placement.x,
      placement.y,
      slice.width * placement.scale_x,
      slice.height * placement.scale_y,
    ),
    origin: Vec2::default(),
    rotation: placement.rotation,
    tint: placement.tint,
  }
}

/// Draws a whole sprite. See [`sprite_quad`].
#[inline]
pub fn draw_sprite<R: QuadRenderer>(
  renderer: &mut R, texture: &R::Texture, sprite: &SpriteRecord, placement: &Placement,
) {
  renderer.draw_quad(texture, &sprite_quad(sprite, placement));
}

/// Draws part of a sprite. See [`slice_quad`].
#[inline]
pub fn draw_sprite_slice<R: QuadRenderer>(
  renderer: &mut R, texture: &R::Texture, sprite: &SpriteRecord, slice: Rect,
  placement: &Placement,
) {
  renderer.draw_quad(texture, &slice_quad(sprite, slice, placement));
}
