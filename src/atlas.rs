#![forbid(unsafe_code)]

//! The loaded sheet: one texture plus its sprite table.

use alloc::{format, string::ToString};
use core::fmt::Display;

use crate::{
  draw::{self, Placement, QuadRenderer, Rect},
  png::{find_chunk, ChunkType},
  rtpb::{try_decode, DecodeOptions, FontInfo, RtpbHeader, RtpbSheet, SpriteMap, SpriteRecord},
  AtlasError,
};

static EMPTY_SPRITE: SpriteRecord = SpriteRecord::EMPTY;

/// Makes (and releases) the texture for a sheet.
///
/// The atlas itself never looks at pixels, it hands the whole PNG file to
/// the source and keeps whatever handle comes back.
pub trait TextureSource {
  type Texture;
  type Error: Display;
  fn load_texture(&mut self, png: &[u8]) -> Result<Self::Texture, Self::Error>;
  fn unload_texture(&mut self, texture: Self::Texture);
}

/// A [`TextureSource`] for when only the sprite table is wanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoTexture;
impl TextureSource for NoTexture {
  type Texture = ();
  type Error = core::convert::Infallible;
  #[inline]
  fn load_texture(&mut self, _png: &[u8]) -> Result<(), Self::Error> {
    Ok(())
  }
  #[inline]
  fn unload_texture(&mut self, _texture: ()) {}
}

/// Runtime settings for loading an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasConfig {
  /// Which PNG chunk holds the sprite table.
  pub chunk_type: ChunkType,
  pub decode: DecodeOptions,
}
impl Default for AtlasConfig {
  #[inline]
  fn default() -> Self {
    Self { chunk_type: ChunkType::rTPb, decode: DecodeOptions::default() }
  }
}
impl AtlasConfig {
  #[inline]
  #[must_use]
  pub const fn with_chunk_type(self, chunk_type: ChunkType) -> Self {
    Self { chunk_type, ..self }
  }
  #[inline]
  #[must_use]
  pub const fn with_decode_options(self, decode: DecodeOptions) -> Self {
    Self { decode, ..self }
  }
}

/// A sprite sheet texture and the named sprites packed into it.
///
/// The atlas owns its texture. Give it back with [`unload`](Self::unload)
/// when done, since the atlas can't release it by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas<T> {
  texture: T,
  header: RtpbHeader,
  sprites: SpriteMap,
  config: AtlasConfig,
}

impl<T> Atlas<T> {
  /// Puts together an atlas from an already decoded sheet.
  ///
  /// The atlas gets the default [`AtlasConfig`] for later reloads.
  #[inline]
  #[must_use]
  pub fn from_parts(texture: T, sheet: RtpbSheet) -> Self {
    Self { texture, header: sheet.header, sprites: sheet.sprites, config: AtlasConfig::default() }
  }

  /// Builds an atlas from the bytes of a PNG file.
  ///
  /// The sprite table is located and decoded first, the texture is only
  /// requested from `source` once that worked.
  pub fn from_png_bytes<S>(png: &[u8], source: &mut S, config: &AtlasConfig) -> Result<Self, AtlasError>
  where
    S: TextureSource<Texture = T>,
  {
    let sheet = decode_sheet(png, config)?;
    let texture = source.load_texture(png).map_err(|e| AtlasError::TextureLoad(e.to_string()))?;
    log::info!("Sprite Count: {}", sheet.sprites.len());
    Ok(Self { config: *config, ..Self::from_parts(texture, sheet) })
  }

  /// Loads the PNG at `path` with the default [`AtlasConfig`].
  #[cfg(feature = "std")]
  pub fn load<S>(path: impl AsRef<std::path::Path>, source: &mut S) -> Result<Self, AtlasError>
  where
    S: TextureSource<Texture = T>,
  {
    Self::load_with(path, source, &AtlasConfig::default())
  }

  /// Loads the PNG at `path`.
  #[cfg(feature = "std")]
  pub fn load_with<S>(
    path: impl AsRef<std::path::Path>, source: &mut S, config: &AtlasConfig,
  ) -> Result<Self, AtlasError>
  where
    S: TextureSource<Texture = T>,
  {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
      log::error!("Error loading file {}: {e}", path.display());
      AtlasError::from(e)
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Self::from_png_bytes(&bytes, source, config)
  }

  /// Replaces this atlas with the one at `path`, using the same
  /// [`AtlasConfig`] this atlas was loaded with.
  ///
  /// The new sheet is fully loaded before anything is dropped. On failure
  /// `self` is untouched, on success the old texture goes back to `source`.
  #[cfg(feature = "std")]
  pub fn reload<S>(&mut self, path: impl AsRef<std::path::Path>, source: &mut S) -> Result<(), AtlasError>
  where
    S: TextureSource<Texture = T>,
  {
    let config = self.config;
    self.reload_with(path, source, &config)
  }

  /// Replaces this atlas with the one at `path`, switching to `config`.
  #[cfg(feature = "std")]
  pub fn reload_with<S>(
    &mut self, path: impl AsRef<std::path::Path>, source: &mut S, config: &AtlasConfig,
  ) -> Result<(), AtlasError>
  where
    S: TextureSource<Texture = T>,
  {
    let fresh = Self::load_with(path, source, config)?;
    let old = core::mem::replace(self, fresh);
    old.unload(source);
    Ok(())
  }

  /// Releases the texture. The sprite table goes with it.
  #[inline]
  pub fn unload<S>(self, source: &mut S)
  where
    S: TextureSource<Texture = T>,
  {
    source.unload_texture(self.texture);
  }

  #[inline]
  #[must_use]
  pub fn texture(&self) -> &T {
    &self.texture
  }
  /// The settings this atlas was loaded with.
  #[inline]
  #[must_use]
  pub fn config(&self) -> &AtlasConfig {
    &self.config
  }
  #[inline]
  #[must_use]
  pub fn header(&self) -> &RtpbHeader {
    &self.header
  }
  #[inline]
  #[must_use]
  pub fn font(&self) -> FontInfo {
    self.header.font
  }
  /// All sprites, in name order.
  #[inline]
  #[must_use]
  pub fn sprites(&self) -> &SpriteMap {
    &self.sprites
  }
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.sprites.len()
  }
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.sprites.is_empty()
  }

  /// Looks up a sprite by its exact name.
  #[inline]
  #[must_use]
  pub fn sprite(&self, name: &str) -> Option<&SpriteRecord> {
    self.sprites.get(name)
  }

  /// Looks up `name` followed by the decimal `suffix`.
  ///
  /// Animation frames are usually packed as `walk_f0`, `walk_f1`, ... so
  /// `atlas.frame("walk_f", tick / 8 % 4)` steps through them.
  #[must_use]
  pub fn frame(&self, name: &str, suffix: i32) -> Option<&SpriteRecord> {
    self.sprites.get(format!("{name}{suffix}").as_str())
  }

  /// Like [`sprite`](Self::sprite), but a missing name gives the all-zero
  /// record, which draws as nothing.
  #[inline]
  #[must_use]
  pub fn sprite_or_default(&self, name: &str) -> &SpriteRecord {
    self.sprite(name).unwrap_or(&EMPTY_SPRITE)
  }

  /// Like [`frame`](Self::frame), but a missing name gives the all-zero
  /// record.
  #[inline]
  #[must_use]
  pub fn frame_or_default(&self, name: &str, suffix: i32) -> &SpriteRecord {
    self.frame(name, suffix).unwrap_or(&EMPTY_SPRITE)
  }

  /// Finds the glyph sprite for a character, if this sheet is a font.
  #[must_use]
  pub fn glyph(&self, ch: char) -> Option<&SpriteRecord> {
    let value = ch as u32;
    self
      .sprites
      .values()
      .find(|s| s.glyph.is_some_and(|g| u32::try_from(g.value).ok() == Some(value)))
  }

  /// Draws the named sprite. Returns `false` (drawing nothing) if the name
  /// isn't in the sheet.
  pub fn draw<R>(&self, renderer: &mut R, name: &str, placement: &Placement) -> bool
  where
    R: QuadRenderer<Texture = T>,
  {
    match self.sprite(name) {
      Some(sprite) => {
        draw::draw_sprite(renderer, &self.texture, sprite, placement);
        true
      }
      None => false,
    }
  }

  /// Draws part of the named sprite. Returns `false` if the name isn't in
  /// the sheet.
  pub fn draw_slice<R>(&self, renderer: &mut R, name: &str, slice: Rect, placement: &Placement) -> bool
  where
    R: QuadRenderer<Texture = T>,
  {
    match self.sprite(name) {
      Some(sprite) => {
        draw::draw_sprite_slice(renderer, &self.texture, sprite, slice, placement);
        true
      }
      None => false,
    }
  }
}

/// Finds and decodes the sprite table, treating an empty table as failure.
fn decode_sheet(png: &[u8], config: &AtlasConfig) -> Result<RtpbSheet, AtlasError> {
  let payload = find_chunk(png, config.chunk_type).map_err(|e| {
    log::error!("Error loading chunk data: {e}");
    AtlasError::from(e)
  })?;
  log::debug!("{:?} chunk: {} bytes", config.chunk_type, payload.len());
  let sheet = try_decode(payload, config.decode).map_err(|e| {
    log::error!("Error loading sprite information: {e}");
    AtlasError::from(e)
  })?;
  if sheet.sprites.is_empty() {
    log::error!("Error loading sprite information: the table is empty");
    return Err(AtlasError::NoSprites(None));
  }
  Ok(sheet)
}
