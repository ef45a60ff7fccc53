use rtpb_atlas::{
  draw::{Placement, QuadRenderer, Rect, TexturedQuad},
  png::{ChunkType, ScanError},
  rtpb::{GlyphInfo, NamePolicy, DecodeOptions, RtpbError, SpriteRecord, RTPB_VERSION},
  Atlas, AtlasConfig, AtlasError, NoTexture, TextureSource,
};

use super::{encode_rtpb, png_with_chunks, sprite};

/// Hands out numbered textures and remembers which were released.
#[derive(Default)]
struct CountingTextures {
  next: u32,
  live: Vec<u32>,
  fail: bool,
}
impl TextureSource for CountingTextures {
  type Texture = u32;
  type Error = &'static str;
  fn load_texture(&mut self, png: &[u8]) -> Result<u32, &'static str> {
    assert!(png.starts_with(&[137, 80, 78, 71]));
    if self.fail {
      return Err("no gpu");
    }
    self.next += 1;
    self.live.push(self.next);
    Ok(self.next)
  }
  fn unload_texture(&mut self, texture: u32) {
    self.live.retain(|&t| t != texture);
  }
}

#[derive(Default)]
struct RecordingRenderer {
  calls: Vec<(u32, TexturedQuad)>,
}
impl QuadRenderer for RecordingRenderer {
  type Texture = u32;
  fn draw_quad(&mut self, texture: &u32, quad: &TexturedQuad) {
    self.calls.push((*texture, *quad));
  }
}

fn two_sprite_png() -> Vec<u8> {
  let payload =
    encode_rtpb(RTPB_VERSION, 0, &[sprite("walk0", 0, 0, 16, 24), sprite("walk1", 16, 0, 16, 24)]);
  png_with_chunks(&[(b"IHDR", &[0; 13]), (b"rTPb", &payload), (b"fILl", &[0xAB; 64])])
}

#[test]
fn test_load_two_sprites_end_to_end() {
  let mut textures = CountingTextures::default();
  let atlas = Atlas::from_png_bytes(&two_sprite_png(), &mut textures, &AtlasConfig::default()).unwrap();
  assert_eq!(atlas.len(), 2);
  let walk0 = atlas.sprite("walk0").unwrap();
  assert_eq!((walk0.position_x, walk0.position_y), (0, 0));
  assert_eq!((walk0.source_width, walk0.source_height), (16, 24));
  let walk1 = atlas.sprite("walk1").unwrap();
  assert_eq!((walk1.position_x, walk1.position_y), (16, 0));
  assert_eq!((walk1.source_width, walk1.source_height), (16, 24));
  assert_eq!(*atlas.texture(), 1);
  atlas.unload(&mut textures);
  assert!(textures.live.is_empty());
}

#[test]
fn test_frame_lookup() {
  let atlas = Atlas::from_png_bytes(&two_sprite_png(), &mut NoTexture, &AtlasConfig::default()).unwrap();
  assert_eq!(atlas.frame("walk", 0).unwrap().name, "walk0");
  assert_eq!(atlas.frame("walk", 1).unwrap().name, "walk1");
  assert!(atlas.frame("walk", 2).is_none());
  assert_eq!(atlas.frame_or_default("walk", 2), &SpriteRecord::EMPTY);
  assert_eq!(atlas.sprite_or_default("walk1").position_x, 16);
  assert_eq!(atlas.sprite_or_default("typo").source_width, 0);
}

#[test]
fn test_load_failures() {
  let config = AtlasConfig::default();
  let no_chunk = png_with_chunks(&[(b"IHDR", &[0; 13])]);
  assert_eq!(
    Atlas::from_png_bytes(&no_chunk, &mut NoTexture, &config).unwrap_err(),
    AtlasError::ChunkNotFound(ScanError::NotFound)
  );
  assert_eq!(
    Atlas::from_png_bytes(b"not a png at all", &mut NoTexture, &config).unwrap_err(),
    AtlasError::ChunkNotFound(ScanError::NoPngSignature)
  );
  let old = png_with_chunks(&[(b"rTPb", &encode_rtpb(100, 0, &[sprite("a", 0, 0, 1, 1)]))]);
  assert_eq!(
    Atlas::from_png_bytes(&old, &mut NoTexture, &config).unwrap_err(),
    AtlasError::NoSprites(Some(RtpbError::UnsupportedVersion(100)))
  );
  let empty = png_with_chunks(&[(b"rTPb", &encode_rtpb(RTPB_VERSION, 0, &[]))]);
  assert_eq!(
    Atlas::from_png_bytes(&empty, &mut NoTexture, &config).unwrap_err(),
    AtlasError::NoSprites(None)
  );
}

#[test]
fn test_texture_not_requested_when_table_is_bad() {
  let mut textures = CountingTextures::default();
  let png = png_with_chunks(&[(b"IHDR", &[0; 13])]);
  assert!(Atlas::from_png_bytes(&png, &mut textures, &AtlasConfig::default()).is_err());
  assert_eq!(textures.next, 0);

  textures.fail = true;
  assert_eq!(
    Atlas::from_png_bytes(&two_sprite_png(), &mut textures, &AtlasConfig::default()).unwrap_err(),
    AtlasError::TextureLoad("no gpu".to_string())
  );
}

#[test]
fn test_config_chunk_type_and_name_policy() {
  let payload = encode_rtpb(RTPB_VERSION, 0, &[sprite(&"n".repeat(128), 0, 0, 1, 1)]);
  let png = png_with_chunks(&[(b"sPRt", &payload)]);
  let config = AtlasConfig::default().with_chunk_type(ChunkType(*b"sPRt"));
  let atlas = Atlas::from_png_bytes(&png, &mut NoTexture, &config).unwrap();
  assert_eq!(atlas.len(), 1);

  let strict = config.with_decode_options(DecodeOptions { unterminated_names: NamePolicy::Reject });
  assert_eq!(
    Atlas::from_png_bytes(&png, &mut NoTexture, &strict).unwrap_err(),
    AtlasError::NoSprites(Some(RtpbError::UnterminatedName { index: 0 }))
  );
}

#[test]
fn test_glyph_lookup() {
  let mut a = sprite("font_65", 0, 0, 8, 8);
  a.glyph = Some(GlyphInfo { value: 65, offset_x: 0, offset_y: 1, advance_x: 9 });
  let mut b = sprite("font_66", 8, 0, 8, 8);
  b.glyph = Some(GlyphInfo { value: 66, offset_x: 0, offset_y: 1, advance_x: 9 });
  let png = png_with_chunks(&[(b"rTPb", &encode_rtpb(RTPB_VERSION, 1, &[a, b]))]);
  let atlas = Atlas::from_png_bytes(&png, &mut NoTexture, &AtlasConfig::default()).unwrap();
  assert!(atlas.font().kind.has_glyphs());
  assert_eq!(atlas.glyph('B').unwrap().name, "font_66");
  assert!(atlas.glyph('C').is_none());
}

#[test]
fn test_draw_by_name() {
  let mut textures = CountingTextures::default();
  let atlas = Atlas::from_png_bytes(&two_sprite_png(), &mut textures, &AtlasConfig::default()).unwrap();
  let mut renderer = RecordingRenderer::default();
  assert!(atlas.draw(&mut renderer, "walk1", &Placement::at(5.0, 6.0).scaled(2.0)));
  assert!(!atlas.draw(&mut renderer, "walk9", &Placement::at(0.0, 0.0)));
  assert!(atlas.draw_slice(&mut renderer, "walk0", Rect::new(0.0, 12.0, 16.0, 12.0), &Placement::at(0.0, 0.0)));
  assert_eq!(renderer.calls.len(), 2);
  let (tex, quad) = renderer.calls[0];
  assert_eq!(tex, 1);
  assert_eq!(quad.source, Rect::new(16.0, 0.0, 16.0, 24.0));
  assert_eq!(quad.dest, Rect::new(5.0, 6.0, 32.0, 48.0));
  assert_eq!(renderer.calls[1].1.source, Rect::new(0.0, 12.0, 16.0, 12.0));
}

#[test]
fn test_load_and_reload_from_disk() {
  let dir = std::env::temp_dir();
  let first = dir.join(format!("rtpb_atlas_test_{}_a.png", std::process::id()));
  let second = dir.join(format!("rtpb_atlas_test_{}_b.png", std::process::id()));
  std::fs::write(&first, two_sprite_png()).unwrap();
  let png = png_with_chunks(&[(b"rTPb", &encode_rtpb(RTPB_VERSION, 0, &[sprite("door", 1, 2, 3, 4)]))]);
  std::fs::write(&second, png).unwrap();

  let mut textures = CountingTextures::default();
  let mut atlas = Atlas::load(&first, &mut textures).unwrap();
  assert_eq!(atlas.len(), 2);

  // a failed reload leaves the old atlas alone
  assert_eq!(
    atlas.reload(dir.join("rtpb_atlas_missing_file.png"), &mut textures).unwrap_err(),
    AtlasError::FileUnreadable(std::io::ErrorKind::NotFound)
  );
  assert!(atlas.sprite("walk0").is_some());

  atlas.reload(&second, &mut textures).unwrap();
  assert_eq!(atlas.len(), 1);
  assert!(atlas.sprite("walk0").is_none());
  assert_eq!(atlas.sprite("door").unwrap().source_height, 4);
  assert_eq!(textures.live, [2]);

  atlas.unload(&mut textures);
  assert!(textures.live.is_empty());
  let _ = std::fs::remove_file(first);
  let _ = std::fs::remove_file(second);
}

#[test]
fn test_reload_keeps_config() {
  let dir = std::env::temp_dir();
  let first = dir.join(format!("rtpb_atlas_test_{}_cfg_a.png", std::process::id()));
  let second = dir.join(format!("rtpb_atlas_test_{}_cfg_b.png", std::process::id()));
  let sprt = ChunkType(*b"sPRt");
  let payload = encode_rtpb(RTPB_VERSION, 0, &[sprite("a", 0, 0, 1, 1)]);
  std::fs::write(&first, png_with_chunks(&[(b"sPRt", &payload)])).unwrap();
  let payload = encode_rtpb(RTPB_VERSION, 0, &[sprite("b", 0, 0, 1, 1), sprite("c", 1, 0, 1, 1)]);
  std::fs::write(&second, png_with_chunks(&[(b"sPRt", &payload)])).unwrap();

  let config = AtlasConfig::default().with_chunk_type(sprt);
  let mut atlas = Atlas::load_with(&first, &mut NoTexture, &config).unwrap();
  assert_eq!(atlas.config().chunk_type, sprt);
  atlas.reload(&second, &mut NoTexture).unwrap();
  assert_eq!(atlas.len(), 2);
  assert_eq!(atlas.config().chunk_type, sprt);

  // switching back to the default chunk type finds nothing in these files
  assert_eq!(
    atlas.reload_with(&first, &mut NoTexture, &AtlasConfig::default()).unwrap_err(),
    AtlasError::ChunkNotFound(ScanError::NotFound)
  );
  assert!(atlas.sprite("b").is_some());
  let _ = std::fs::remove_file(first);
  let _ = std::fs::remove_file(second);
}
