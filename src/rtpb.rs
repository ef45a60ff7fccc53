#![forbid(unsafe_code)]

//! Decoding the `rTPb` sprite table.
//!
//! An `rTPb` payload is a 22 byte header followed by a run of fixed-size
//! sprite records. All integers are little-endian.
//!
//! ```text
//! offset  size  field
//! 0       4     magic "rTPb"
//! 4       2     version (must be 200)
//! 6       2     reserved
//! 8       4     sprite count N
//! 12      4     flags (reserved)
//! 16      2     font type (0/1/2)
//! 18      2     font size
//! 20      2     SDF padding
//! 22      ...   N sprite records (128+48[+16] bytes each)
//! ```
//!
//! Each record is a NUL padded 128 byte name and twelve `i32` values. When the
//! header's font type is nonzero every record also carries a 16 byte glyph
//! suffix. The record size is worked out once from the header and used for
//! the whole table.

use alloc::{
  borrow::ToOwned,
  collections::BTreeMap,
  string::{String, ToString},
};
use core::mem::size_of;

use crate::byte_reader::try_pull_pod;
use crate::png::ChunkType;

mod raw;
pub use raw::NAME_LEN;
use raw::*;

/// The tag at the front of every payload. Same bytes as the chunk type.
pub const RTPB_MAGIC: ChunkType = ChunkType::rTPb;

/// The only format version this crate reads.
pub const RTPB_VERSION: u16 = 200;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = size_of::<RtpbFileHeader>();

/// Decoded sprites, keyed by name.
pub type SpriteMap = BTreeMap<String, SpriteRecord>;

/// Why a payload couldn't be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum RtpbError {
  /// The first four bytes weren't `rTPb`.
  #[error("payload does not start with the rTPb magic")]
  BadMagic,
  /// The version field wasn't [`RTPB_VERSION`].
  #[error("unsupported rTPb version {0}")]
  UnsupportedVersion(u16),
  /// The header or the declared records need more bytes than there are.
  #[error("rTPb data needs {needed} bytes but only {available} are present")]
  Truncated {
    /// Bytes the header says should be there (saturates on overflow).
    needed: usize,
    /// Bytes actually there.
    available: usize,
  },
  /// A name filled all 128 bytes with no NUL, and the options say to reject.
  #[error("sprite record {index} has no NUL terminator in its name")]
  UnterminatedName {
    /// Zero based record index.
    index: u32,
  },
}

/// What to do with a name that has no NUL within its 128 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamePolicy {
  /// Use all 128 bytes as the name.
  #[default]
  Truncate,
  /// Fail the whole decode.
  Reject,
}

/// Knobs for [`try_decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  pub unterminated_names: NamePolicy,
}

/// Font type from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontType {
  /// A plain sprite sheet.
  #[default]
  None,
  /// A bitmap font, records carry glyph metrics.
  Normal,
  /// A signed distance field font, records carry glyph metrics.
  Sdf,
  /// Any other nonzero value. Records still carry glyph metrics.
  Other(u16),
}
impl From<u16> for FontType {
  #[inline]
  #[must_use]
  fn from(value: u16) -> Self {
    match value {
      0 => Self::None,
      1 => Self::Normal,
      2 => Self::Sdf,
      other => Self::Other(other),
    }
  }
}
impl FontType {
  /// If each record has the 16 byte glyph suffix.
  #[inline]
  #[must_use]
  pub const fn has_glyphs(self) -> bool {
    !matches!(self, Self::None)
  }
}

/// Font settings the sheet was packed with.
///
/// Only informational, lookups never need these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontInfo {
  pub kind: FontType,
  pub size: u16,
  pub sdf_padding: u16,
}

/// The decoded fixed header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RtpbHeader {
  pub version: u16,
  pub sprite_count: u32,
  pub flags: u32,
  pub font: FontInfo,
}
impl RtpbHeader {
  /// Bytes per sprite record for this table.
  #[inline]
  #[must_use]
  pub const fn record_len(&self) -> usize {
    if self.font.kind.has_glyphs() {
      size_of::<RtpbSpriteEntry>() + size_of::<RtpbGlyphEntry>()
    } else {
      size_of::<RtpbSpriteEntry>()
    }
  }
}

/// The source rectangle of a trimmed sprite before trimming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct TrimRect {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
}

/// Typographic metrics of a sprite that is a font character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlyphInfo {
  /// Unicode value.
  pub value: i32,
  pub offset_x: i32,
  pub offset_y: i32,
  pub advance_x: i32,
}

/// One packed sprite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpriteRecord {
  /// Usually the packed file's name without its extension.
  pub name: String,
  /// Pivot point, relative to the sprite.
  pub origin_x: i32,
  pub origin_y: i32,
  /// Top left corner within the sheet.
  pub position_x: i32,
  pub position_y: i32,
  /// Size before trimming.
  pub source_width: i32,
  pub source_height: i32,
  pub padding: i32,
  pub trimmed: bool,
  /// Only meaningful when `trimmed` is set.
  pub trim: TrimRect,
  /// Present exactly when the sheet's font type is nonzero.
  pub glyph: Option<GlyphInfo>,
}
impl SpriteRecord {
  /// The all-zero record with an empty name.
  pub const EMPTY: Self = Self {
    name: String::new(),
    origin_x: 0,
    origin_y: 0,
    position_x: 0,
    position_y: 0,
    source_width: 0,
    source_height: 0,
    padding: 0,
    trimmed: false,
    trim: TrimRect { x: 0, y: 0, width: 0, height: 0 },
    glyph: None,
  };
}

/// A fully decoded payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtpbSheet {
  pub header: RtpbHeader,
  pub sprites: SpriteMap,
}

/// Checks the magic and version and reads the header.
///
/// On success also gives back the bytes after the header.
pub fn parse_header(payload: &[u8]) -> Result<(RtpbHeader, &[u8]), RtpbError> {
  let (raw, rest) = try_pull_pod::<RtpbFileHeader>(payload)
    .ok_or(RtpbError::Truncated { needed: HEADER_LEN, available: payload.len() })?;
  if raw.magic != RTPB_MAGIC {
    return Err(RtpbError::BadMagic);
  }
  let version = raw.version.get();
  if version != RTPB_VERSION {
    return Err(RtpbError::UnsupportedVersion(version));
  }
  let header = RtpbHeader {
    version,
    sprite_count: raw.sprite_count.get(),
    flags: raw.flags.get(),
    font: FontInfo {
      kind: FontType::from(raw.font_type.get()),
      size: raw.font_size.get(),
      sdf_padding: raw.font_sdf_padding.get(),
    },
  };
  log::debug!("rTPb header: {header:?}");
  Ok((header, rest))
}

/// Decodes a whole payload, reporting exactly what went wrong.
///
/// Exactly `sprite_count` records are read and any bytes after them are
/// ignored. Records that share a name overwrite earlier ones.
pub fn try_decode(payload: &[u8], options: DecodeOptions) -> Result<RtpbSheet, RtpbError> {
  let (header, body) = parse_header(payload)?;
  let record_len = header.record_len();
  let count = header.sprite_count as usize;
  let needed = count.checked_mul(record_len).unwrap_or(usize::MAX);
  if body.len() < needed {
    return Err(RtpbError::Truncated {
      needed: needed.saturating_add(HEADER_LEN),
      available: payload.len(),
    });
  }

  let mut sprites = SpriteMap::new();
  for (index, record) in (0_u32..).zip(body.chunks_exact(record_len).take(count)) {
    let sprite = decode_record(record, index, header.font.kind.has_glyphs(), options)?;
    if let Some(old) = sprites.insert(sprite.name.clone(), sprite) {
      log::debug!("rTPb record {index} replaces an earlier sprite named {:?}", old.name);
    }
  }
  Ok(RtpbSheet { header, sprites })
}

/// Decodes a payload, giving an empty map if anything is wrong with it.
///
/// The reason for a failure is logged at `warn` level. Use [`try_decode`] to
/// get it as a value.
#[must_use]
pub fn decode(payload: &[u8]) -> SpriteMap {
  match try_decode(payload, DecodeOptions::default()) {
    Ok(sheet) => sheet.sprites,
    Err(e) => {
      log::warn!("rTPb decode failed: {e}");
      SpriteMap::new()
    }
  }
}

fn decode_record(
  bytes: &[u8], index: u32, with_glyph: bool, options: DecodeOptions,
) -> Result<SpriteRecord, RtpbError> {
  let truncated = || RtpbError::Truncated { needed: size_of::<RtpbSpriteEntry>(), available: bytes.len() };
  let (entry, rest) = try_pull_pod::<RtpbSpriteEntry>(bytes).ok_or_else(truncated)?;
  let glyph = if with_glyph {
    let (g, _rest) = try_pull_pod::<RtpbGlyphEntry>(rest).ok_or_else(truncated)?;
    Some(GlyphInfo {
      value: g.value.get(),
      offset_x: g.offset_x.get(),
      offset_y: g.offset_y.get(),
      advance_x: g.advance_x.get(),
    })
  } else {
    None
  };
  Ok(SpriteRecord {
    name: decode_name(&entry.name, index, options.unterminated_names)?,
    origin_x: entry.origin_x.get(),
    origin_y: entry.origin_y.get(),
    position_x: entry.position_x.get(),
    position_y: entry.position_y.get(),
    source_width: entry.source_width.get(),
    source_height: entry.source_height.get(),
    padding: entry.padding.get(),
    trimmed: entry.trimmed.get() != 0,
    trim: TrimRect {
      x: entry.trim_x.get(),
      y: entry.trim_y.get(),
      width: entry.trim_width.get(),
      height: entry.trim_height.get(),
    },
    glyph,
  })
}

/// Everything before the first NUL. Invalid UTF-8 is replaced, not rejected.
fn decode_name(field: &[u8; NAME_LEN], index: u32, policy: NamePolicy) -> Result<String, RtpbError> {
  let name = match field.iter().position(|&b| b == 0) {
    Some(end) => &field[..end],
    None => match policy {
      NamePolicy::Truncate => {
        log::warn!("rTPb record {index}: name has no NUL, using all {NAME_LEN} bytes");
        &field[..]
      }
      NamePolicy::Reject => return Err(RtpbError::UnterminatedName { index }),
    },
  };
  Ok(match core::str::from_utf8(name) {
    Ok(s) => s.to_owned(),
    Err(_) => String::from_utf8_lossy(name).to_string(),
  })
}
