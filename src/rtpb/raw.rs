#![allow(dead_code)]

//! The on-disk structs, field for field. Everything is little-endian and has
//! an alignment of 1, so these can be read straight out of a chunk payload.

use crate::png::ChunkType;
use pack1::*;

/// Bytes reserved for each sprite's name, including NUL padding.
pub const NAME_LEN: usize = 128;

#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct RtpbFileHeader {
  pub magic: ChunkType,
  pub version: U16LE,
  pub reserved: U16LE,
  pub sprite_count: U32LE,
  /// Would mark an embedded image, never set in sheets we can read.
  pub flags: U32LE,
  pub font_type: U16LE,
  pub font_size: U16LE,
  pub font_sdf_padding: U16LE,
}

#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct RtpbSpriteEntry {
  pub name: [u8; NAME_LEN],
  pub origin_x: I32LE,
  pub origin_y: I32LE,
  pub position_x: I32LE,
  pub position_y: I32LE,
  pub source_width: I32LE,
  pub source_height: I32LE,
  pub padding: I32LE,
  pub trimmed: I32LE,
  pub trim_x: I32LE,
  pub trim_y: I32LE,
  pub trim_width: I32LE,
  pub trim_height: I32LE,
}

/// Follows each [`RtpbSpriteEntry`] when the header's font type is nonzero.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct RtpbGlyphEntry {
  pub value: I32LE,
  pub offset_x: I32LE,
  pub offset_y: I32LE,
  pub advance_x: I32LE,
}

#[test]
fn test_raw_sizes() {
  use core::mem::size_of;
  assert_eq!(size_of::<RtpbFileHeader>(), 22);
  assert_eq!(size_of::<RtpbSpriteEntry>(), 128 + 48);
  assert_eq!(size_of::<RtpbGlyphEntry>(), 16);
}
