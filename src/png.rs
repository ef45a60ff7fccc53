#![forbid(unsafe_code)]

//! Locating chunks inside PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! This module does not decode images. It only walks the chunk framing:
//!
//! ```text
//! signature (8 bytes)
//! [length: u32 BE][type: 4 bytes][data: length bytes][crc: u32 BE]
//! [length: u32 BE][type: 4 bytes][data: length bytes][crc: u32 BE]
//! ...
//! ```
//!
//! The whole PNG is assumed to be in memory as one byte slice. Ordering rules,
//! duplicate-chunk rules and CRC checks are all ignored while scanning. The
//! terminal `IEND` chunk isn't special either, the scan simply runs until the
//! bytes run out.
//!
//! What is *not* ignored is the framing arithmetic: a chunk whose declared
//! length would run past the end of the data stops the scan and is reported as
//! [`ScanError::Truncated`]. Stepping past a chunk needs its CRC bytes to be
//! there, but the chunk being searched for only needs its data.

use crate::byte_reader::{read_u32, Endian};

mod chunk_type;
pub use chunk_type::*;

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Why [`find_chunk`] didn't give back a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ScanError {
  /// The first eight bytes weren't the PNG signature.
  #[error("data does not start with the PNG signature")]
  NoPngSignature,
  /// A chunk starting at `offset` declares more bytes than remain.
  #[error("chunk framing at byte offset {offset} runs past the end of the data")]
  Truncated {
    /// Byte offset (from the start of the PNG) of the bad chunk's length field.
    offset: usize,
  },
  /// Every chunk was visited and none had the requested type.
  #[error("no chunk of the requested type")]
  NotFound,
}

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Gets the data of the first chunk of type `chunk_type`.
///
/// Later chunks of the same type are never looked at. The returned slice
/// borrows from `png` and excludes the length, type, and CRC fields.
///
/// ```
/// use rtpb_atlas::png::{find_chunk, ChunkType, ScanError};
/// assert_eq!(find_chunk(b"GIF89a", ChunkType::rTPb), Err(ScanError::NoPngSignature));
/// ```
pub fn find_chunk(png: &[u8], chunk_type: ChunkType) -> Result<&[u8], ScanError> {
  if !is_png_signature_correct(png) {
    log::debug!("find_chunk: missing PNG signature ({} bytes of input)", png.len());
    return Err(ScanError::NoPngSignature);
  }
  let mut it = RawPngChunkIter::new(png);
  for raw_chunk in it.by_ref() {
    log::trace!("{raw_chunk:?}");
    if raw_chunk.chunk_type() == chunk_type {
      return Ok(raw_chunk.data());
    }
  }
  match it.truncated_at() {
    Some(offset) => {
      // The last chunk may still be the one asked for if only its CRC is cut
      // off, the CRC is only needed to step past a chunk.
      if let Some(data) = crc_less_chunk_data(png, offset, chunk_type) {
        log::debug!("find_chunk: {chunk_type:?} at {offset} is missing its CRC bytes");
        return Ok(data);
      }
      log::warn!("find_chunk: {chunk_type:?} not found, chunk framing truncated at {offset}");
      Err(ScanError::Truncated { offset })
    }
    None => Err(ScanError::NotFound),
  }
}

/// The data of the chunk at `offset` if it has the wanted type and its
/// length and data (but maybe not its CRC) fit in `png`.
fn crc_less_chunk_data(png: &[u8], offset: usize, chunk_type: ChunkType) -> Option<&[u8]> {
  let chunk_len = read_u32(png, offset, Endian::Big)? as usize;
  let type_start = offset.checked_add(4)?;
  let data_start = type_start.checked_add(4)?;
  let type_bytes: [u8; 4] = png.get(type_start..data_start)?.try_into().ok()?;
  if ChunkType(type_bytes) != chunk_type {
    return None;
  }
  png.get(data_start..data_start.checked_add(chunk_len)?)
}
