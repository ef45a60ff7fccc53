use super::*;
use crate::byte_reader::{read_u32, Endian};
use core::fmt::Debug;

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPngChunk<'b> {
  pub(crate) chunk_type: ChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> RawPngChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> ChunkType {
    self.chunk_type
  }
  /// The chunk's payload, without the framing.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC written in the file. Never checked during scanning.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Computes the CRC this chunk *should* have.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.chunk_type.0.iter().copied().chain(self.data.iter().copied()))
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Iteration ends when the bytes run out or when a chunk's framing doesn't
/// fit in the bytes that remain. Check [`truncated_at`](Self::truncated_at)
/// afterwards to tell those apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPngChunkIter<'b> {
  bytes: &'b [u8],
  offset: usize,
  truncated_at: Option<usize>,
}
impl<'b> RawPngChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  ///
  /// The signature bytes are skipped without being checked, use
  /// [`is_png_signature_correct`] for that.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self { bytes: rest, offset: 8, truncated_at: None },
      _ => Self { bytes: &[], offset: bytes.len(), truncated_at: None },
    }
  }

  /// Offset of the chunk whose framing ran past the end, if any.
  #[inline]
  #[must_use]
  pub const fn truncated_at(&self) -> Option<usize> {
    self.truncated_at
  }

  fn stop_truncated(&mut self) -> Option<RawPngChunk<'b>> {
    self.truncated_at = Some(self.offset);
    self.bytes = &[];
    None
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = RawPngChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.bytes.is_empty() {
      return None;
    }
    let Some(chunk_len) = read_u32(self.bytes, 0, Endian::Big) else {
      return self.stop_truncated();
    };
    let Some((type_bytes, rest)) = self.bytes.get(4..).and_then(try_pull_type) else {
      return self.stop_truncated();
    };
    // length (4) + type (4) + data + crc (4), all of which must be present.
    let data_len = chunk_len as usize;
    if rest.len() < data_len || rest.len() - data_len < 4 {
      return self.stop_truncated();
    }
    let (data, rest) = rest.split_at(data_len);
    let Some(declared_crc) = read_u32(rest, 0, Endian::Big) else {
      return self.stop_truncated();
    };
    self.bytes = &rest[4..];
    self.offset += 12 + data_len;
    Some(RawPngChunk { chunk_type: ChunkType(type_bytes), data, declared_crc })
  }
}

#[inline]
fn try_pull_type(bytes: &[u8]) -> Option<([u8; 4], &[u8])> {
  crate::byte_reader::try_pull_byte_array::<4>(bytes)
}
