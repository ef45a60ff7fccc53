use core::fmt::{Debug, Display, Write};

/// The four-byte type tag of a PNG chunk.
///
/// Case is significant: bit 5 of each byte carries one of the chunk's
/// property bits (see the methods).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(bytemuck::Zeroable, bytemuck::Pod)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  /// The ancillary, private chunk holding a packed sprite table.
  pub const rTPb: Self = Self(*b"rTPb");
}
impl ChunkType {
  /// Image decoders must understand critical chunks (uppercase first letter).
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0] & 0x20 == 0
  }
  /// Public chunks are registered in the PNG spec (uppercase second letter).
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    self.0[1] & 0x20 == 0
  }
  /// Editors may copy unknown safe-to-copy chunks (lowercase fourth letter).
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    self.0[3] & 0x20 != 0
  }
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  #[must_use]
  fn from(bytes: [u8; 4]) -> Self {
    Self(bytes)
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for ChunkType {
  // Non-ascii bytes just get `as` cast, it's only for printing.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
