#![forbid(unsafe_code)]

//! Fixed-width integer reads from byte slices.
//!
//! PNG framing is big-endian while the `rTPb` payload inside it is
//! little-endian, so every read names its byte order. Reads return `None`
//! instead of panicking when the slice is too short; the callers decide what
//! a short read means for their format.

use bytemuck::{checked::pod_read_unaligned, Pod};
use core::mem::size_of;

/// Byte order of a multi-byte integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endian {
  /// Most significant byte first (PNG framing).
  Big,
  /// Least significant byte first (`rTPb` payload).
  Little,
}

/// How many bytes an integer read consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
  /// A 2-byte value.
  U16,
  /// A 4-byte value.
  U32,
}
impl IntWidth {
  /// Number of bytes.
  #[inline]
  #[must_use]
  pub const fn len(self) -> usize {
    match self {
      Self::U16 => 2,
      Self::U32 => 4,
    }
  }
}

/// Reads an unsigned integer of `width` bytes at `offset`.
///
/// Returns `None` if `offset + width` is past the end of `bytes` (including
/// when that sum would overflow).
#[inline]
#[must_use]
pub fn read_uint(bytes: &[u8], offset: usize, width: IntWidth, endian: Endian) -> Option<u32> {
  match width {
    IntWidth::U16 => read_u16(bytes, offset, endian).map(u32::from),
    IntWidth::U32 => read_u32(bytes, offset, endian),
  }
}

/// Reads a `u16` at `offset`.
#[inline]
#[must_use]
pub fn read_u16(bytes: &[u8], offset: usize, endian: Endian) -> Option<u16> {
  let a: [u8; 2] = read_array(bytes, offset)?;
  Some(match endian {
    Endian::Big => u16::from_be_bytes(a),
    Endian::Little => u16::from_le_bytes(a),
  })
}

/// Reads a `u32` at `offset`.
#[inline]
#[must_use]
pub fn read_u32(bytes: &[u8], offset: usize, endian: Endian) -> Option<u32> {
  let a: [u8; 4] = read_array(bytes, offset)?;
  Some(match endian {
    Endian::Big => u32::from_be_bytes(a),
    Endian::Little => u32::from_le_bytes(a),
  })
}

#[inline]
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
  let end = offset.checked_add(N)?;
  bytes.get(offset..end)?.try_into().ok()
}

/// Splits `N` bytes off the front of `bytes`.
#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}

/// Reads a `T` off the front of `bytes` (no alignment needed).
#[inline]
#[cfg_attr(not(feature = "alloc"), allow(dead_code))]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Option<(T, &[u8])> {
  let position = size_of::<T>();
  if bytes.len() >= position {
    let (head, tail) = bytes.split_at(position);
    let a: T = pod_read_unaligned(head);
    Some((a, tail))
  } else {
    None
  }
}
