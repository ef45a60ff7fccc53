use alloc::string::String;

use crate::{png::ScanError, rtpb::RtpbError};

/// What went wrong reading an atlas file.
///
/// Without the `std` feature nothing is ever read from disk, so there is no
/// value of this type and [`AtlasError::FileUnreadable`] can't happen.
#[cfg(feature = "std")]
pub type FileErrorKind = std::io::ErrorKind;
/// What went wrong reading an atlas file.
///
/// Without the `std` feature nothing is ever read from disk, so there is no
/// value of this type and [`AtlasError::FileUnreadable`] can't happen.
#[cfg(not(feature = "std"))]
pub type FileErrorKind = core::convert::Infallible;

/// An error from loading an [`Atlas`](crate::Atlas).
///
/// Scanning and decoding problems stay local values (`ScanError`,
/// `RtpbError`) until they reach the load boundary, where they all become
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
  /// The file couldn't be opened or read.
  #[error("could not read atlas file: {0}")]
  FileUnreadable(FileErrorKind),

  /// The PNG didn't give up a sprite table chunk.
  ///
  /// This covers a missing signature and truncated chunk framing as well as
  /// the chunk simply not being there.
  #[error("sprite table chunk not found: {0}")]
  ChunkNotFound(#[from] ScanError),

  /// The sprite table decoded to zero sprites.
  ///
  /// Holds the decode error when there was one, or `None` when the table was
  /// well formed but empty.
  #[error("no sprites decoded: {}", no_sprites_reason(.0))]
  NoSprites(#[source] Option<RtpbError>),

  /// The [`TextureSource`](crate::TextureSource) failed.
  #[error("texture load failed: {0}")]
  TextureLoad(String),
}

fn no_sprites_reason(e: &Option<RtpbError>) -> &dyn core::fmt::Display {
  match e {
    Some(e) => e,
    None => &"the sprite table is empty",
  }
}

impl From<RtpbError> for AtlasError {
  #[inline]
  fn from(e: RtpbError) -> Self {
    Self::NoSprites(Some(e))
  }
}
#[cfg(feature = "std")]
impl From<std::io::Error> for AtlasError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    Self::FileUnreadable(e.kind())
  }
}
