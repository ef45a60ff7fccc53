#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! Reads packed sprite sheets that carry their own sprite table.
//!
//! A sheet is an ordinary PNG with one extra ancillary chunk, `rTPb`, holding
//! the name, position, size and pivot of every sprite packed into the image
//! (plus glyph metrics when the sheet is a font). This crate finds that chunk
//! without decoding the image and turns it into a table you can look sprites
//! up in by name.
//!
//! * [`png`] walks PNG chunk framing and finds a chunk by type.
//! * [`rtpb`] decodes the sprite table.
//! * [`Atlas`] holds a texture handle together with the table and does
//!   lookups and draws.
//! * [`draw`] turns a sprite plus a [`Placement`](draw::Placement) into the
//!   rectangles of a textured quad.
//!
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), rtpb_atlas::AtlasError> {
//! use rtpb_atlas::{Atlas, NoTexture};
//! let mut textures = NoTexture;
//! let atlas = Atlas::load("resources/atlas.png", &mut textures)?;
//! if let Some(door) = atlas.sprite("doors_leaf_closed") {
//!   println!("{door:?}");
//! }
//! atlas.unload(&mut textures);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//! * `alloc`: the sprite table, [`Atlas`], and drawing.
//! * `std` (default): loading straight from a file path.
//! * `cli`: the `rtpb_dump` binary.
//!
//! Without any features only the byte reader and the chunk scanner remain.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod byte_reader;

pub mod png;

#[cfg(feature = "alloc")]
pub mod rtpb;

#[cfg(feature = "alloc")]
pub mod draw;

#[cfg(feature = "alloc")]
mod error;
#[cfg(feature = "alloc")]
pub use error::*;

#[cfg(feature = "alloc")]
mod atlas;
#[cfg(feature = "alloc")]
pub use atlas::*;
