//! Prints the chunks and sprite table of sprite sheet PNGs.
//!
//! `rtpb_dump <file.png>...`, set `RUST_LOG=debug` for decoder details.

use rtpb_atlas::{
  png::{find_chunk, ChunkType, RawPngChunkIter},
  rtpb::{try_decode, DecodeOptions},
};

fn main() {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  if args.len() < 2 {
    println!("run this with one or more PNG files to dump their sprite tables.");
    return;
  }
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e}");
        continue;
      }
    };
    let mut it = RawPngChunkIter::new(&bytes);
    for (n, raw_chunk) in it.by_ref().enumerate() {
      let crc_note = if raw_chunk.declared_crc() == raw_chunk.actual_crc() { "ok" } else { "BAD" };
      println!(
        "{n}: {} ({} bytes, crc {:08X} {crc_note})",
        raw_chunk.chunk_type(),
        raw_chunk.data().len(),
        raw_chunk.declared_crc(),
      );
    }
    if let Some(offset) = it.truncated_at() {
      println!("chunk framing truncated at byte {offset}");
    }
    let payload = match find_chunk(&bytes, ChunkType::rTPb) {
      Ok(payload) => payload,
      Err(e) => {
        println!("no sprite table: {e}");
        continue;
      }
    };
    match try_decode(payload, DecodeOptions::default()) {
      Ok(sheet) => {
        println!("{:?}", sheet.header);
        for sprite in sheet.sprites.values() {
          print!(
            "{:>32} pos=({}, {}) size={}x{} origin=({}, {})",
            sprite.name,
            sprite.position_x,
            sprite.position_y,
            sprite.source_width,
            sprite.source_height,
            sprite.origin_x,
            sprite.origin_y,
          );
          if sprite.trimmed {
            let t = sprite.trim;
            print!(" trim=({}, {}, {}x{})", t.x, t.y, t.width, t.height);
          }
          if let Some(g) = sprite.glyph {
            print!(" glyph={} offset=({}, {}) advance={}", g.value, g.offset_x, g.offset_y, g.advance_x);
          }
          println!();
        }
        println!("Sprite Count: {}", sheet.sprites.len());
      }
      Err(e) => println!("sprite table unreadable: {e}"),
    }
  }
}
