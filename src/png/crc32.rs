/// Byte-at-a-time lookup table for the reflected CRC-32 polynomial
/// `0xEDB8_8320` that PNG chunks use, built at compile time.
const CRC_TABLE: [u32; 256] = make_crc_table();

/// Entry `n` is the CRC register after shifting the byte `n` through all
/// eight of its bits.
const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// Feeds more bytes into a running (not yet inverted) CRC register.
fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// The CRC-32 that PNG stores after each chunk.
///
/// PNG computes it over the chunk type bytes followed by the chunk data.
#[inline]
#[must_use]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}

#[test]
fn test_png_crc_iend() {
  // every valid PNG ends with this exact IEND crc.
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
}

#[test]
fn test_png_crc_covers_type_and_data() {
  // the 13-byte IHDR of a 1x1 8-bit grayscale image, as written by libpng.
  let ihdr: [u8; 13] = [0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0];
  let crc = png_crc(b"IHDR".iter().chain(ihdr.iter()).copied());
  assert_eq!(crc, 0x3A7E_9B55);
  // feeding the data in two steps is the same as all at once
  let partial = update_crc(u32::MAX, b"IHDR".iter().copied());
  assert_eq!(update_crc(partial, ihdr.iter().copied()) ^ u32::MAX, crc);
}
