//! Pre-auth encoding
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#authentication-padding>
//!
//! Every piece is prefixed with its length so that no two different lists of
//! pieces can produce the same encoding.

/// A sink for encoded bytes: a buffer, or a hash that is fed incrementally.
pub trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice);
    }
}

impl<W: WriteBytes + ?Sized> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        (**self).write(slice);
    }
}

/// Encode `n` as 8 little-endian bytes.
pub fn le64(n: u64) -> [u8; 8] {
    n.to_le_bytes()
}

/// The length of `pae(pieces)`.
pub fn encoded_len(pieces: &[&[u8]]) -> usize {
    8 + pieces.iter().map(|x| 8 + x.len()).sum::<usize>()
}

/// Write the encoding of `pieces` to `out`: the count, then each piece
/// preceded by its length.
pub fn pae_into(pieces: &[&[u8]], mut out: impl WriteBytes) {
    out.write(&le64(pieces.len() as u64));
    for piece in pieces {
        out.write(&le64(piece.len() as u64));
        out.write(piece);
    }
}

/// Encode `pieces` into a new buffer.
pub fn pae(pieces: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(pieces));
    pae_into(pieces, &mut out);
    out
}
