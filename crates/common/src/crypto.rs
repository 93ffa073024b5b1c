//! Small byte-level helpers shared by the credential code.

use rand::{rngs::OsRng, RngCore};

/// Compare two byte strings without short-circuiting on the first difference.
///
/// Length is not secret: slices of different length compare unequal immediately.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// `len` bytes from the OS RNG, hex-encoded (so `2 * len` characters).
pub fn random_hex(len: usize) -> String {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
