use rand::{Rng, thread_rng};

use crate::{
    BLOCK_SIZE, Reason, bail,
    blowfish::{MAX_KEY_BYTES, MIN_KEY_BYTES},
};

/// Generate a pseudo-random 8-byte IV (Initialization-Vector).
///
/// # Example
///
/// ```rust
/// let iv = blowfish_block::random_iv();
/// assert_eq!(iv.len(), 8);
/// ```
pub fn random_iv() -> [u8; BLOCK_SIZE] {
    let mut iv = [0u8; BLOCK_SIZE];
    thread_rng().fill(&mut iv[..]);
    iv
}

/// Append PKCS#7 padding to the buffer in place.
///
/// Between 1 and 8 bytes are appended, each holding the number of bytes
/// appended. A buffer that is already a multiple of the block size gains a
/// full extra block of padding.
///
/// # Example
///
/// ```rust
/// let mut data = b"HELLO".to_vec();
/// let pad_len = blowfish_block::pkcs7_pad(&mut data);
/// assert_eq!(pad_len, 3);
/// assert_eq!(data, b"HELLO\x03\x03\x03");
/// ```
///
/// Returns the number of bytes appended.
pub fn pkcs7_pad(buf: &mut Vec<u8>) -> usize {
    let pad_count = BLOCK_SIZE - buf.len() % BLOCK_SIZE;
    buf.extend(std::iter::repeat_n(pad_count as u8, pad_count));
    pad_count
}

/// Verify and remove PKCS#7 padding from the buffer in place.
///
/// The final byte names the padding length `p`; removal fails when `p` is
/// zero, when `p` reaches back past the start of the buffer, or when any of
/// the `p - 1` bytes before the length byte differs from it. The buffer is
/// left untouched on failure.
///
/// # Example
///
/// ```rust
/// let mut data = b"HELLO\x03\x03\x03".to_vec();
/// let pad_len = blowfish_block::pkcs7_unpad(&mut data).unwrap();
/// assert_eq!(pad_len, 3);
/// assert_eq!(data, b"HELLO");
/// ```
///
/// Returns the number of bytes removed, or the [Reason] the padding was
/// rejected.
pub fn pkcs7_unpad(buf: &mut Vec<u8>) -> Result<usize, Reason> {
    bail!(buf.is_empty(), Reason::PaddingValue(0));

    let len = buf.len();
    let pad_len = usize::from(*buf.last().unwrap());

    bail!(
        pad_len == 0 || pad_len >= len,
        Reason::PaddingValue(pad_len as u8)
    );

    for (offset, byte) in buf.iter().enumerate().skip(len - pad_len).take(pad_len - 1) {
        bail!(
            usize::from(*byte) != pad_len,
            Reason::PaddingByte {
                offset,
                expected: pad_len as u8,
                found: *byte,
            }
        );
    }

    buf.truncate(len - pad_len);
    Ok(pad_len)
}

/// Parse a Blowfish key from a hex-encoded string, validating the decoded
/// length is between 4 and 56 bytes.
///
/// # Example
///
/// ```rust
/// let key = blowfish_block::key_from_hex("d96b1d59").unwrap();
/// assert_eq!(key, [0xd9, 0x6b, 0x1d, 0x59]);
/// ```
pub fn key_from_hex<V>(key_hex: V) -> Result<Vec<u8>, Reason>
where
    V: AsRef<[u8]>,
{
    let key = hex::decode(key_hex)?;
    bail!(
        key.is_empty(),
        Reason::InvalidKey,
        key.len() < MIN_KEY_BYTES || key.len() > MAX_KEY_BYTES,
        Reason::KeyLength(key.len()),
    );
    Ok(key)
}

/// Parse an IV from a hex-encoded string, validating the decoded length is
/// exactly one block.
///
/// # Example
///
/// ```rust
/// let iv = blowfish_block::iv_from_hex("bd9b7eb31f57b2db").unwrap();
/// assert_eq!(iv, [0xbd, 0x9b, 0x7e, 0xb3, 0x1f, 0x57, 0xb2, 0xdb]);
/// ```
pub fn iv_from_hex<V>(iv_hex: V) -> Result<[u8; BLOCK_SIZE], Reason>
where
    V: AsRef<[u8]>,
{
    let iv = hex::decode(iv_hex)?;
    bail!(iv.len() != BLOCK_SIZE, Reason::IvRequired(iv.len()));

    Ok(iv.try_into().unwrap())
}
