use std::fmt;
use std::str::FromStr;

use crate::{BLOCK_SIZE, BlockCipher, Reason};

/// Modes of operation for the Blowfish cipher.
///
/// - **CBC**: Cipher Block Chaining mode.
/// - **CFB**: Cipher Feedback mode.
/// - **CTR**: Counter mode (recognised, not implemented).
/// - **ECB**: Electronic Codebook mode.
/// - **OFB**: Output Feedback mode.
///
/// ECB mode of operation is less secure and is not recommended for
/// production applications since identical plaintext blocks map to
/// identical ciphertext blocks, special care should be kept while using
/// this mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Cipher Block Chaining
    ///
    /// Each plaintext block is XORed with the previous ciphertext block
    /// before encryption. Requires an 8-byte initialization vector.
    CBC,

    /// Cipher Feedback
    ///
    /// Turns the block cipher into a self-synchronising stream cipher
    /// processing `segment_size / 8` bytes at a time. Requires an 8-byte
    /// initialization vector.
    CFB,

    /// Counter
    ///
    /// The selector parses and renders, but constructing a cipher with it
    /// fails: counter mode is not implemented.
    CTR,

    /// Electronic Codebook
    ///
    /// Encrypts each block independently. Does not use an initialization
    /// vector.
    ECB,

    /// Output Feedback
    ///
    /// Encrypts the chaining register repeatedly to produce a keystream
    /// which is XORed with the message. Requires an 8-byte initialization
    /// vector.
    OFB,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::CBC => "CBC",
            Mode::CFB => "CFB",
            Mode::CTR => "CTR",
            Mode::ECB => "ECB",
            Mode::OFB => "OFB",
        })
    }
}

impl FromStr for Mode {
    type Err = Reason;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "CBC" => Ok(Mode::CBC),
            "CFB" => Ok(Mode::CFB),
            "CTR" => Ok(Mode::CTR),
            "ECB" => Ok(Mode::ECB),
            "OFB" => Ok(Mode::OFB),
            _ => Err(Reason::UnknownMode(label.to_string())),
        }
    }
}

/// Encrypt a block-aligned message in ECB mode.
///
/// # Parameters
/// - `control_block`: the underlying block cipher instance.
/// - `msg`: plaintext, a multiple of 8 bytes.
///
/// # Returns
/// Ciphertext of the same length as `msg`.
pub fn ecb_encrypt<C>(control_block: &C, msg: &[u8]) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());
    for block in msg.chunks_exact(BLOCK_SIZE) {
        out.extend_from_slice(&control_block.encrypt(block.try_into().unwrap()));
    }
    out
}

/// Decrypt a block-aligned message in ECB mode.
///
/// # Parameters
/// - `control_block`: the underlying block cipher instance.
/// - `msg`: ciphertext, a multiple of 8 bytes.
///
/// # Returns
/// Plaintext of the same length as `msg`.
pub fn ecb_decrypt<C>(control_block: &C, msg: &[u8]) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());
    for block in msg.chunks_exact(BLOCK_SIZE) {
        out.extend_from_slice(&control_block.decrypt(block.try_into().unwrap()));
    }
    out
}

/// Encrypt a block-aligned message in CBC mode.
///
/// The chaining register is read and left holding the final ciphertext
/// block, so successive calls continue the same stream.
///
/// # Parameters
/// - `control_block`: the underlying block cipher instance.
/// - `chain`: chaining register, initially the IV.
/// - `msg`: plaintext, a multiple of 8 bytes.
pub fn cbc_encrypt<C>(control_block: &C, chain: &mut [u8; BLOCK_SIZE], msg: &[u8]) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());

    for block in msg.chunks_exact(BLOCK_SIZE) {
        let mut temp = *chain;
        temp.iter_mut()
            .zip(block)
            .for_each(|(chained, byte)| *chained ^= byte);

        *chain = control_block.encrypt(temp);
        out.extend_from_slice(chain);
    }

    out
}

/// Decrypt a block-aligned message in CBC mode.
///
/// The chaining register follows the consumed ciphertext blocks; it is
/// committed before any padding verification happens upstream.
pub fn cbc_decrypt<C>(control_block: &C, chain: &mut [u8; BLOCK_SIZE], msg: &[u8]) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());

    for block in msg.chunks_exact(BLOCK_SIZE) {
        let block: [u8; BLOCK_SIZE] = block.try_into().unwrap();

        let mut decrypted = control_block.decrypt(block);
        decrypted
            .iter_mut()
            .zip(chain.iter())
            .for_each(|(byte, chained)| *byte ^= chained);

        *chain = block;
        out.extend_from_slice(&decrypted);
    }

    out
}

/// Encrypt a segment-aligned message in CFB mode.
///
/// Each segment XORs the message with the encrypted shift register, then
/// feeds the produced ciphertext segment back into the register.
///
/// # Parameters
/// - `control_block`: the underlying block cipher instance.
/// - `shift_register`: chaining register, initially the IV.
/// - `segment`: segment width in bytes, 1..=8.
/// - `msg`: plaintext, a multiple of `segment` bytes.
pub fn cfb_encrypt<C>(
    control_block: &C,
    shift_register: &mut [u8; BLOCK_SIZE],
    segment: usize,
    msg: &[u8],
) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());

    for chunk in msg.chunks_exact(segment) {
        let key_stream = control_block.encrypt(*shift_register);
        let start = out.len();
        for (ix, byte) in chunk.iter().enumerate() {
            out.push(byte ^ key_stream[ix]);
        }
        feed_shift_register(shift_register, &out[start..]);
    }

    out
}

/// Decrypt a segment-aligned message in CFB mode.
///
/// Identical keystream to [cfb_encrypt], but the shift register is fed
/// with the **ciphertext** segment consumed from the input.
pub fn cfb_decrypt<C>(
    control_block: &C,
    shift_register: &mut [u8; BLOCK_SIZE],
    segment: usize,
    msg: &[u8],
) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());

    for chunk in msg.chunks_exact(segment) {
        let key_stream = control_block.encrypt(*shift_register);
        for (ix, byte) in chunk.iter().enumerate() {
            out.push(byte ^ key_stream[ix]);
        }
        feed_shift_register(shift_register, chunk);
    }

    out
}

/// Shift the register left by the segment width and append the ciphertext
/// segment on the right. A full-block segment replaces the register.
fn feed_shift_register(register: &mut [u8; BLOCK_SIZE], segment_bytes: &[u8]) {
    let sz = segment_bytes.len();
    register.copy_within(sz.., 0);
    register[BLOCK_SIZE - sz..].copy_from_slice(segment_bytes);
}

/// Transform a message of any length in OFB mode.
///
/// `key_stream` holds the current keystream block and `count` how many of
/// its bytes have already been consumed; both persist across calls so the
/// keystream continues seamlessly. Encryption and decryption are the same
/// operation.
pub fn ofb_stream<C>(
    control_block: &C,
    key_stream: &mut [u8; BLOCK_SIZE],
    count: &mut usize,
    msg: &[u8],
) -> Vec<u8>
where
    C: BlockCipher,
{
    let mut out = Vec::with_capacity(msg.len());
    let mut i = 0;

    while i < msg.len() {
        let available = BLOCK_SIZE - *count;

        if msg.len() - i <= available {
            for (j, byte) in msg[i..].iter().enumerate() {
                out.push(key_stream[*count + j] ^ byte);
            }
            *count += msg.len() - i;
            break;
        }

        for (j, byte) in msg[i..i + available].iter().enumerate() {
            out.push(key_stream[*count + j] ^ byte);
        }
        i += available;

        *key_stream = control_block.encrypt(*key_stream);
        *count = 0;
    }

    out
}
