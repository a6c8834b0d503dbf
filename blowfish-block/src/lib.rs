//! # Blowfish Cipher Library
//!
//! This crate provides an implementation of the Blowfish block cipher with
//! multiple modes of operation (ECB, CBC, CFB, OFB) and strict PKCS#7
//! padding. The cipher is a stateful context: the chaining register set up
//! from the initialization vector persists across calls, so a long stream
//! can be processed piecewise, and [Cipher::reset] rewinds the context to
//! its freshly-constructed state.
//!
//! ## Features
//!
//! - Various operation modes:
//!     - ECB
//!     - CBC
//!     - CFB (segment sizes of 8 to 64 bits, in multiples of 8)
//!     - OFB
//! - Strict padding using PKCS#7 standard.
//! - Pseudo-random IV generation, see [random_iv].
//! - Hex-string parsing for keys and IVs, see [key_from_hex], [iv_from_hex].
//!
//! ## Example
//!
//! ```rust
//! use blowfish_block::{Cipher, Mode};
//!
//! // Encrypt in CBC mode with a random IV:
//! let iv = blowfish_block::random_iv();
//! let mut cipher = Cipher::new(b"SECRET_KEY", Some(&iv), Mode::CBC, 0).unwrap();
//!
//! let ciphertext = cipher.encrypt(b"Secret message").unwrap();
//!
//! // Rewind the chaining state and decrypt:
//! cipher.reset();
//! let recovered = cipher.decrypt(&ciphertext).unwrap();
//! assert_eq!(recovered, b"Secret message");
//! ```
//!
//! # Utilities
//!
//! This crate provides some extra utilities such as pseudo-random IV
//! generation and the PKCS#7 padding functions:
//!
//! ```rust
//! // generate a pseudo-random 8-byte iv-block
//! let iv = blowfish_block::random_iv();
//!
//! // pad a buffer out to a multiple of the block size
//! let mut buf = b"HELLO".to_vec();
//! blowfish_block::pkcs7_pad(&mut buf);
//! assert_eq!(buf.len(), 8);
//! ```
use hex::FromHexError;
use thiserror::Error;

pub use crate::{
    blowfish::{BlowfishControlBlock, MAX_KEY_BYTES, MIN_KEY_BYTES},
    modes::Mode,
    utils::{iv_from_hex, key_from_hex, pkcs7_pad, pkcs7_unpad, random_iv},
};

mod blowfish;
mod consts;
mod modes;
mod utils;

#[cfg(test)]
mod tests;

/// Number of bytes processed atomically by the Blowfish block primitive.
pub const BLOCK_SIZE: usize = 8;

/// Errors returned by the Cipher as reasons during
/// cipher operations.
#[derive(Error, Debug)]
pub enum Reason {
    #[error("[Blowfish-Error] key must be specified, received an empty key")]
    InvalidKey,
    #[error("[Blowfish-Error] key length must be between 4 and 56 bytes, current: {0}")]
    KeyLength(usize),
    #[error(
        "[Blowfish-Error] initialization vector required to be 8 bytes in length, \
         parameter is {0} bytes"
    )]
    IvRequired(usize),
    #[error("[Blowfish-Error] ECB does not use an initialization vector")]
    IvForbidden,
    #[error("[Blowfish-Error] {0} mode is not implemented")]
    Unimplemented(Mode),
    #[error("[Blowfish-Error] invalid mode '{0}', valid modes are: CBC, CFB, CTR, ECB, OFB")]
    UnknownMode(String),
    #[error(
        "[Blowfish-Error] segment size must be a multiple of 8 bits between 8 and 64, \
         current: {0}"
    )]
    SegmentSize(usize),
    #[error("[Blowfish-Error] {0} mode requires input multiple of 8 bytes")]
    BlockAlignment(Mode),
    #[error("[Blowfish-Error] CFB mode requires input multiple of {0} bytes")]
    SegmentAlignment(usize),
    #[error("[Blowfish-Error] invalid PKCS padding value {0:02x}")]
    PaddingValue(u8),
    #[error(
        "[Blowfish-Error] invalid PKCS padding value at offset {offset}, \
         expected {expected:02x}, found {found:02x}"
    )]
    PaddingByte {
        offset: usize,
        expected: u8,
        found: u8,
    },
    #[error("[Blowfish-Error] unable to parse Hex-String {0}")]
    ParseHex(#[from] FromHexError),
}

/// A core trait that any 64-bit block cipher must implement to drive the
/// operation modes.
///
/// The mode drivers only ever touch single 8-byte blocks through this
/// seam; everything else (chaining, segmenting, padding) lives above it.
pub trait BlockCipher {
    /// Raw encryption, encrypt a single 8-byte block.
    fn encrypt(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];

    /// Raw decryption, decrypt a single 8-byte block.
    fn decrypt(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

/// # Cipher
///
/// A stateful Blowfish cipher context. It owns the expanded key schedule
/// (a [BlowfishControlBlock]) together with the operation mode and the
/// chaining state that links successive calls: the 8-byte chaining
/// register and, for OFB, the keystream cursor.
///
/// Each context is exclusively owned by its caller; encrypting or
/// decrypting mutates the chaining state, so parallel streams need one
/// context per stream. [Cipher::reset] restores the chaining state to the
/// IV supplied at construction without re-deriving the key schedule.
pub struct Cipher {
    block: BlowfishControlBlock,
    mode: Mode,
    segment_size: usize,
    iv: [u8; BLOCK_SIZE],
    initial_iv: [u8; BLOCK_SIZE],
    count: usize,
    pkcs7padding: bool,
}

impl Cipher {
    /// Cipher constructor method.
    ///
    /// Validates the parameters, runs the Blowfish key schedule and
    /// freezes a copy of the IV for [Cipher::reset]:
    ///
    /// - `key`: 4 to 56 bytes.
    /// - `iv`: exactly 8 bytes for CBC, CFB and OFB; `None` for ECB.
    /// - `mode`: the operation mode; [Mode::CTR] is rejected.
    /// - `segment_size`: CFB feedback width in bits, a multiple of 8
    ///   between 8 and 64. Passing 0 selects the default of 8. Ignored by
    ///   the other modes.
    ///
    /// PKCS#7 padding starts enabled, see [Cipher::set_pkcs7_padding].
    ///
    /// ## Example
    ///
    /// ```rust
    /// use blowfish_block::{Cipher, Mode};
    ///
    /// let cipher = Cipher::new(b"SECRET_KEY", None, Mode::ECB, 0).unwrap();
    /// ```
    pub fn new<K>(key: K, iv: Option<&[u8]>, mode: Mode, segment_size: usize) -> Result<Self, Reason>
    where
        K: AsRef<[u8]>,
    {
        let segment_size = verify_params(key.as_ref(), iv, mode, segment_size)?;
        let block = BlowfishControlBlock::new(key)?;

        let mut chain = [0u8; BLOCK_SIZE];
        if let Some(iv) = iv {
            chain.copy_from_slice(iv);
        }

        Ok(Self {
            block,
            mode,
            segment_size,
            iv: chain,
            initial_iv: chain,
            count: BLOCK_SIZE,
            pkcs7padding: true,
        })
    }

    /// Encrypt plain-text bytes and return cipher-text bytes.
    ///
    /// The message length rules depend on the mode and the padding flag:
    ///
    /// - `CBC`, `ECB`: any length with padding enabled (the output grows
    ///   by 1 to 8 PKCS#7 bytes), otherwise a multiple of 8 bytes.
    /// - `CFB`: a multiple of the segment width in bytes, always; CFB
    ///   never pads.
    /// - `OFB`: any length; OFB never pads.
    ///
    /// The chaining state advances with every call, so consecutive calls
    /// encrypt one continuous stream. An empty message yields an empty
    /// buffer and leaves the state untouched.
    ///
    /// It returns ciphered bytes, or the [Reason] of failure as an err.
    pub fn encrypt(&mut self, msg: &[u8]) -> Result<Vec<u8>, Reason> {
        if msg.is_empty() {
            return Ok(Vec::new());
        }

        match self.mode {
            Mode::CBC | Mode::ECB => {
                let mut pt = msg.to_vec();
                if self.pkcs7padding {
                    utils::pkcs7_pad(&mut pt);
                } else {
                    bail!(
                        pt.len() % BLOCK_SIZE != 0,
                        Reason::BlockAlignment(self.mode)
                    );
                }

                Ok(match self.mode {
                    Mode::CBC => modes::cbc_encrypt(&self.block, &mut self.iv, &pt),
                    _ => modes::ecb_encrypt(&self.block, &pt),
                })
            }
            Mode::CFB => {
                let segment = self.segment_size / 8;
                bail!(
                    msg.len() % segment != 0,
                    Reason::SegmentAlignment(segment)
                );

                Ok(modes::cfb_encrypt(
                    &self.block,
                    &mut self.iv,
                    segment,
                    msg,
                ))
            }
            Mode::OFB => Ok(modes::ofb_stream(
                &self.block,
                &mut self.iv,
                &mut self.count,
                msg,
            )),
            Mode::CTR => Err(Reason::Unimplemented(Mode::CTR)),
        }
    }

    /// Decrypt cipher-text bytes and return plain-text bytes.
    ///
    /// The same length rules as [Cipher::encrypt] apply, except that CBC
    /// and ECB input must be a multiple of 8 bytes regardless of the
    /// padding flag; with padding enabled the recovered plaintext is
    /// unpadded and shrinks accordingly.
    ///
    /// When padding verification fails no plaintext is returned. The
    /// chaining register has already followed the consumed ciphertext at
    /// that point; callers that want a pristine stream after any failure
    /// should call [Cipher::reset].
    ///
    /// It returns plain bytes, or the [Reason] of failure as an err.
    pub fn decrypt(&mut self, msg: &[u8]) -> Result<Vec<u8>, Reason> {
        if msg.is_empty() {
            return Ok(Vec::new());
        }

        match self.mode {
            // OFB (and CTR, were it implemented) uses a symmetric
            // keystream, so decryption is the encryption transform.
            Mode::CTR | Mode::OFB => self.encrypt(msg),
            Mode::CBC | Mode::ECB => {
                bail!(
                    msg.len() % BLOCK_SIZE != 0,
                    Reason::BlockAlignment(self.mode)
                );

                let mut pt = match self.mode {
                    Mode::CBC => modes::cbc_decrypt(&self.block, &mut self.iv, msg),
                    _ => modes::ecb_decrypt(&self.block, msg),
                };
                if self.pkcs7padding {
                    utils::pkcs7_unpad(&mut pt)?;
                }

                Ok(pt)
            }
            Mode::CFB => {
                let segment = self.segment_size / 8;
                bail!(
                    msg.len() % segment != 0,
                    Reason::SegmentAlignment(segment)
                );

                Ok(modes::cfb_decrypt(
                    &self.block,
                    &mut self.iv,
                    segment,
                    msg,
                ))
            }
        }
    }

    /// Restore the chaining state to the IV supplied at construction.
    ///
    /// The key schedule is not re-derived and the padding flag keeps its
    /// current value. After a reset the context produces output identical
    /// to a freshly constructed one.
    pub fn reset(&mut self) {
        self.iv = self.initial_iv;
        self.count = BLOCK_SIZE;
    }

    /// Enable or disable PKCS#7 padding for CBC and ECB.
    ///
    /// With padding disabled those modes require block-aligned input. CFB
    /// and OFB ignore the flag entirely.
    pub fn set_pkcs7_padding(&mut self, enabled: bool) {
        self.pkcs7padding = enabled;
    }

    /// Returns the operation mode the context was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the CFB segment size in bits.
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Returns whether PKCS#7 padding is currently enabled.
    pub fn pkcs7_padding(&self) -> bool {
        self.pkcs7padding
    }

    /// Returns an immutable access to the control-block underlying the
    /// cipher.
    pub fn control_block(&self) -> &BlowfishControlBlock {
        &self.block
    }
}

/// Validate the constructor parameters against the mode requirements and
/// resolve the CFB segment size default.
fn verify_params(
    key: &[u8],
    iv: Option<&[u8]>,
    mode: Mode,
    segment_size: usize,
) -> Result<usize, Reason> {
    bail!(
        key.is_empty(),
        Reason::InvalidKey,
        key.len() < MIN_KEY_BYTES || key.len() > MAX_KEY_BYTES,
        Reason::KeyLength(key.len()),
    );

    match mode {
        Mode::CBC | Mode::CFB | Mode::OFB => {
            let iv_len = iv.map_or(0, <[u8]>::len);
            bail!(iv_len != BLOCK_SIZE, Reason::IvRequired(iv_len));
        }
        Mode::ECB => bail!(iv.is_some(), Reason::IvForbidden),
        Mode::CTR => return Err(Reason::Unimplemented(Mode::CTR)),
    }

    if mode == Mode::CFB {
        let segment_size = if segment_size == 0 { 8 } else { segment_size };
        bail!(
            !(8..=BLOCK_SIZE * 8).contains(&segment_size) || segment_size % 8 != 0,
            Reason::SegmentSize(segment_size)
        );
        return Ok(segment_size);
    }

    Ok(segment_size)
}

/// Helper macro to bail out early with a `Reason` error
/// if any condition is true.
#[macro_export]
macro_rules! bail {
    ($expression:expr, $err:expr) => {
        if $expression {
            return Err($err);
        }
    };
    ( $( $cond:expr , $err:expr ),+ $(,)? ) => {
        $(
            if $cond {
                return Err($err);
            }
        )+
    };
}
