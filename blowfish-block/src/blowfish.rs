use crate::{BLOCK_SIZE, BlockCipher, Reason, bail, consts};

/// Smallest key accepted by the key schedule, in bytes.
pub const MIN_KEY_BYTES: usize = 4;

/// Largest key accepted by the key schedule, in bytes.
pub const MAX_KEY_BYTES: usize = 56;

/// # Blowfish control block
///
/// This struct represents the internal state of a keyed Blowfish cipher:
/// the 18-entry P-array of subkeys and the four 256-entry S-boxes. Both are
/// derived from the raw key once, at construction, and never change
/// afterwards.
///
/// The control block only works on single 8-byte blocks; arbitrary-length
/// messages are handled by the operation modes driven through [Cipher].
///
/// [Cipher]: crate::Cipher
pub struct BlowfishControlBlock {
    p: [u32; 18],
    s: [[u32; 256]; 4],
}

impl BlowfishControlBlock {
    /// Blowfish constructor method.
    ///
    /// It creates a control block from a raw key of 4 to 56 bytes and runs
    /// the key schedule.
    ///
    /// Returns a result type containing the control block, or the [Reason]
    /// the key was rejected.
    pub fn new<K>(key: K) -> Result<Self, Reason>
    where
        K: AsRef<[u8]>,
    {
        let key_bytes = key.as_ref();

        bail!(
            key_bytes.is_empty(),
            Reason::InvalidKey,
            key_bytes.len() < MIN_KEY_BYTES || key_bytes.len() > MAX_KEY_BYTES,
            Reason::KeyLength(key_bytes.len()),
        );

        let mut block = Self {
            p: consts::P,
            s: consts::S,
        };
        block.expand_key(key_bytes);

        Ok(block)
    }

    /// Blowfish key schedule.
    ///
    /// XORs the key, read as a cyclic big-endian byte stream, into the
    /// P-array, then replaces the P-array and every S-box entry with the
    /// output of repeatedly encrypting an all-zero block with the evolving
    /// schedule. Requires 521 block encryptions in total.
    fn expand_key(&mut self, key: &[u8]) {
        let mut rolling_key = key.iter().copied().cycle();

        for subkey in self.p.iter_mut() {
            let word = (&mut rolling_key)
                .take(4)
                .fold(0u32, |word, byte| (word << 8) | u32::from(byte));
            *subkey ^= word;
        }

        let (mut left, mut right) = (0, 0);

        for i in (0..18).step_by(2) {
            (left, right) = self.encrypt_words(left, right);
            self.p[i] = left;
            self.p[i + 1] = right;
        }

        for sbox in 0..4 {
            for i in (0..256).step_by(2) {
                (left, right) = self.encrypt_words(left, right);
                self.s[sbox][i] = left;
                self.s[sbox][i + 1] = right;
            }
        }
    }

    /// The Feistel round function,
    /// `F(x) = ((S1[a] + S2[b]) ^ S3[c]) + S4[d]` over the four bytes of
    /// `x`, with wrapping additions.
    #[inline]
    fn feistel(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        let h = self.s[0][usize::from(a)].wrapping_add(self.s[1][usize::from(b)]);
        (h ^ self.s[2][usize::from(c)]).wrapping_add(self.s[3][usize::from(d)])
    }

    /// Encrypt one block held as two big-endian 32-bit words, running the
    /// 16 Feistel rounds two at a time.
    pub fn encrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for i in (0..16).step_by(2) {
            left ^= self.p[i];
            right ^= self.feistel(left);
            right ^= self.p[i + 1];
            left ^= self.feistel(right);
        }

        left ^= self.p[16];
        right ^= self.p[17];

        (right, left)
    }

    /// Decrypt one block held as two big-endian 32-bit words. Same Feistel
    /// structure as [Self::encrypt_words], with the P-array applied in
    /// reverse.
    pub fn decrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for i in (1..9).rev() {
            left ^= self.p[2 * i + 1];
            right ^= self.feistel(left);
            right ^= self.p[2 * i];
            left ^= self.feistel(right);
        }

        left ^= self.p[1];
        right ^= self.p[0];

        (right, left)
    }
}

impl BlockCipher for BlowfishControlBlock {
    fn encrypt(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let left = u32::from_be_bytes(block[..4].try_into().unwrap());
        let right = u32::from_be_bytes(block[4..].try_into().unwrap());

        let (left, right) = self.encrypt_words(left, right);

        let mut out = [0; BLOCK_SIZE];
        out[..4].copy_from_slice(&left.to_be_bytes());
        out[4..].copy_from_slice(&right.to_be_bytes());
        out
    }

    fn decrypt(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let left = u32::from_be_bytes(block[..4].try_into().unwrap());
        let right = u32::from_be_bytes(block[4..].try_into().unwrap());

        let (left, right) = self.decrypt_words(left, right);

        let mut out = [0; BLOCK_SIZE];
        out[..4].copy_from_slice(&left.to_be_bytes());
        out[4..].copy_from_slice(&right.to_be_bytes());
        out
    }
}
