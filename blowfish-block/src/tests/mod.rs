use crate::{BlockCipher, BlowfishControlBlock, Reason};

mod ecb;
mod ofb;

/// Shared 8-byte fixture, usable as both a key and an IV.
pub(crate) const EIGHT_BYTES: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

pub(crate) fn sixty_four_bytes() -> [u8; 64] {
    std::array::from_fn(|i| i as u8)
}

macro_rules! blowfish_control_block_vectors {
    ($( $fn_name:ident: ( $key:expr , $plain:expr , $exp_cipher:expr) ),*$(,)?) => {
        $(
            #[test]
            fn $fn_name() -> Result<(), Reason> {
                let key = hex::decode($key).unwrap();
                let plain: [u8; 8] = hex::decode($plain).unwrap().try_into().unwrap();
                let control_block = BlowfishControlBlock::new(key)?;

                let cipher = control_block.encrypt(plain);

                assert_eq!($exp_cipher, hex::encode_upper(cipher));

                let deciphered = control_block.decrypt(cipher);

                assert_eq!(plain, deciphered);

                Ok(())
            }
        )*
    };
}

// Standard test-vectors
// see more: https://www.schneier.com/wp-content/uploads/2015/12/vectors-2.txt
blowfish_control_block_vectors! {
    blowfish_control_block_vector_1: (
        "0000000000000000",
        "0000000000000000",
        String::from("4EF997456198DD78")
    ),
    blowfish_control_block_vector_2: (
        "ffffffffffffffff",
        "ffffffffffffffff",
        String::from("51866FD5B85ECB8A")
    ),
    blowfish_control_block_vector_3: (
        "3000000000000000",
        "1000000000000001",
        String::from("7D856F9A613063F2")
    ),
    blowfish_control_block_vector_4: (
        "1111111111111111",
        "1111111111111111",
        String::from("2466DD878B963C9D")
    ),
    blowfish_control_block_vector_5: (
        "0123456789abcdef",
        "1111111111111111",
        String::from("61F9C3802281B096")
    ),
    blowfish_control_block_vector_6: (
        "0000000000000000",
        "ffffffffffffffff",
        String::from("014933E0CDAFF6E4")
    ),
    blowfish_control_block_vector_7: (
        "ffffffffffffffff",
        "0000000000000000",
        String::from("F21E9A77B71C49BC")
    ),
    blowfish_control_block_vector_8: (
        // key is the ASCII string "abcdefghijklmnopqrstuvwxyz"
        "6162636465666768696a6b6c6d6e6f707172737475767778797a",
        // plaintext is the ASCII string "BLOWFISH"
        "424c4f5746495348",
        String::from("324ED0FEF413A203")
    ),
}
