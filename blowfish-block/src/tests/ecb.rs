use crate::{Cipher, Mode, Reason};

const KEY: &str = "bcf8a260199662d5ba73036486ef1c9cc9cff2a1b500c81936b2f0158db2286676c0cdad56";

const PLAINTEXT: &[u8] = b"message that is a multiple of block size bytes in length";
const CIPHERTEXT: &str = "4c8da5d0e0a69b160fc31fe25dcc71972a3b04421849c6de259ac28cd0f91ecb\
                          177136bb6cf7de748923f8f3ec734021591f651058c79385";

fn ecb_cipher() -> Result<Cipher, Reason> {
    let key = crate::key_from_hex(KEY)?;
    Cipher::new(&key, None, Mode::ECB, 0)
}

#[test]
fn encrypts_known_vector_without_padding() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;
    cipher.set_pkcs7_padding(false);

    assert_eq!(hex::decode(CIPHERTEXT).unwrap(), cipher.encrypt(PLAINTEXT)?);

    Ok(())
}

#[test]
fn decrypts_known_vector_without_padding() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;
    cipher.set_pkcs7_padding(false);

    assert_eq!(
        PLAINTEXT,
        cipher.decrypt(&hex::decode(CIPHERTEXT).unwrap())?.as_slice()
    );

    Ok(())
}

#[test]
fn padded_round_trip_any_length() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;

    let ciphertext = cipher.encrypt(b"untidy length")?;
    assert_eq!(ciphertext.len(), 16);

    assert_eq!(cipher.decrypt(&ciphertext)?, b"untidy length");

    Ok(())
}

#[test]
fn aligned_input_gains_a_full_padding_block() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;

    let ciphertext = cipher.encrypt(&[0x20; 16])?;
    assert_eq!(ciphertext.len(), 24);

    assert_eq!(cipher.decrypt(&ciphertext)?, [0x20; 16]);

    Ok(())
}

#[test]
fn unaligned_input_fails_without_padding() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;
    cipher.set_pkcs7_padding(false);

    assert!(matches!(
        cipher.encrypt(&PLAINTEXT[..55]),
        Err(Reason::BlockAlignment(Mode::ECB))
    ));

    let ciphertext = hex::decode(CIPHERTEXT).unwrap();
    assert!(matches!(
        cipher.decrypt(&ciphertext[..13]),
        Err(Reason::BlockAlignment(Mode::ECB))
    ));

    Ok(())
}

#[test]
fn empty_message_yields_empty_buffer() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;

    assert!(cipher.encrypt(&[])?.is_empty());
    assert!(cipher.decrypt(&[])?.is_empty());

    Ok(())
}

#[test]
fn identical_blocks_encrypt_identically() -> Result<(), Reason> {
    let mut cipher = ecb_cipher()?;
    cipher.set_pkcs7_padding(false);

    let ciphertext = cipher.encrypt(b"ABCDEFGHABCDEFGH")?;
    assert_eq!(ciphertext[..8], ciphertext[8..]);

    Ok(())
}
