use crate::{Cipher, Mode, Reason, random_iv};

const KEY: &str = "f5fe5b583e421cca486fa213019bee6b6344bd19bcc916dd499c1c97e3979d4b\
                   3dc2087d184e60801c9442a68e6a4772a3fad2";
const INIT_VECTOR: &str = "3f65aedd85db7e67";

const PLAINTEXT: &[u8] = b"this message can be any length that you want";
const CIPHERTEXT: &str = "cf0c80642ff8d1f6ee15e371c1b71f48ad29bf18de98b89d5d55a70bbb6ae831\
                          71e3c2c84ea27cfc843e0c9b";

fn ofb_cipher() -> Result<Cipher, Reason> {
    let key = crate::key_from_hex(KEY)?;
    let iv = crate::iv_from_hex(INIT_VECTOR)?;
    Cipher::new(&key, Some(&iv), Mode::OFB, 0)
}

#[test]
fn encrypts_known_vector() -> Result<(), Reason> {
    let mut cipher = ofb_cipher()?;

    assert_eq!(hex::decode(CIPHERTEXT).unwrap(), cipher.encrypt(PLAINTEXT)?);

    Ok(())
}

#[test]
fn decrypt_is_the_encrypt_transform() -> Result<(), Reason> {
    let mut cipher = ofb_cipher()?;

    assert_eq!(
        PLAINTEXT,
        cipher.decrypt(&hex::decode(CIPHERTEXT).unwrap())?.as_slice()
    );

    Ok(())
}

#[test]
fn chained_calls_continue_the_keystream() -> Result<(), Reason> {
    let mut stream = ofb_cipher()?;

    // split points deliberately avoid the block boundaries so the
    // keystream cursor is exercised
    let mut piecewise = stream.encrypt(&PLAINTEXT[..5])?;
    piecewise.extend(stream.encrypt(&PLAINTEXT[5..21])?);
    piecewise.extend(stream.encrypt(&PLAINTEXT[21..])?);

    assert_eq!(hex::decode(CIPHERTEXT).unwrap(), piecewise);

    Ok(())
}

#[test]
fn round_trips_any_split() -> Result<(), Reason> {
    let iv = random_iv();
    let mut cipher = Cipher::new(b"any length stream", Some(&iv), Mode::OFB, 0)?;

    let ciphertext = cipher.encrypt(b"output feedback keeps no secrets about length")?;

    cipher.reset();
    let mut recovered = cipher.decrypt(&ciphertext[..7])?;
    recovered.extend(cipher.decrypt(&ciphertext[7..])?);

    assert_eq!(
        recovered,
        b"output feedback keeps no secrets about length"
    );

    Ok(())
}

#[test]
fn padding_flag_does_not_change_ofb() -> Result<(), Reason> {
    let mut cipher = ofb_cipher()?;
    let with_flag = cipher.encrypt(PLAINTEXT)?;

    cipher.reset();
    cipher.set_pkcs7_padding(false);

    assert_eq!(with_flag, cipher.encrypt(PLAINTEXT)?);

    Ok(())
}
