use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use blowfish_block::{Cipher, Mode, Reason, iv_from_hex, key_from_hex};
use clap::Parser;

use crate::opts::{Action, Opts};

mod opts;

fn main() -> anyhow::Result<()> {
    let options = Opts::parse();

    let mode = Mode::from_str(&options.mode)?;
    let key = key_from_hex(&options.key).context("invalid --key parameter")?;
    let iv = match &options.iv {
        Some(iv_hex) => Some(iv_from_hex(iv_hex).context("invalid --iv parameter")?),
        None => None,
    };

    let mut cipher = Cipher::new(
        &key,
        iv.as_ref().map(|iv| &iv[..]),
        mode,
        options.segment_size,
    )?;
    if options.no_padding {
        cipher.set_pkcs7_padding(false);
    }

    match options.action {
        Action::Encrypt => run_loop("Plain text: ", &mut cipher, |cipher, line| {
            cipher.encrypt(line.as_bytes())
        }),
        Action::Decrypt => run_loop("Hex ciphertext: ", &mut cipher, |cipher, line| {
            let ciphertext = hex::decode(line.trim()).map_err(Reason::from)?;
            cipher.decrypt(&ciphertext)
        }),
    }
}

/// Prompt for input lines on stdout and run each one through the cipher.
/// Failures are reported on stderr and the loop keeps going; the context is
/// rewound after every line so each message starts from the original IV.
fn run_loop<F>(prompt: &str, cipher: &mut Cipher, mut transform: F) -> anyhow::Result<()>
where
    F: FnMut(&mut Cipher, &str) -> Result<Vec<u8>, Reason>,
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    print!("{prompt}");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match transform(cipher, &line) {
            Ok(output) => hexdump(&mut stdout, &output)?,
            Err(reason) => eprintln!("ERROR: {reason}"),
        }
        cipher.reset();

        print!("{prompt}");
        stdout.flush()?;
    }
    println!();

    Ok(())
}

/// Print the buffer as a plain hex line followed by an offset / hex / ASCII
/// dump, sixteen bytes per row.
fn hexdump(out: &mut impl Write, buf: &[u8]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", hex::encode(buf))?;

    for (row, chunk) in buf.chunks(16).enumerate() {
        write!(out, "| {:08x} |", row * 16)?;
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) => write!(out, " {byte:02x}")?,
                None => write!(out, "   ")?,
            }
            if (i + 1) % 8 == 0 {
                write!(out, " ")?;
            }
        }

        write!(out, "| ")?;
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) if byte.is_ascii_alphanumeric() || byte.is_ascii_punctuation() => {
                    write!(out, "{}", *byte as char)?
                }
                Some(_) => write!(out, ".")?,
                None => write!(out, " ")?,
            }
        }
        writeln!(out, " |")?;
    }
    writeln!(out)?;

    Ok(())
}
