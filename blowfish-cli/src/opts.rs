use clap::{Parser, ValueEnum};

const ABOUT: &str = "A command-line Blowfish encryption/decryption tool";
const LONG_ABOUT: &str = "\
blowfish-cli encrypts or decrypts messages read line by line from standard input \
using the Blowfish block cipher in one of the CBC, CFB, ECB or OFB operation modes. \
Keys and initialization vectors are supplied as hex strings and results are printed \
as hex dumps. Use this tool to exercise the cipher interactively.";

#[derive(Parser, Debug)]
#[command(name = "blowfish-cli", version, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Opts {
    /// Operation mode, one of CBC, CFB, CTR, ECB or OFB.
    pub mode: String,

    /// Secret key to be used by the Blowfish control block, as a hex
    /// string of 4 to 56 bytes.
    #[clap(short, long)]
    pub key: String,

    /// Initialization vector as a hex string of 8 bytes. Required by
    /// CBC, CFB and OFB; ECB forbids it.
    #[clap(short, long)]
    pub iv: Option<String>,

    /// CFB segment size in bits, a multiple of 8 between 8 and 64.
    /// Zero selects the default of 8.
    #[clap(short, long, default_value_t = 0)]
    pub segment_size: usize,

    /// Disable PKCS#7 padding; CBC and ECB input must then be a
    /// multiple of 8 bytes.
    #[clap(long)]
    pub no_padding: bool,

    /// What action to perform either to encrypt or
    /// to decrypt
    #[clap(short, long)]
    pub action: Action,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Action {
    Encrypt,
    Decrypt,
}
