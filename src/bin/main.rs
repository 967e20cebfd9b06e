//! Seedtree CLI - mnemonic, seed and key derivation
//!
//!   seedtree generate [--words N]                    → {"words": [...], "entropy": "<hex>"}
//!   seedtree encode <entropy-hex>                    → {"words": [...]}
//!   seedtree decode <words...>                       → {"entropy": "<hex>"}
//!   seedtree seed -m "<words>" [-P <passphrase>]     → {"seed": "<hex>"}
//!   seedtree derive -m "<words>" --path x/44/1/1/1   → {"path": ..., "key": "<hex>"}
//!
//! Configuration:
//!   SEEDTREE_MNEMONIC, SEEDTREE_PASSPHRASE, SEEDTREE_KEY_ENTROPY_SIZE, SEEDTREE_MAX_LEVEL
//!   (read from the environment or a `.env` file in the working directory)
//!
//! Output format:
//!   --json     Compact JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context, Result};
use seedtree::config::load_env_file;
use seedtree::logging::init_logging;
use seedtree::mnemonic::split_phrase;
use seedtree::{entropy, KeyTree, KeyTreeConfig, MnemonicCodec, Path};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use tracing::debug;

const DEFAULT_WORDS: usize = 24;

fn main() {
    if let Err(e) = load_env_file(".env") {
        if e.kind() != std::io::ErrorKind::NotFound {
            eprintln!("warning: .env not loaded: {}", e);
        }
    }
    if let Err(e) = init_logging() {
        eprintln!("warning: logging not initialized: {}", e);
    }

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("seedtree {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let codec = MnemonicCodec::english();
    let result = match opts.command.as_deref() {
        Some("generate") | Some("gen") => cmd_generate(&codec, &opts),
        Some("encode") => cmd_encode(&codec, &opts),
        Some("decode") => cmd_decode(&codec, &opts),
        Some("seed") => cmd_seed(&codec, &opts),
        Some("derive") => cmd_derive(&codec, &opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({ "error": format!("{:#}", e) }), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    data: Option<String>,
    words: Option<String>,
    mnemonic: Option<String>,
    passphrase: Option<String>,
    path: Option<String>,
    indices: Option<String>,
    key_size: Option<String>,
    max_level: Option<String>,
    // Output options
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let value = args.get(i + 1).cloned();
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--words" | "-w" => {
                    opts.words = value;
                    i += 1;
                }
                "--mnemonic" | "-m" => {
                    opts.mnemonic = value;
                    i += 1;
                }
                "--passphrase" | "-P" => {
                    opts.passphrase = value;
                    i += 1;
                }
                "--path" | "-p" => {
                    opts.path = value;
                    i += 1;
                }
                "--indices" | "-i" => {
                    opts.indices = value;
                    i += 1;
                }
                "--key-size" => {
                    opts.key_size = value;
                    i += 1;
                }
                "--max-level" => {
                    opts.max_level = value;
                    i += 1;
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        // First positional is command, the rest is data (joined)
        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        if !positional.is_empty() {
            opts.data = Some(positional.join(" "));
        }

        // Environment variables (lower priority than CLI args)
        if opts.mnemonic.is_none() {
            opts.mnemonic = env::var("SEEDTREE_MNEMONIC").ok().filter(|s| !s.is_empty());
        }
        if opts.passphrase.is_none() {
            opts.passphrase = env::var("SEEDTREE_PASSPHRASE").ok();
        }

        opts
    }

    /// Mnemonic from positional words, `--mnemonic`, or SEEDTREE_MNEMONIC.
    fn phrase(&self) -> Result<&str> {
        self.data
            .as_deref()
            .or(self.mnemonic.as_deref())
            .ok_or_else(|| anyhow!("Mnemonic required (--mnemonic or SEEDTREE_MNEMONIC)"))
    }

    fn tree_config(&self) -> Result<KeyTreeConfig> {
        let mut config = KeyTreeConfig::from_env()?;
        if let Some(size) = self.key_size.as_deref() {
            config = config.with_key_entropy_size(parse_flag("--key-size", size)?);
        }
        if let Some(level) = self.max_level.as_deref() {
            config = config.with_max_level(parse_flag("--max-level", level)?);
        }
        Ok(config)
    }

    fn word_count(&self) -> Result<usize> {
        match self.words.as_deref() {
            Some(raw) => parse_flag("--words", raw),
            None => Ok(DEFAULT_WORDS),
        }
    }

    fn derivation_path(&self) -> Result<(String, Vec<u32>)> {
        match (&self.path, &self.indices) {
            (Some(text), _) => {
                let path: Path = text.parse()?;
                Ok((path.to_string(), path.components().to_vec()))
            }
            (None, Some(list)) => {
                let indices = list
                    .split(',')
                    .map(|s| s.trim().parse::<u32>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .with_context(|| format!("Invalid index list: {}", list))?;
                Ok((list.clone(), indices))
            }
            (None, None) => bail!("Path required (--path x/a/b/c/d or --indices a,b,...)"),
        }
    }
}

fn parse_flag<T>(flag: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", flag, raw))
}

fn print_usage() {
    println!(
        r#"seedtree - Mnemonic, seed and key derivation

USAGE:
    seedtree <command> [data] [options]

COMMANDS:
    generate                Fresh entropy and its mnemonic
    encode <hex>            Entropy → mnemonic
    decode <words...>       Mnemonic → entropy (checksum verified)
    seed                    Mnemonic + passphrase → 64-byte seed
    derive                  Mnemonic + passphrase + path → key

OPTIONS:
    --words, -w <n>         Word count: 12|15|18|21|24 (default: 24)
    --mnemonic, -m <words>  Mnemonic phrase (env: SEEDTREE_MNEMONIC)
    --passphrase, -P <p>    Seed passphrase (env: SEEDTREE_PASSPHRASE)
    --path, -p <path>       Key path, e.g. x/44/1/1/1
    --indices, -i <list>    Raw index list, e.g. 44,0,0,1
    --key-size <bytes>      Derived key size (env: SEEDTREE_KEY_ENTROPY_SIZE)
    --max-level <n>         Max path depth (env: SEEDTREE_MAX_LEVEL)

OUTPUT OPTIONS:
    --json                  Compact JSON output
    --pretty                Pretty-print JSON
    --version, -V           Print version

EXAMPLES:
    seedtree generate --words 15
    seedtree decode guess rocket weird sock wreck pond wrist tip crane pet wire tray furnace friend genuine
    seedtree derive -m "guess rocket ..." -P secret --indices 44,0,0,1
    seedtree derive -m "guess rocket ..." --path x/44/1/1/1 --json | jq -r .key
"#
    );
}

fn cmd_generate(codec: &MnemonicCodec, opts: &ParsedArgs) -> Result<Value> {
    let words = opts.word_count()?;
    let entropy = entropy::generate_for_word_count(words)?;
    let mnemonic = codec.encode(&entropy)?;
    debug!(words, "generated mnemonic");
    Ok(json!({
        "words": mnemonic,
        "entropy": hex::encode(&*entropy),
    }))
}

fn cmd_encode(codec: &MnemonicCodec, opts: &ParsedArgs) -> Result<Value> {
    let raw = opts.data.as_deref().ok_or_else(|| anyhow!("Entropy hex required"))?;
    let entropy = zeroize::Zeroizing::new(hex::decode(raw.trim()).context("Invalid entropy hex")?);
    Ok(json!({ "words": codec.encode(&entropy)? }))
}

fn cmd_decode(codec: &MnemonicCodec, opts: &ParsedArgs) -> Result<Value> {
    let words = split_phrase(opts.phrase()?);
    let entropy = codec.decode(&words)?;
    Ok(json!({ "entropy": hex::encode(&*entropy) }))
}

fn cmd_seed(codec: &MnemonicCodec, opts: &ParsedArgs) -> Result<Value> {
    let words = split_phrase(opts.phrase()?);
    let seed = codec.derive_seed(&words, opts.passphrase.as_deref().unwrap_or(""))?;
    Ok(json!({ "seed": seed.to_hex() }))
}

fn cmd_derive(codec: &MnemonicCodec, opts: &ParsedArgs) -> Result<Value> {
    let words = split_phrase(opts.phrase()?);
    let seed = codec.derive_seed(&words, opts.passphrase.as_deref().unwrap_or(""))?;
    let tree = KeyTree::with_config(seed.as_bytes(), opts.tree_config()?)?;
    let (label, indices) = opts.derivation_path()?;
    let key = tree.jump(&indices)?;
    Ok(json!({
        "path": label,
        "key": key.to_hex(),
    }))
}
