#![deny(missing_docs)]
//! A command-line interface for the cryptool operations.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Args, Parser, Subcommand};
use cryptool_core::envelope::to_hex;
use cryptool_core::config::validate_rsa_key_bits;
use cryptool_core::key_material::KeyMaterial;
use cryptool_core::{Config, Dispatcher, Envelope, Operation, OperationRequest, chaining};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

mod steps;

/// Name reported for text typed on the command line.
const DEFAULT_TEXT_NAME: &str = "text_input.txt";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Encrypt text with AES-256-GCM\ncryptool-cli aes --text \"The quick brown fox\"\n\n# Encrypt a file with AES-256-CBC and replay the steps\ncryptool-cli cbc --file ./notes.txt --steps --delay-ms 500\n\n# RSA-OAEP accepts at most 190 bytes with a 2048-bit key\ncryptool-cli rsa --text \"short secret\"\n\n# Hash a file\ncryptool-cli hash --file ./image.png\n\n# Run an ECDH key agreement\ncryptool-cli ecdh\n\n# Encrypt and decrypt locally\ncryptool-cli roundtrip --text \"hello\""
)]
struct Cli {
    /// Modulus size in bits for generated RSA keys. Overrides CRYPTOOL_RSA_BITS.
    #[arg(long, global = true, value_name = "BITS", value_parser = parse_rsa_bits)]
    rsa_bits: Option<usize>,

    /// Print the response envelope as indented JSON.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt with AES-256-GCM under a fresh key and nonce
    Aes(RunArgs),
    /// Encrypt with AES-256-CBC under a fresh key and IV
    Cbc(RunArgs),
    /// Encrypt with RSA-OAEP under a freshly generated key pair
    Rsa(RunArgs),
    /// Run an ECDH P-256 key agreement between two fresh parties
    Ecdh(StepArgs),
    /// Hash with SHA-256
    Hash(RunArgs),
    /// Encrypt text with AES-256-CBC and decrypt it again locally
    Roundtrip {
        /// Text to encrypt
        #[arg(short, long)]
        text: String,
    },
    /// List the supported operations
    Capabilities,
}

#[derive(Args)]
struct InputArgs {
    /// Text to process
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    text: Option<String>,

    /// Path to a file to process
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Name reported in the response. Defaults to the file name, or text_input.txt for text.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct StepArgs {
    /// Replay the result step by step before printing it
    #[arg(long)]
    steps: bool,

    /// Pause between replayed steps, in milliseconds
    #[arg(long, value_name = "MILLIS", default_value_t = 0)]
    delay_ms: u64,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    steps: StepArgs,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(bits) = cli.rsa_bits {
        config.rsa_key_bits = bits;
    }
    let dispatcher = Dispatcher::new(config);

    match &cli.command {
        Commands::Aes(args) => run(&dispatcher, Operation::AeadGcm, args, cli.pretty),
        Commands::Cbc(args) => run(&dispatcher, Operation::BlockCipherCbc, args, cli.pretty),
        Commands::Rsa(args) => run(&dispatcher, Operation::AsymmetricOaep, args, cli.pretty),
        Commands::Hash(args) => run(&dispatcher, Operation::Hash, args, cli.pretty),
        Commands::Ecdh(steps) => emit(
            &dispatcher,
            Operation::KeyAgreement,
            &OperationRequest::default(),
            steps,
            cli.pretty,
        ),
        Commands::Roundtrip { text } => roundtrip(text),
        Commands::Capabilities => {
            for operation in Operation::ALL {
                let label = operation.primitive(dispatcher.config()).label();
                println!("{:<6} {label}", operation.endpoint());
            }
        }
    }
}

/// Parses `--rsa-bits` with the same bounds the environment variable gets.
fn parse_rsa_bits(raw: &str) -> Result<usize, String> {
    let bits = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("'{raw}' is not a number of bits: {e}"))?;
    validate_rsa_key_bits(bits).map_err(|e| e.to_string())
}

fn run(dispatcher: &Dispatcher, operation: Operation, args: &RunArgs, pretty: bool) {
    let request = build_request(&args.input);
    emit(dispatcher, operation, &request, &args.steps, pretty);
}

/// Builds the request a browser would send: files travel base64 encoded.
fn build_request(input: &InputArgs) -> OperationRequest {
    if let Some(path) = &input.file {
        let bytes = fs::read(path).unwrap_or_else(|e| {
            error!("Failed to read input file '{}': {e}", path.display());
            std::process::exit(1);
        });
        let name = input.name.clone().unwrap_or_else(|| {
            path.file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
        });
        info!("Read {} bytes from '{}'", bytes.len(), path.display());
        OperationRequest::file(name, &bytes)
    } else {
        let name = input
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT_NAME.to_string());
        OperationRequest::text(name, input.text.clone().unwrap_or_default())
    }
}

fn emit(
    dispatcher: &Dispatcher,
    operation: Operation,
    request: &OperationRequest,
    steps: &StepArgs,
    pretty: bool,
) {
    let envelope = dispatcher.dispatch(operation, request).to_envelope();

    if steps.steps {
        let label = operation.primitive(dispatcher.config()).label();
        steps::replay(
            &steps::render(&label, request, &envelope),
            Duration::from_millis(steps.delay_ms),
        );
    }

    print_envelope(&envelope, pretty);
}

fn print_envelope(envelope: &Envelope, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to serialize response: {e}");
            std::process::exit(1);
        }
    }
}

fn roundtrip(text: &str) {
    let material = KeyMaterial::generate(chaining::KEY_LEN, chaining::IV_LEN).unwrap_or_else(|e| {
        error!("Failed to generate key material: {e}");
        std::process::exit(1);
    });

    println!("Plaintext: {text}");
    println!("IV (hex): {}", to_hex(material.iv()));

    let ciphertext = chaining::encrypt(material.key(), material.iv(), text.as_bytes())
        .unwrap_or_else(|e| {
            error!("Encryption failed: {e}");
            std::process::exit(1);
        });
    println!("Ciphertext (hex): {}", to_hex(&ciphertext));
    println!("Ciphertext (base64): {}", STANDARD.encode(&ciphertext));

    let decrypted = chaining::decrypt(material.key(), material.iv(), &ciphertext)
        .unwrap_or_else(|e| {
            error!("Decryption failed: {e}");
            std::process::exit(1);
        });
    println!("Decrypted: {}", String::from_utf8_lossy(&decrypted));
}
