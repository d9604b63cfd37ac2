//! CLI for exercising a serial-attached RSA signing device.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::missing_docs_in_private_items
)]

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use sigtty::{Client, SIGNATURE_LEN, StreamChannel};

#[derive(Parser)]
#[command(name = "sigtty", version, about = "Exercise a serial-attached RSA signing device")]
struct Cli {
    /// Response deadline in seconds (waits forever when unset).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a message and print the signature as hex.
    Sign {
        /// Device node, e.g. /dev/ttyUSB0.
        device: PathBuf,

        /// Message bytes as hex (raw bytes are read from stdin when omitted).
        #[arg(long)]
        message_hex: Option<String>,
    },

    /// Check a signature against a message; exits 1 if the device rejects it.
    Verify {
        /// Device node, e.g. /dev/ttyUSB0.
        device: PathBuf,

        /// Signature as hex (512 hex digits).
        #[arg(long)]
        signature_hex: String,

        /// Message bytes as hex (raw bytes are read from stdin when omitted).
        #[arg(long)]
        message_hex: Option<String>,
    },

    /// Sign-verify round trip: the device must accept its own signature and
    /// reject it for an unrelated random message.
    Selftest {
        /// Device node, e.g. /dev/ttyUSB0.
        device: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sign {
            device,
            message_hex,
        } => {
            let message = message_bytes(message_hex)?;
            let mut client = open_client(&device, cli.timeout)?;
            let signature = client.sign(&message)?;
            println!("{}", hex::encode(signature));
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            device,
            signature_hex,
            message_hex,
        } => {
            let signature = hex::decode(signature_hex).context("signature is not valid hex")?;
            ensure!(
                signature.len() == SIGNATURE_LEN,
                "signature must be {SIGNATURE_LEN} bytes, got {}",
                signature.len()
            );
            let message = message_bytes(message_hex)?;
            let mut client = open_client(&device, cli.timeout)?;
            if client.verify(&message, &signature)? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Selftest { device } => {
            selftest(&device, cli.timeout)?;
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The round trip the device must survive: a signature over a message is
/// accepted for that message and rejected for an unrelated one. The second
/// check is a probabilistic oracle — a random 32-byte message colliding
/// with the signed one is overwhelmingly unlikely, not impossible.
fn selftest(device: &Path, timeout: Option<u64>) -> Result<()> {
    let mut client = open_client(device, timeout)?;

    let message = [0u8; 32];
    let signature = client.sign(&message).context("sign request failed")?;
    eprintln!("signature: {}", hex::encode(signature));

    ensure!(
        client.verify(&message, &signature)?,
        "device rejected its own signature"
    );

    let unrelated: [u8; 32] = rand::random();
    ensure!(
        !client.verify(&unrelated, &signature)?,
        "device accepted the signature for an unrelated message"
    );
    Ok(())
}

/// Opens the device node read+write and wraps it in a client.
fn open_client(device: &Path, timeout: Option<u64>) -> Result<Client<StreamChannel<File>>> {
    let handle = OpenOptions::new()
        .read(true)
        .write(true)
        .open(device)
        .with_context(|| format!("opening {}", device.display()))?;
    let channel = StreamChannel::new(handle);
    Ok(match timeout {
        Some(secs) => Client::with_deadline(channel, Duration::from_secs(secs)),
        None => Client::new(channel),
    })
}

/// Message bytes from `--message-hex`, or raw bytes from stdin.
fn message_bytes(message_hex: Option<String>) -> Result<Vec<u8>> {
    match message_hex {
        Some(h) => hex::decode(h).context("message is not valid hex"),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading message from stdin")?;
            Ok(buf)
        }
    }
}
