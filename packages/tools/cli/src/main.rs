//! Pasekit CLI (`psk`)
//!
//! v4.local 토큰 운영 도구입니다. 비밀키 생성과 토큰 점검을 제공합니다.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "psk")]
#[command(author, version, about = "Pasekit CLI - PASETO v4.local operator tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────────
    /// Generate a random 32-byte key for local Paseto tokens (hex-encoded)
    GenerateKey {
        /// Append PASETO_SECRET_KEY to this env file (skipped if already present)
        #[arg(long)]
        env_file: Option<PathBuf>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Tokens
    // ─────────────────────────────────────────────────────────────────────────
    /// Decrypt a token and print its claims
    Inspect {
        /// The v4.local token string
        token: String,

        /// Hex-encoded secret key (defaults to PASETO_SECRET_KEY)
        #[arg(long)]
        key: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateKey { env_file } => commands::key::generate(env_file.as_deref()),
        Commands::Inspect { token, key } => commands::token::inspect(&token, key.as_deref()),
    }
}
