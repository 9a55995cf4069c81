use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use bencode_info::config::{Config, DEFAULT_CONFIG_PATH};
use bencode_info::engine::{contents_command, decode_command, info_command};

#[derive(Parser)]
#[command(version, about = "Decode bencode and inspect .torrent metadata")]
struct Cli {
    /// TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a bencoded string and print it as JSON
    Decode { value: String },
    /// Print announce URL, length, info hash and piece hashes of a torrent
    Info {
        path: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a whole bencoded file and print the value tree as JSON
    Contents { path: PathBuf },
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = Config::load_from(&cli.config)?;
    match cli.command {
        Command::Decode { value } => decode_command(value.as_bytes(), &config),
        Command::Info { path, json } => info_command(&path, &config, json),
        Command::Contents { path } => contents_command(&path, &config),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
