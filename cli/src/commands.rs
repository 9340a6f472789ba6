pub mod scan;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "bannergrab")]
#[command(about = "Grab service banners from many hosts at once.")]
#[command(version)]
pub struct CommandLine {
    /// Targets as host or host:port
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// File with one target per line ('#' starts a comment)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub targets_file: Option<PathBuf>,

    /// Protocol: http, https, ftp, smtp, ssh, telnet, or any custom label
    #[arg(long = "proto", default_value = "http")]
    pub protocol: String,

    /// Port to use for every target, overriding ports in targets
    #[arg(long)]
    pub port: Option<String>,

    /// Payload to send after connecting; '{host}' is replaced with the target host
    #[arg(long)]
    pub payload: Option<String>,

    /// Timeout in seconds per connection
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Number of concurrent grabs
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: u64,

    /// Output file; format is inferred from a .json or .csv extension
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Use TLS regardless of protocol
    #[arg(long)]
    pub tls: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the banner, headers and summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
