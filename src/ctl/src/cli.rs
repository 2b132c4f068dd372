use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Boost+ - inspect and change the streaming client policies", version)]
pub struct Cli {
    #[clap(long, help = "Policy file to operate on (overrides the engine config)")]
    pub prefs: Option<PathBuf>,

    #[clap(long, help = "Engine config file providing the policy file location")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one policy, or all of them with their defaults filled in
    Get { key: Option<String> },

    /// Store a policy value
    ///
    /// Changing the aspect ratio also moves the resolution to the closest entry of the
    /// new list.
    Set {
        key: String,
        value: String,

        #[clap(long, default_value_t = 1920, help = "Raw display width")]
        width: i32,

        #[clap(long, default_value_t = 1080, help = "Raw display height")]
        height: i32,
    },

    /// Apply the overrides carried by a deep-link URI
    ApplyUri { uri: String },

    /// List the resolutions offered for a display and aspect ratio
    Resolutions {
        #[clap(long, default_value_t = 1920, help = "Raw display width")]
        width: i32,

        #[clap(long, default_value_t = 1080, help = "Raw display height")]
        height: i32,

        #[clap(long, help = "Aspect ratio profile index, native when omitted")]
        aspect: Option<i32>,
    },

    /// Search a corpus dump for methods matching a signature
    Locate {
        #[clap(long, help = "TOML corpus dump")]
        corpus: PathBuf,

        #[clap(long = "self-string", help = "String the method itself references")]
        self_strings: Vec<String>,

        #[clap(long = "caller-string", help = "String a direct caller references")]
        caller_strings: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
