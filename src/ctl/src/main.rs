mod cli;
mod commands;

use crate::cli::Cli;
use anyhow::Result;
use log::LevelFilter;
use std::env;

fn init_logger() {
    if env::var("KSU").is_ok() {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(if cfg!(debug_assertions) {
                    LevelFilter::Trace
                } else {
                    LevelFilter::Info
                })
                .with_tag("boostplus::ctl"),
        );
    } else {
        env_logger::init();
    }
}

fn main() -> Result<()> {
    init_logger();
    commands::run(Cli::parse_args())
}
