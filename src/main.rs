//! Veridoc - page-resolution engine for versioned, multi-language docs.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod error;
mod language;
mod logger;
mod page;
mod redirect;
mod release;
mod render;
mod resolver;
mod site;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Check => cli::check::run_check(config),
        Commands::Resolve {
            path,
            lang,
            lenient,
        } => cli::resolve::run_resolve(config, path, lang.as_deref(), *lenient),
        Commands::List { lang } => cli::list::run_list(config, lang.as_deref()),
    }
}
