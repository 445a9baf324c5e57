//! Folio - A static site generator for Markdown blogs.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod markdown;
mod output;
mod pages;
mod serve;
mod template;
mod utils;

use anyhow::Result;
use build::build_site;
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use config::{EnvOverrides, SiteConfig};
use serve::serve_site;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve config, build, then serve when asked to.
fn run(cli: &Cli) -> Result<()> {
    let env = EnvOverrides::from_env()?;
    let mut config = SiteConfig::load(cli, &env)?;

    // Bind first so the site is built against the port actually in use
    let server = if cli.is_serve() {
        let (server, addr) = serve::bind(&config)?;
        config.use_serve_addr(cli, addr);
        Some((server, addr))
    } else {
        None
    };

    let build_time = env.build_time.unwrap_or_else(Utc::now);
    let summary = build_site(&config, build_time)?;
    log!(
        "build";
        "{} posts, {} pages, {} files in {}",
        summary.posts,
        summary.pages,
        summary.files,
        summary.output.display()
    );

    if let Some((server, addr)) = server {
        serve_site(server, addr, &config)?;
    }
    Ok(())
}
