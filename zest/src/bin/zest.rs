//! The `zest` language server command line tool.

use std::io::IsTerminal;
use std::io::stderr;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use zest_lsp::Server;
use zest_lsp::ServerOptions;

/// A language server for the Zest language.
#[derive(Parser)]
#[clap(bin_name = "zest", version, arg_required_else_help = false)]
struct App {
    /// Serves the language server over standard input/output.
    ///
    /// This is currently the only supported transport; the flag exists so
    /// an editor's client configuration has something explicit to pass.
    #[clap(long)]
    stdio: bool,

    /// Increases logging verbosity; may be specified multiple times.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    let level = match app.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if !app.stdio {
        anyhow::bail!("only the `--stdio` transport is currently supported");
    }

    Server::run(ServerOptions {
        name: Some("zest".to_string()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
    .await
}
