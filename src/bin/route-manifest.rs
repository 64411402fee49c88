//! Regenerate the `@router` route manifest without starting a server.
//!
//! ```text
//! route-manifest src/bin/autoroute/controller -o config/routes.toml
//! route-manifest src/controller --print
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use autoroute::comment::parse_dir;
use autoroute::config::LogConfig;
use autoroute::observability::init_logging;

#[derive(Parser)]
#[command(name = "route-manifest")]
#[command(about = "Parse @router doc comments into a TOML route manifest", long_about = None)]
struct Cli {
    /// Controller source directory.
    src_dir: PathBuf,

    /// Manifest file to write.
    #[arg(short, long, default_value = "config/routes.toml")]
    output: PathBuf,

    /// Print the manifest to stdout instead of writing it.
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        level: "warn".to_string(),
        ..LogConfig::default()
    });

    let index = match parse_dir(&cli.src_dir) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.print {
        index.to_toml().map(|toml| print!("{toml}"))
    } else {
        index.save(&cli.output).map(|()| {
            println!(
                "wrote {} routes for {} controllers to {}",
                index.declaration_count(),
                index.len(),
                cli.output.display()
            );
        })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
