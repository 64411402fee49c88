//! Demo server: two controllers served in auto or comment mode.
//!
//! ```text
//! autoroute -c config/app.toml
//! ```

mod controller;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use autoroute::config::load_config_or_default;
use autoroute::middleware::{request_id, request_logger};
use autoroute::observability::init_logging;
use autoroute::{App, RouterGroup, Shutdown};

use crate::controller::admin::UserController;
use crate::controller::ExampleController;

#[derive(Parser)]
#[command(name = "autoroute")]
#[command(about = "Serve controller actions with derived routes", long_about = None)]
struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "config/app.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config_or_default(&cli.config);
    init_logging(&config.log);

    tracing::info!(
        app = %config.app.name,
        run_mode = ?config.app.run_mode,
        router_mode = ?config.app.router_mode,
        router_sep = %config.app.router_sep,
        "autoroute v0.1.0 starting"
    );

    let address = config.server.bind_address();
    let groups = [
        RouterGroup::new().controller::<ExampleController>(),
        RouterGroup::new().prefix("/v1").controller::<UserController>(),
    ];

    // Route errors surface before the port is taken.
    let server = App::new(config)
        .use_middleware(request_id())
        .use_middleware(request_logger())
        .add_router_groups(groups)
        .into_server()?;

    let listener = TcpListener::bind(&address).await?;
    server.run(listener, Shutdown::new()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
