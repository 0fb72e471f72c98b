mod verbose;

use std::path::Path;

use clap::{FromArgMatches as _, IntoApp as _, Parser, Subcommand};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;
use twelf::Layer;

use steptimer_common::{Conf, LogFormat};

const CONFIG_FILE: &str = "steptimer.toml";

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    #[clap(flatten)]
    verbose: verbose::Verbosity,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run shell commands one after the other and report how long each took
    Run {
        /// Commands to time, `a && b` is timed as a nested chain
        #[clap(required = true)]
        commands: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), steptimer_common::Report> {
    steptimer_common::install()?;

    let matches = Cli::command().args(&Conf::clap_args()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let mut layers = Vec::with_capacity(3);
    if Path::new(CONFIG_FILE).exists() {
        layers.push(Layer::Toml(CONFIG_FILE.into()));
    }
    layers.push(Layer::Env(Some("STEPTIMER_".to_string())));
    layers.push(Layer::Clap(matches));

    let conf = Conf::with_layers(&layers)?;
    let log_format = conf.log_format()?;

    let subscriber = Registry::default()
        .with(ErrorLayer::default())
        .with((log_format == LogFormat::Fmt).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with((log_format == LogFormat::Tree).then(|| HierarchicalLayer::new(2)))
        .with(EnvFilter::from_default_env().add_directive(cli.verbose.log_level_filter().into()));

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { commands } => steptimer_command_run::run(&conf, &commands).await?,
    }

    Ok(())
}
