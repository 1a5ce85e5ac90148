use bpoint_cli::{self, app, configs, error::ConfigurationError, logger};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = app::Cli::parse();

    let config = configs::Config::new_with_config_path(cli.config_path.clone())
        .map_err(ConfigurationError::from)?;

    let _guard = logger::setup(
        &config.log,
        bpoint_cli::service_name!(),
        [bpoint_cli::service_name!(), "bpoint_cli"],
    )
    .map_err(ConfigurationError::from)?;

    let output = app::run(cli.command, &config).await.map_err(|report| {
        logger::error!(error = ?report, "Command failed");
        report.current_context().to_string()
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
