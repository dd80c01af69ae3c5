use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use cars_storage::repository::RecordFilter;

mod cli;
mod commands;
mod config;
mod store;

use cli::{Cli, Command, ConfigAction};

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config_path = cli.config.as_deref();
    let config = config::load_config(config_path)?;

    match cli.command {
        Command::Questions { lang } => commands::questions(lang.into()),
        Command::Score {
            input,
            respondent,
            save,
            strict,
            json,
        } => {
            let args = commands::ScoreArgs {
                input,
                respondent,
                save,
                strict,
                json,
            };
            commands::score(&config, args).await?
        }
        Command::Show { id } => commands::show(&config, id).await?,
        Command::History {
            risk_level,
            respondent,
            self_harm,
            limit,
        } => {
            let filter = RecordFilter {
                risk_level: risk_level.map(Into::into),
                respondent_id: respondent,
                self_harm_only: self_harm,
                limit,
            };
            commands::history(&config, filter).await?
        }
        Command::Stats => commands::statistics(&config).await?,
        Command::Status => commands::status(&config).await?,
        Command::Export { format, out } => commands::export(&config, format, out).await?,
        Command::Import { file, merge, yes } => commands::import(&config, &file, merge, yes).await?,
        Command::Purge { yes } => commands::purge(&config, yes).await?,
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&config)?,
            ConfigAction::Init => commands::config_init(&config, config_path)?,
        },
    }

    Ok(())
}
