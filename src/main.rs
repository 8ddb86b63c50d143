use abs_probe::api::{open_session, AbsClient, ApiError, ItemsQuery};
use abs_probe::config::Settings;
use abs_probe::scenarios::{self, authors, collections, libraries};
use abs_probe::ui::{Cli, Command, Reporter};
use abs_probe::{init_app_dirs, init_logging};
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::new();
    let args = &cli.args;
    init_logging(args.log_json);

    init_app_dirs()?;

    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&config_path)?;
    settings.apply_overrides(
        args.server_url.clone(),
        args.username.clone(),
        args.token.clone(),
        args.save_dir.clone(),
        args.pause_ms,
    );

    let reporter = Reporter::new(args.output, settings.save_dir.clone());

    let client = if args.command == Command::Ping {
        AbsClient::new(&settings.server_url)
    } else {
        connect(&cli, &mut settings, &config_path).await?
    };

    if let Err(e) = run_command(&client, &reporter, &settings, args.command.clone()).await {
        error!("Run aborted: {}", e);
        cli.display_error(&e);
        return Err(e.into());
    }
    Ok(())
}

/// Validates the settings and opens an authenticated session. A fresh token
/// is written back to the config file; other overrides are not.
async fn connect(cli: &Cli, settings: &mut Settings, config_path: &Path) -> Result<AbsClient, Box<dyn Error>> {
    settings.validate()?;

    // A password, from the flag, the environment or a prompt, forces a fresh
    // login; otherwise the stored token is used.
    let password = match (&cli.args.password, &settings.username, &settings.token) {
        (Some(password), _, _) => Some(password.clone()),
        (None, Some(username), None) => Some(cli.prompt_password(username)?),
        _ => None,
    };

    let client = open_session(settings, password.as_deref()).await?;
    if let (Some(_), Some(token)) = (&password, client.token()) {
        info!("Authentication successful, saving token to {}", config_path.display());
        Settings::save_token(config_path, token)?;
    }
    Ok(client)
}

async fn run_command(
    client: &AbsClient,
    reporter: &Reporter,
    settings: &Settings,
    command: Command,
) -> Result<(), ApiError> {
    let pause = Duration::from_millis(settings.pause_ms);

    match command {
        Command::Ping => {
            scenarios::probe(reporter, "ping", client.ping()).await?;
        }
        Command::Libraries => {
            let overview = libraries::list(client, reporter).await?;
            info!(
                "{} libraries, {} items in the first",
                overview.library_ids.len(),
                overview.item_ids.len()
            );
        }
        Command::LibraryGets { library_id } => {
            let library_id = libraries::resolve_library(client, library_id).await?;
            libraries::existing_gets(client, reporter, &library_id).await?;
        }
        Command::LibraryLifecycle { name, folders } => {
            let id = libraries::lifecycle(client, reporter, &name, folders.as_slice(), pause).await?;
            info!("Library {} created and deleted", id);
        }
        Command::Collections { library_id } => {
            let library_id = libraries::resolve_library(client, library_id).await?;
            let books = client.library_item_ids(&library_id, &ItemsQuery::default()).await?;
            let plan = collections::CollectionPlan::from_books(&books);
            let run = collections::run(client, reporter, &library_id, &books, &plan).await?;
            info!("Created {} collections, deleted {}", run.created.len(), run.deleted.len());
        }
        Command::Authors { library_id } => {
            let library_id = libraries::resolve_library(client, library_id).await?;
            authors::run(client, reporter, &library_id).await?;
        }
        Command::Item { id } => {
            scenarios::probe(reporter, "item", client.item(&id)).await?;
        }
        Command::Request { method, path, body, query } => {
            let params: Vec<(&str, String)> =
                query.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
            let label = format!("{:?} {}", method, path);
            scenarios::probe(reporter, &label, client.raw(method.into(), &path, Some(&params[..]), body))
                .await?;
        }
    }
    Ok(())
}
