//! profiledeck CLI entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profiledeck_client::cache::{CacheStore, SqliteLayer};
use profiledeck_client::cli::cache::CacheAction;
use profiledeck_client::cli::profiles::ProfilesAction;
use profiledeck_client::cli::qr::QrAction;
use profiledeck_client::cli::{Cli, Commands, OutputFormat};
use profiledeck_client::coordinator::{NotificationKind, PaginationCoordinator};
use profiledeck_client::error::{ensure_success, require_profile, ClientError};
use profiledeck_client::output::{format_output, pretty};
use profiledeck_client::qr::{render_png, scan_image, FileCamera, RenderOptions, ScanSession};
use profiledeck_client::{Config, ProfileClient};
use profiledeck_core::api::{ProfileService, DEFAULT_PAGE_SIZE};
use profiledeck_core::profile::{Profile, ProfileInput};
use profiledeck_core::qr::download_file_name;

type Coordinator = PaginationCoordinator<ProfileClient>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profiledeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.apply_to(Config::from_env());

    match &cli.command {
        Commands::Cache(cache_cmd) => {
            let store = open_cache(&config);
            match cache_cmd.action {
                CacheAction::Clear => {
                    store.clear();
                    if !cli.quiet {
                        println!("Cache cleared");
                    }
                }
                CacheAction::Stats => {
                    let stats = store.stats();
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&stats, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_stats(&stats)),
                    }
                }
            }
        }
        Commands::Profiles(profiles_cmd) => {
            let client = build_client(&config, &cli);
            let coordinator = build_coordinator(&config, &client);
            run_profiles(&profiles_cmd.action, &cli, &client, &coordinator).await?;
        }
        Commands::Qr(qr_cmd) => {
            let client = build_client(&config, &cli);
            let coordinator = build_coordinator(&config, &client);
            run_qr(&qr_cmd.action, &cli, &config, &client, &coordinator).await?;
        }
    }

    Ok(())
}

/// Opens the two-layer cache, falling back to memory only if SQLite fails.
fn open_cache(config: &Config) -> CacheStore {
    let path = &config.cache_db_path;
    let store = CacheStore::in_memory(config.cache_max_entries, config.cache_ttl());
    match SqliteLayer::open(path) {
        Ok(layer) => store.with_persistent_layer(layer),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Persistent cache unavailable, using memory only");
            store
        }
    }
}

fn build_client(config: &Config, cli: &Cli) -> Arc<ProfileClient> {
    let client = if cli.no_cache {
        ProfileClient::new(&config.base_url)
    } else {
        ProfileClient::with_cache(&config.base_url, Arc::new(open_cache(config)))
    };
    tracing::debug!(?client, "Client ready");
    Arc::new(client)
}

fn build_coordinator(config: &Config, client: &Arc<ProfileClient>) -> Coordinator {
    PaginationCoordinator::with_options(client.clone(), config.search_debounce(), DEFAULT_PAGE_SIZE)
}

fn print_profile(cli: &Cli, heading: Option<&str>, profile: &Profile) {
    match cli.format {
        OutputFormat::Json => println!("{}", format_output(profile, cli.format)),
        OutputFormat::Pretty => match heading {
            Some(heading) => println!("{heading}:\n{}", pretty::format_profile(profile)),
            None => println!("{}", pretty::format_profile(profile)),
        },
    }
}

fn print_input(cli: &Cli, input: &ProfileInput) {
    match cli.format {
        OutputFormat::Json => println!("{}", format_output(input, cli.format)),
        OutputFormat::Pretty => println!("{}", pretty::format_input(input)),
    }
}

async fn fetch_profile(client: &ProfileClient, id: &str) -> Result<Profile, ClientError> {
    require_profile(client.get_profile(id).await, id)
}

async fn run_profiles(
    action: &ProfilesAction,
    cli: &Cli,
    client: &ProfileClient,
    coordinator: &Coordinator,
) -> anyhow::Result<()> {
    match action {
        ProfilesAction::List { page, search } => {
            let mut notifications = coordinator.notifications();
            match search {
                Some(search) => {
                    coordinator.set_search(search.as_str()).await?;
                    if *page > 1 {
                        coordinator.go_to_page(*page).await;
                    }
                }
                None => coordinator.go_to_page(*page).await,
            }
            if let Ok(notification) = notifications.try_recv() {
                if notification.kind == NotificationKind::Error {
                    bail!(notification.message);
                }
            }
            let view = coordinator.snapshot();
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&view, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_view(&view)),
            }
        }
        ProfilesAction::All => {
            let profiles = ensure_success(client.list_all_profiles().await)?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&profiles, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_profiles(&profiles)),
            }
        }
        ProfilesAction::Get { id } => {
            let profile = fetch_profile(client, id).await?;
            print_profile(cli, None, &profile);
        }
        ProfilesAction::Create { fields } => {
            let result = coordinator.create(&fields.clone().into_input()).await?;
            let profile = ensure_success(result)?;
            print_profile(cli, Some("Created"), &profile);
        }
        ProfilesAction::Update { id, fields } => {
            let current = fetch_profile(client, id).await?;
            let input = fields.clone().apply_to(ProfileInput::from_profile(&current));
            let profile = ensure_success(coordinator.update(id, &input).await?)?;
            print_profile(cli, Some("Updated"), &profile);
        }
        ProfilesAction::Delete { id } => {
            ensure_success(coordinator.delete(id).await)?;
            if !cli.quiet {
                println!("Deleted profile {}", id);
            }
        }
    }

    Ok(())
}

async fn run_qr(
    action: &QrAction,
    cli: &Cli,
    config: &Config,
    client: &ProfileClient,
    coordinator: &Coordinator,
) -> anyhow::Result<()> {
    match action {
        QrAction::Encode { id, out, size } => {
            let profile = fetch_profile(client, id).await?;
            let options = RenderOptions::with_size(size.unwrap_or(config.qr_image_size));
            let png = render_png(&profile, options).map_err(ClientError::from)?;
            let path = out
                .clone()
                .unwrap_or_else(|| download_file_name(&profile.full_name).into());
            tokio::fs::write(&path, png)
                .await
                .map_err(|err| ClientError::io(&path, err))?;
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
        QrAction::Decode { image } => {
            let input = decode_file(image).await?;
            print_input(cli, &input);
        }
        QrAction::Apply { image, id } => {
            let input = decode_file(image).await?;
            let (heading, result) = match id {
                Some(id) => ("Updated", coordinator.update(id, &input).await?),
                None => ("Created", coordinator.create(&input).await?),
            };
            let profile = ensure_success(result)?;
            print_profile(cli, Some(heading), &profile);
        }
        QrAction::Scan { frames } => {
            let mut session = ScanSession::new(FileCamera::new(frames.clone()));
            session.start(None).await.map_err(ClientError::from)?;
            let envelope = session.next_payload().await.map_err(ClientError::from)?;
            session.close();
            print_input(cli, &envelope.data.into_input());
        }
    }

    Ok(())
}

async fn decode_file(path: &Path) -> anyhow::Result<ProfileInput> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ClientError::io(path, err))?;
    let envelope = scan_image(&bytes).map_err(ClientError::from)?;
    Ok(envelope.data.into_input())
}
