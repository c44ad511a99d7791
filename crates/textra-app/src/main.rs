use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use textra_config::{Config, Preferences};
use textra_translator::{TranslationRequest, languages};
use tokio::io::BufReader;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod menu;
pub mod preferences;
pub mod profile;
pub mod state;
pub mod translator;

use self::cli::{Cli, Command, PrefsAction, TranslateArgs};
use self::controller::AppController;
use self::preferences::{JsonPreferenceStore, PreferenceStore};
use self::state::AppState;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = profile::load_config(cli.config.as_deref())?;
    init_tracing(&config.log_filter, cli.log_json || config.log_json);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start the tokio runtime")?;
    let result = runtime.block_on(run(cli, config));
    // A pending stdin read never finishes on its own
    runtime.shutdown_timeout(Duration::from_millis(500));

    result
}

/// Logs go to stderr, stdout carries the host protocol
fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let preferences_path = profile::preferences_path(cli.preferences, &config)?;
    let store = Arc::new(JsonPreferenceStore::new(preferences_path));

    match cli.command.unwrap_or(Command::Host) {
        Command::Host => run_host(config, store).await,
        Command::Translate(args) => run_translate(config, store.as_ref(), args).await,
        Command::Languages => {
            for (code, name) in languages::SUPPORTED_LANGUAGES {
                println!("{code}\t{name}");
            }
            Ok(())
        }
        Command::Prefs { action } => run_prefs(store.as_ref(), action).await,
    }
}

async fn run_host(config: Config, store: Arc<JsonPreferenceStore>) -> anyhow::Result<()> {
    tracing::info!("Preferences at {}", store.path().display());
    let pipeline = translator::build_pipeline(&config.translator)?;
    let state = Arc::new(AppState::new(config, store));

    let controller = AppController::new(state);
    let mut tasks = controller
        .spawn_tasks(pipeline, io::JsonLinesSurface::stdout())
        .await;
    tasks.spawn(io::input_io(
        BufReader::new(tokio::io::stdin()),
        controller.app_sender(),
        controller.ui_sender(),
        controller.cancel_token(),
    ));

    let cancel = controller.cancel_token();
    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        _ = cancel.cancelled() => {}
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Task exited with error: {:#}", e),
            Err(e) => tracing::error!("Task panicked: {}", e),
        }
    }
    tracing::info!("Host stopped");

    Ok(())
}

async fn run_translate(
    config: Config,
    store: &dyn PreferenceStore,
    args: TranslateArgs,
) -> anyhow::Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            text.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let stored = store.load().await?.resolve(languages::is_supported);
    let request = TranslationRequest::new(
        text,
        args.from.unwrap_or(stored.input_lang),
        args.to.unwrap_or(stored.output_lang),
    );

    let pipeline = translator::build_pipeline(&config.translator)?;
    let translated = pipeline.translate(&request).await.with_context(|| {
        format!(
            "Translation {} -> {} failed",
            request.source_language, request.target_language
        )
    })?;
    println!("{translated}");

    Ok(())
}

async fn run_prefs(store: &dyn PreferenceStore, action: PrefsAction) -> anyhow::Result<()> {
    match action {
        PrefsAction::Show => {
            let stored = store.load().await?;
            let resolved = stored.clone().resolve(languages::is_supported);
            print_pair("input", &stored.input_lang, &resolved.input_lang);
            print_pair("output", &stored.output_lang, &resolved.output_lang);
        }
        PrefsAction::Set { input, output } => {
            let current = store.load().await?;
            let updated = Preferences {
                input_lang: checked_code(input, current.input_lang)?,
                output_lang: checked_code(output, current.output_lang)?,
            };
            store.save(&updated).await?;
            println!("{} -> {}", updated.input_lang, updated.output_lang);
        }
    }

    Ok(())
}

fn print_pair(label: &str, stored: &str, resolved: &str) {
    let name = languages::display_name(resolved).unwrap_or(resolved);
    if stored == resolved {
        println!("{label}\t{resolved}\t{name}");
    } else {
        println!("{label}\t{resolved}\t{name}\t(stored '{stored}' is not supported)");
    }
}

fn checked_code(code: Option<String>, current: String) -> anyhow::Result<String> {
    match code {
        None => Ok(current),
        Some(code) if languages::is_supported(&code) => Ok(code),
        Some(code) => anyhow::bail!("Unsupported language code '{code}', see `textra languages`"),
    }
}

#[cfg(test)]
mod tests;
