use std::sync::Arc;

use anyhow::Context;
use campus::{
    api::routes,
    assistant::IntentDispatcher,
    cli::{
        chat::{self, ChatConfig, ChatSession},
        init::{self, InitConfig, InitResult},
        output::Output,
        resolve_route, Cli, Commands,
    },
    utils::toml_config::{PortalConfig, PortalConfigManager},
    AppState, SimulatedBackend,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        None | Some(Commands::Serve) => serve(&cli, &output).await,
        Some(Commands::Init {
            path,
            force,
            host,
            port,
            instant,
        }) => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
                instant,
            };
            match init::run(config, &output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
            }
        }
        Some(Commands::Config { full, validate }) => show_config(&cli, full, validate, &output),
        Some(Commands::Chat {
            message,
            name,
            role,
            section,
            no_navigate,
        }) => {
            let auto_navigate = !no_navigate
                && PortalConfig::load(&cli.config)
                    .map(|c| c.assistant.auto_navigate)
                    .unwrap_or(true);
            let mut session = ChatSession::new(
                ChatConfig {
                    display_name: name,
                    role,
                    section,
                    auto_navigate,
                },
                IntentDispatcher::default(),
            );

            match message {
                Some(message) => {
                    session.send(&message, &output);
                }
                None => {
                    output.banner();
                    chat::repl(&mut session, std::io::stdin().lock(), &output)?;
                }
            }
            Ok(())
        }
        Some(Commands::Route {
            section,
            role,
            anonymous,
            public_view,
        }) => {
            let screen =
                resolve_route(&section, role.as_deref(), anonymous, public_view.as_deref());
            output.screen(&screen.id());
            Ok(())
        }
    }
}

fn init_tracing(config: &PortalConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if config.server.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(cli: &Cli, output: &Output) -> anyhow::Result<()> {
    let manager = match PortalConfigManager::new(&cli.config) {
        Ok(manager) => manager,
        Err(e) => {
            output.error(&format!("Failed to load {}: {}", cli.config.display(), e));
            output.hint("Run 'campus-portal init' to create a configuration");
            return Err(e.into());
        }
    };
    let config = manager.config();
    init_tracing(&config, cli.verbose);

    let manager = Arc::new(manager);
    #[cfg(unix)]
    reload_on_hangup(Arc::clone(&manager))?;

    let backend = Arc::new(SimulatedBackend::new(config.backend.latency()));
    let state = AppState::new(manager, backend)
        .map_err(|e| anyhow::anyhow!("failed to build application state: {}", e))?;
    let app = routes::create_app(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Campus Portal listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Campus Portal stopped");
    Ok(())
}

/// `kill -HUP` re-reads the config file. Only assistant settings take effect
/// on reload; the rest is read once at startup.
#[cfg(unix)]
fn reload_on_hangup(manager: Arc<PortalConfigManager>) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).context("failed to listen for SIGHUP")?;
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });
    tokio::spawn(async move { manager.reload_on(rx).await });
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn show_config(cli: &Cli, full: bool, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.header("Configuration");
    output.kv("file", &cli.config.display().to_string());

    let config = match PortalConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            return Err(e.into());
        }
    };
    if validate {
        output.success("Configuration is valid");
    }

    output.kv("listen", &config.server.addr());
    output.kv("log level", &config.server.log_level);
    output.kv("token lifetime", &format!("{}s", config.auth.jwt_access_expiry));
    output.kv(
        "backend latency",
        &format!("x{}", config.backend.latency_scale),
    );
    output.kv(
        "auto navigate",
        &config.assistant.auto_navigate.to_string(),
    );

    if full {
        output.header("Full configuration");
        println!("{}", config.to_toml()?);
    }
    Ok(())
}
