// ============================================================================
// lazyfx - Convertisseur de devises en TUI
// ============================================================================
// Charge le catalogue des devises, puis lance la boucle TUI :
// rendu -> lecture d'un événement -> mise à jour de l'état
//
// Tout se passe sur un seul thread : les appels à l'API bloquent l'interface
// le temps de la requête (timeout de 5s).
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyfx::api::HttpRateFetcher;
use lazyfx::app::handler::handle_event;
use lazyfx::app::{App, Notification};
use lazyfx::catalog::load_catalog;
use lazyfx::config::Config;
use lazyfx::conversion::ConversionService;
use lazyfx::ui::{render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier, avec rotation quotidienne.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans `config.log_dir` (voir Config), ex:
/// ~/.local/share/lazyfx/logs/lazyfx.log.2026-10-17
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazyfx/logs/lazyfx.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazyfx=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = &config.log_dir;
    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazyfx.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazyfx, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyfx=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::default();

    // Si le logging échoue, on continue sans
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {e:#}");
        eprintln!("   Continuing without logging...");
    });

    info!(api = %config.api_base_url, "lazyfx starting up");
    println!("💱 Chargement des devises...");

    // Le catalogue est chargé avant d'entrer dans le TUI ;
    // une erreur éventuelle est affichée une fois l'interface prête
    let fetcher = HttpRateFetcher::new(&config)?;
    let (currencies, catalog_error) = load_catalog(&fetcher, &config).into_parts();

    let service = ConversionService::new(Box::new(fetcher));
    let mut app = App::new(currencies, service, &config);

    if let Some(e) = &catalog_error {
        app.notify(Notification::from(e));
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!(conversions = app.session.history.len(), "Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================

/// Exécute la boucle principale : rendu puis traitement d'un événement
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next().context("Échec de la lecture des événements")?;
        handle_event(app, event);
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + écran alternatif)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
