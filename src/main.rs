// ============================================================================
// DaleTracker - Programme TUI
// ============================================================================
// Suivi des soldes Dale : une ligne par personne, recharges / retraits,
// gain retiré et gain total. Les données sont gardées dans un fichier JSON.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements, commandes et rendering
// 3. Frontière d'écriture explicite : flush() après chaque commande acceptée
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use daletracker::app::App;
use daletracker::config::Config;
use daletracker::storage::{JsonFileStore, LedgerStore};
use daletracker::ui::{events::EventHandler, render};
use daletracker::{Command, LedgerRepository};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/daletracker/logs/daletracker.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=daletracker=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.log_dir)
        .context("Échec de la création du répertoire de logs")?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, config.log_dir.clone(), "daletracker.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daletracker=debug,info".into()),
        )
        .init();

    info!(log_dir = ?config.log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(data_file = ?config.data_file, "DaleTracker starting up");

    // Un fichier illisible arrête le programme AVANT le TUI :
    // on ne risque pas d'écraser des données qu'on n'a pas su lire.
    let store = JsonFileStore::new(&config.data_file);
    let mut repository = LedgerRepository::open(store).with_context(|| {
        format!(
            "Impossible de charger les données depuis {}",
            config.data_file.display()
        )
    })?;

    let mut app = App::with_people(repository.ledger().people().to_vec());

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &mut repository, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Dernière chance d'écrire ce qui n'a pas pu l'être pendant la session
    if let Err(e) = repository.flush() {
        error!(error = ?e, "Final flush failed");
        eprintln!("❌ Échec de la sauvegarde : {}", e);
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Dessiner l'interface (render)
//   2. Traiter l'événement (input) → éventuellement une Command
//   3. Exécuter la Command, flush, rafraîchir la copie de l'App
//   4. Mettre à jour l'état (tick)
// ============================================================================

fn run<S: LedgerStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    repository: &mut LedgerRepository<S>,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => {
                if let Some(command) = handle_event(app, event) {
                    apply_command(app, repository, command);
                }
            }
            Err(e) => {
                error!(error = ?e, "Failed to read terminal event");
            }
        }

        app.tick();
    }

    Ok(())
}

/// Exécute une commande puis sauvegarde tout le registre
///
/// CONCEPT : read-modify-write complet
/// - Chaque commande acceptée est suivie d'un flush
/// - La copie affichée est rafraîchie depuis le registre
fn apply_command<S: LedgerStore>(
    app: &mut App,
    repository: &mut LedgerRepository<S>,
    command: Command,
) {
    match repository.execute(command) {
        Ok(outcome) => {
            app.refresh(repository.ledger().people().to_vec());
            app.select_person(outcome.person_id());
            app.report_outcome(&outcome);

            if let Err(e) = repository.flush() {
                error!(error = ?e, "Failed to save ledger");
                app.set_error(format!("❌ Échec de la sauvegarde : {}", e));
            }
        }
        Err(e) => app.report_error(&e),
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'interface
///
/// Retourne une Command quand un formulaire est complet.
fn handle_event(app: &mut App, event: daletracker::ui::events::Event) -> Option<Command> {
    use daletracker::ui::events::{
        get_char_from_event, is_add_person_event, is_backspace_event, is_down_event,
        is_enter_event, is_escape_event, is_quit_event, is_toggle_kind_event,
        is_transaction_event, is_up_event, is_wallet_event, Event,
    };

    match event {
        // ========================================
        // Input Mode : Gestion de la saisie
        // ========================================
        Event::Key(_) if app.is_in_input_mode() => {
            if is_escape_event(&event) {
                info!("User cancelled input");
                app.cancel_input();
            } else if is_enter_event(&event) {
                return app.submit_input();
            } else if is_backspace_event(&event) {
                app.backspace();
            } else if is_toggle_kind_event(&event) {
                app.toggle_transaction_kind();
            } else if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_add_person_event(&event) => {
            app.cancel_quit();
            info!("User requested add person");
            app.start_add_person();
        }

        Event::Key(_) if is_transaction_event(&event) => {
            app.cancel_quit();
            info!("User requested new transaction");
            app.start_transaction();
        }

        Event::Key(_) if is_wallet_event(&event) => {
            app.cancel_quit();
            info!("User requested wallet balance update");
            app.start_wallet_update();
        }

        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.navigate_up();
        }

        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.navigate_down();
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick => {}
    }

    None
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
