// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// ┌────────────── DaleTracker ──────────────┐
// │ Personnes        │ Détail de la sélection│
// │  Ana   $120.00   │  5 indicateurs        │
// │  Beto    $0.00   │  Historique           │
// └──────────────────┴───────────────────────┘
//   [q] Quit  [a] Ajouter  [t] Mouvement ...
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen, StatusLevel};
use crate::models::{Person, Summary, Transaction};
use crate::ui::format::{format_currency, format_timestamp};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le dashboard est toujours dessiné
/// - Seul le footer change selon l'écran
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_main_content(frame, app, chunks[1]);

    match app.current_screen {
        Screen::Dashboard => render_footer(frame, app, chunks[2]),
        Screen::InputMode => render_input_footer(frame, app, chunks[2]),
    }
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(4), // Footer : statut + raccourcis
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" DaleTracker ")
        .title_alignment(Alignment::Center);

    let text = Line::from(Span::styled(
        "🎲 Suivi des soldes Dale",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : liste + détail
// ============================================================================

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    if app.people.is_empty() {
        render_empty(frame, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_people_list(frame, app, columns[0]);

    if let Some(person) = app.selected_person() {
        render_person_detail(frame, person, columns[1]);
    }
}

/// Message d'accueil quand aucune personne n'est enregistrée
fn render_empty(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 👥 Personnes ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Aucune personne enregistrée.",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Appuyez sur [a] pour ajouter une personne et commencer le suivi !",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Couleur d'un gain : vert si positif ou nul, rouge sinon
fn gain_style(value: f64) -> Style {
    if value >= 0.0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Liste des personnes : nom, solde Dale, gain total
fn render_people_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 👥 Personnes ");

    let items: Vec<ListItem> = app
        .people
        .iter()
        .enumerate()
        .map(|(index, person)| {
            let summary = person.summary();
            let line = format!(
                " {:<16} {:>12} {:>12}",
                truncate(person.name(), 16),
                format_currency(person.wallet_balance()),
                format_currency(summary.total_gain)
            );

            let mut style = gain_style(summary.total_gain);
            if index == app.selected_index {
                style = style
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED);
            }

            ListItem::new(line).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Tronque un nom trop long avec une ellipse
fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(max - 1).collect();
        format!("{}…", truncated)
    }
}

/// Détail : indicateurs puis historique (le plus récent en premier)
fn render_person_detail(frame: &mut Frame, person: &Person, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    render_summary(frame, person, &person.summary(), rows[0]);
    render_history(frame, person, rows[1]);
}

fn render_summary(frame: &mut Frame, person: &Person, summary: &Summary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", person.name()));

    let label = Style::default().fg(Color::Gray);
    let row = |name: &'static str, value: f64, style: Style| {
        Line::from(vec![
            Span::styled(format!("{:<22}", name), label),
            Span::styled(format!("{:>14}", format_currency(value)), style),
        ])
    };

    let text = vec![
        row("💳 Total rechargé", summary.total_recharged, Style::default().fg(Color::Blue)),
        row("💵 Total retiré", summary.total_withdrawn, Style::default().fg(Color::Yellow)),
        row("💰 Solde Dale", person.wallet_balance(), Style::default().fg(Color::White)),
        row("📊 Gain retiré", summary.realized_gain, gain_style(summary.realized_gain)),
        row(
            "💎 Gain total",
            summary.total_gain,
            gain_style(summary.total_gain).add_modifier(Modifier::BOLD),
        ),
    ];

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_history(frame: &mut Frame, person: &Person, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 📋 Historique des mouvements ");

    if person.transactions().is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Aucun mouvement",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = person.recent_transactions().map(history_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn history_item(transaction: &Transaction) -> ListItem<'static> {
    let (icon, color) = if transaction.is_recharge() {
        ("💳", Color::Blue)
    } else {
        ("💵", Color::Yellow)
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!(
                " {} {:<9} {:>12}",
                icon,
                transaction.kind.label(),
                format_currency(transaction.amount)
            ),
            Style::default().fg(color),
        ),
        Span::styled(
            format!("   {}", format_timestamp(&transaction.timestamp)),
            Style::default().fg(Color::Gray),
        ),
    ]))
}

// ============================================================================
// Footer : statut + raccourcis
// ============================================================================

fn status_line(app: &App) -> Line<'_> {
    match &app.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                status.text.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(""),
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key),
            Span::raw(" Navigate  "),
            Span::styled("[a]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Ajouter  "),
            Span::styled("[t]", key),
            Span::raw(" Mouvement  "),
            Span::styled("[b]", key),
            Span::raw(" Solde Dale"),
        ])
    };

    let paragraph = Paragraph::new(vec![status_line(app), shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Footer en mode saisie : prompt + buffer + aide
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let prompt = app
        .input_form
        .as_ref()
        .map(|form| form.prompt())
        .unwrap_or_default();

    let input_line = Line::from(vec![
        Span::styled(
            prompt,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let mut help = vec![
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Confirm  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Cancel"),
    ];
    if matches!(
        app.input_form,
        Some(crate::app::InputForm::TransactionAmount { .. })
    ) {
        help.push(Span::styled(
            "  [Tab]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        help.push(Span::raw(" Recharge / Retrait"));
    }

    let lines = match &app.status {
        Some(_) => vec![input_line, status_line(app)],
        None => vec![input_line, Line::from(help)],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
