// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état de l'interface TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état de l'interface dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Séparation : App ne modifie JAMAIS le registre, elle produit des Command
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - App garde une copie (snapshot) des personnes, rafraîchie après chaque commande
// ============================================================================

use crate::commands::{Command, Outcome};
use crate::error::LedgerError;
use crate::input::{parse_amount, parse_balance, parse_initial_balance, parse_name};
use crate::models::{Person, PersonId, TransactionKind};
use crate::ui::format::format_currency;

/// Nombre de ticks (~250ms) pendant lesquels un message reste affiché
const STATUS_TICKS: u16 = 16;

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : liste des personnes + détail de la sélection
    Dashboard,

    /// Mode saisie : un formulaire capture le texte tapé
    InputMode,
}

/// Formulaire en cours de saisie
///
/// CONCEPT : Formulaire en plusieurs étapes
/// - L'ajout d'une personne demande d'abord le nom, puis le solde initial
/// - Chaque variant transporte ce qui a déjà été saisi
#[derive(Debug, Clone, PartialEq)]
pub enum InputForm {
    PersonName,
    InitialBalance { name: String },
    TransactionAmount {
        person_id: PersonId,
        kind: TransactionKind,
    },
    WalletBalance { person_id: PersonId },
}

impl InputForm {
    /// Texte affiché devant la zone de saisie
    pub fn prompt(&self) -> String {
        match self {
            InputForm::PersonName => "Nom : ".to_string(),
            InputForm::InitialBalance { name } => format!("Solde Dale initial de {} : ", name),
            InputForm::TransactionAmount { kind, .. } => format!("Montant ({}) : ", kind.label()),
            InputForm::WalletBalance { .. } => "Nouveau solde Dale : ".to_string(),
        }
    }

    /// Vrai si le formulaire attend un nombre
    pub fn is_numeric(&self) -> bool {
        !matches!(self, InputForm::PersonName)
    }
}

/// Gravité d'un message de statut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Message affiché dans le footer (confirmation ou rejet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    ticks_left: u16,
}

/// État principal de l'interface
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Copie des personnes du registre, dans l'ordre de création
    pub people: Vec<Person>,

    /// Index de la personne sélectionnée
    pub selected_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit : première pression de 'q' → confirm_quit = true
    pub confirm_quit: bool,

    /// Formulaire actif en mode saisie
    pub input_form: Option<InputForm>,

    /// Buffer de saisie pour le mode Input
    pub input_buffer: String,

    /// Dernier message de statut
    pub status: Option<StatusMessage>,
}

impl App {
    /// Crée une App sans personne
    pub fn new() -> Self {
        Self::with_people(Vec::new())
    }

    /// Crée une App à partir du registre chargé
    pub fn with_people(people: Vec<Person>) -> Self {
        Self {
            running: true,
            people,
            selected_index: 0,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            input_form: None,
            input_buffer: String::new(),
            status: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : fait expirer le message de statut
    pub fn tick(&mut self) {
        if let Some(status) = &mut self.status {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
            }
        }
    }

    // ========================================================================
    // Données
    // ========================================================================

    /// Remplace la copie des personnes après une commande
    ///
    /// CONCEPT RUST : min() pour garder un index valide
    pub fn refresh(&mut self, people: Vec<Person>) {
        self.people = people;
        let max_index = self.people.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    /// Sélectionne une personne par identifiant (ex: juste après l'ajout)
    pub fn select_person(&mut self, person_id: &PersonId) {
        if let Some(index) = self.people.iter().position(|p| p.id() == person_id) {
            self.selected_index = index;
        }
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.people.get(self.selected_index)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.people.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    // ========================================================================
    // Quit Confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusLevel::Info);
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusLevel::Error);
    }

    fn set_status(&mut self, text: String, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text,
            level,
            ticks_left: STATUS_TICKS,
        });
    }

    /// Message de confirmation pour une commande acceptée
    pub fn report_outcome(&mut self, outcome: &Outcome) {
        let text = match outcome {
            Outcome::PersonAdded(person) => format!("✓ {} ajouté(e)", person.name()),
            Outcome::TransactionRecorded { transaction, .. } => format!(
                "✓ {} de {} enregistré(e)",
                transaction.kind.label(),
                format_currency(transaction.amount)
            ),
            Outcome::WalletBalanceSet { balance, .. } => {
                format!("✓ Solde Dale mis à jour : {}", format_currency(*balance))
            }
        };
        self.set_info(text);
    }

    /// Avis de rejet pour une commande refusée
    pub fn report_error(&mut self, error: &LedgerError) {
        let text = match error {
            LedgerError::InvalidAmount(_) => "❌ Veuillez saisir un montant valide".to_string(),
            LedgerError::InvalidName => "❌ Veuillez saisir un nom".to_string(),
            LedgerError::PersonNotFound(_) => "❌ Cette personne n'existe plus".to_string(),
        };
        self.set_error(text);
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Ouvre le formulaire d'ajout de personne
    pub fn start_add_person(&mut self) {
        self.start_input(InputForm::PersonName, String::new());
    }

    /// Ouvre le formulaire de mouvement pour la personne sélectionnée
    ///
    /// Recharge par défaut, Tab bascule vers Retrait.
    pub fn start_transaction(&mut self) {
        let Some(person_id) = self.selected_person().map(|p| p.id().clone()) else {
            self.set_error("❌ Ajoutez d'abord une personne");
            return;
        };
        self.start_input(
            InputForm::TransactionAmount {
                person_id,
                kind: TransactionKind::default(),
            },
            String::new(),
        );
    }

    /// Ouvre le formulaire de mise à jour du solde, prérempli avec le solde actuel
    pub fn start_wallet_update(&mut self) {
        let Some((person_id, balance)) = self
            .selected_person()
            .map(|p| (p.id().clone(), p.wallet_balance()))
        else {
            self.set_error("❌ Ajoutez d'abord une personne");
            return;
        };
        self.start_input(InputForm::WalletBalance { person_id }, balance.to_string());
    }

    fn start_input(&mut self, form: InputForm, initial: String) {
        self.current_screen = Screen::InputMode;
        self.input_form = Some(form);
        self.input_buffer = initial;
    }

    /// Annule la saisie et retourne au dashboard
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.input_form = None;
        self.input_buffer.clear();
    }

    /// Bascule Recharge ↔ Retrait dans le formulaire de mouvement
    pub fn toggle_transaction_kind(&mut self) {
        if let Some(InputForm::TransactionAmount { kind, .. }) = &mut self.input_form {
            *kind = kind.toggle();
        }
    }

    /// Ajoute un caractère au buffer si le formulaire l'accepte
    pub fn append_char(&mut self, c: char) {
        let accepted = match &self.input_form {
            Some(form) if form.is_numeric() => c.is_ascii_digit() || c == '.' || c == '-',
            Some(_) => !c.is_control(),
            None => false,
        };
        if accepted {
            self.input_buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Valide le formulaire courant
    ///
    /// CONCEPT : Validation avant commande
    /// - Saisie invalide : message d'erreur, le formulaire reste ouvert
    /// - Étape intermédiaire (nom → solde initial) : None, on continue
    /// - Formulaire complet : Some(Command) à exécuter par le repository
    pub fn submit_input(&mut self) -> Option<Command> {
        let form = self.input_form.clone()?;
        let raw = self.input_buffer.clone();

        let parsed = match form {
            InputForm::PersonName => match parse_name(&raw) {
                Ok(name) => {
                    self.start_input(InputForm::InitialBalance { name }, "0".to_string());
                    return None;
                }
                Err(e) => Err(e),
            },
            InputForm::InitialBalance { name } => Ok(Command::AddPerson {
                name,
                initial_balance: parse_initial_balance(&raw),
            }),
            InputForm::TransactionAmount { person_id, kind } => {
                parse_amount(&raw).map(|amount| Command::RecordTransaction {
                    person_id,
                    kind,
                    amount,
                })
            }
            InputForm::WalletBalance { person_id } => {
                parse_balance(&raw).map(|new_balance| Command::SetWalletBalance {
                    person_id,
                    new_balance,
                })
            }
        };

        match parsed {
            Ok(command) => {
                self.cancel_input();
                Some(command)
            }
            Err(e) => {
                self.report_error(&e);
                None
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Person> {
        vec![
            Person::new(PersonId::from("a"), "Ana".to_string(), 100.0),
            Person::new(PersonId::from("b"), "Beto".to_string(), 0.0),
            Person::new(PersonId::from("c"), "Caro".to_string(), 5.5),
        ]
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.append_char(c);
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.people.is_empty());
        assert!(app.selected_person().is_none());
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_navigation() {
        let mut app = App::with_people(people());

        app.navigate_down();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        assert_eq!(app.selected_person().unwrap().name(), "Beto");

        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_refresh_clamps_selection() {
        let mut app = App::with_people(people());
        app.selected_index = 2;
        app.refresh(people().into_iter().take(1).collect());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_person_flow() {
        let mut app = App::new();
        app.start_add_person();
        assert!(app.is_in_input_mode());

        type_text(&mut app, "  Ana ");
        assert_eq!(app.submit_input(), None);
        assert_eq!(
            app.input_form,
            Some(InputForm::InitialBalance {
                name: "Ana".to_string()
            })
        );
        assert_eq!(app.input_buffer, "0");

        app.backspace();
        type_text(&mut app, "100");

        assert_eq!(
            app.submit_input(),
            Some(Command::AddPerson {
                name: "Ana".to_string(),
                initial_balance: 100.0
            })
        );
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_empty_name_keeps_form_open() {
        let mut app = App::new();
        app.start_add_person();
        type_text(&mut app, "   ");

        assert_eq!(app.submit_input(), None);
        assert_eq!(app.input_form, Some(InputForm::PersonName));
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
    }

    #[test]
    fn test_transaction_flow_with_toggle() {
        let mut app = App::with_people(people());
        app.navigate_down();
        app.start_transaction();
        app.toggle_transaction_kind();
        type_text(&mut app, "30");

        assert_eq!(
            app.submit_input(),
            Some(Command::RecordTransaction {
                person_id: PersonId::from("b"),
                kind: TransactionKind::Withdrawal,
                amount: 30.0
            })
        );
    }

    #[test]
    fn test_invalid_amount_keeps_form_open() {
        let mut app = App::with_people(people());
        app.start_transaction();
        type_text(&mut app, "0");

        assert_eq!(app.submit_input(), None);
        assert!(app.is_in_input_mode());
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
    }

    #[test]
    fn test_numeric_forms_filter_characters() {
        let mut app = App::with_people(people());
        app.start_transaction();
        type_text(&mut app, "1a2.5x");
        assert_eq!(app.input_buffer, "12.5");
    }

    #[test]
    fn test_wallet_update_is_prefilled() {
        let mut app = App::with_people(people());
        app.navigate_down();
        app.navigate_down();
        app.start_wallet_update();
        assert_eq!(app.input_buffer, "5.5");

        app.input_buffer = "-1".to_string();
        assert_eq!(app.submit_input(), None);

        app.input_buffer = "7".to_string();
        assert_eq!(
            app.submit_input(),
            Some(Command::SetWalletBalance {
                person_id: PersonId::from("c"),
                new_balance: 7.0
            })
        );
    }

    #[test]
    fn test_transaction_without_people_is_refused() {
        let mut app = App::new();
        app.start_transaction();
        assert!(app.is_on_dashboard());
        assert_eq!(app.status.as_ref().unwrap().level, StatusLevel::Error);
    }

    #[test]
    fn test_status_expires() {
        let mut app = App::new();
        app.set_info("ok");
        for _ in 0..STATUS_TICKS {
            app.tick();
        }
        assert!(app.status.is_none());
    }
}
