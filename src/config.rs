// ============================================================================
// Configuration
// ============================================================================
// Emplacements du fichier de données et des logs
//
// Ordre de priorité :
// 1. Variables d'environnement DALETRACKER_DATA_FILE / DALETRACKER_LOG_DIR
// 2. Répertoire de données de la plateforme (crate dirs) :
//    - Linux/WSL : ~/.local/share/daletracker/
//    - macOS : ~/Library/Application Support/daletracker/
//    - Windows : C:\Users\<user>\AppData\Local\daletracker\
// 3. Répertoire courant si la plateforme n'en fournit pas
// ============================================================================

use std::env;
use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "DALETRACKER_DATA_FILE";
pub const LOG_DIR_ENV: &str = "DALETRACKER_LOG_DIR";

const APP_DIR: &str = "daletracker";
const DATA_FILE_NAME: &str = "people.json";
const LOG_DIR_NAME: &str = "logs";

/// Chemins utilisés par l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fichier JSON contenant tout le registre
    pub data_file: PathBuf,

    /// Répertoire des fichiers de logs (rotation quotidienne)
    pub log_dir: PathBuf,
}

impl Config {
    /// Lit la configuration depuis l'environnement
    pub fn from_env() -> Self {
        Self::resolve(
            env::var_os(DATA_FILE_ENV).map(PathBuf::from),
            env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            dirs::data_local_dir(),
        )
    }

    /// Combine les surcharges explicites et le répertoire de base
    pub fn resolve(
        data_file: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Self {
        let base = platform_dir
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_file: data_file.unwrap_or_else(|| base.join(DATA_FILE_NAME)),
            log_dir: log_dir.unwrap_or_else(|| base.join(LOG_DIR_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_under_platform_dir() {
        let config = Config::resolve(None, None, Some(PathBuf::from("/home/ana/.local/share")));
        assert_eq!(
            config.data_file,
            PathBuf::from("/home/ana/.local/share/daletracker/people.json")
        );
        assert_eq!(config.log_dir, PathBuf::from("/home/ana/.local/share/daletracker/logs"));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/dale.json")),
            Some(PathBuf::from("/tmp/logs")),
            Some(PathBuf::from("/ignored")),
        );
        assert_eq!(config.data_file, PathBuf::from("/tmp/dale.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        let config = Config::resolve(None, None, None);
        assert_eq!(config.data_file, PathBuf::from("./people.json"));
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }
}
