//! Configuration constants and utilities for beershell
//!
//! Defaults of the command line, plus the lookup of the localization
//! directory: command line first, then environment, then the default path.

/// Default root of the localization files
pub const DEFAULT_I18N_PATH: &str = "~/.beershell/i18n";

/// Environment variable name for overriding the localization root
pub const I18N_PATH_ENV_VAR: &str = "BEERSHELL_I18N_PATH";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "BEERSHELL_LOG_LEVEL";

/// File read inside `<i18n root>/<language>/`
pub const I18N_FILE: &str = "shell.ini";

pub const DEFAULT_LANGUAGE: &str = "en";

pub const DEFAULT_TITLE: &str = "beer";

/// Layout width of shell output
pub const DEFAULT_WIDTH: usize = 79;

/// Get the localization root, with `~` expanded
pub fn get_i18n_path(override_path: Option<&str>) -> String {
    let path = override_path.map(str::to_string).unwrap_or_else(|| {
        std::env::var_os(I18N_PATH_ENV_VAR)
            .and_then(|val| val.into_string().ok())
            .unwrap_or_else(|| DEFAULT_I18N_PATH.to_string())
    });
    shellexpand::tilde(&path).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_names() {
        assert_eq!(I18N_PATH_ENV_VAR, "BEERSHELL_I18N_PATH");
        assert_eq!(LOG_LEVEL_ENV_VAR, "BEERSHELL_LOG_LEVEL");
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(get_i18n_path(Some("/opt/i18n")), "/opt/i18n");
    }

    #[test]
    fn test_get_i18n_path_env_then_default() {
        // Save current env var state
        let original = std::env::var_os(I18N_PATH_ENV_VAR);

        std::env::set_var(I18N_PATH_ENV_VAR, "/custom/i18n");
        assert_eq!(get_i18n_path(None), "/custom/i18n");

        std::env::remove_var(I18N_PATH_ENV_VAR);
        assert_eq!(
            get_i18n_path(None),
            shellexpand::tilde(DEFAULT_I18N_PATH).into_owned()
        );

        // Restore original state
        match original {
            Some(val) => std::env::set_var(I18N_PATH_ENV_VAR, val),
            None => std::env::remove_var(I18N_PATH_ENV_VAR),
        }
    }
}
