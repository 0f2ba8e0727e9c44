//! Filesystem locations for configuration and trace output.
//!
//! Paths follow the XDG layout on Unix-like systems: configuration under
//! `$XDG_CONFIG_HOME/blogsearch` and data (trace files) under
//! `$XDG_DATA_HOME/blogsearch`, falling back to `~/.config` and
//! `~/.local/share` when the variables are unset.

use std::path::PathBuf;

/// Application directory name below the XDG base directories.
const APP_DIR: &str = "blogsearch";

/// Returns the user's home directory from `$HOME`, if set.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or a tilde when `$HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use blogsearch::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/log/x.json"), PathBuf::from("/var/log/x.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Directory for trace files and other generated data.
#[must_use]
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join(APP_DIR)
}

/// Default location of the TOML configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join(APP_DIR)
        .join("config.toml")
}

fn xdg_dir(variable: &str, fallback: &str) -> PathBuf {
    std::env::var_os(variable)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from(".").join(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_tilde_paths_are_untouched() {
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }

    #[test]
    fn tilde_expands_under_home() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/traces/a.json"), home.join("traces/a.json"));
    }

    #[test]
    fn default_paths_end_with_app_dir() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(default_config_path().ends_with("blogsearch/config.toml"));
    }
}
