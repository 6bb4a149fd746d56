use crate::commands::{CmdMessage, CmdResult};
use crate::config::FindConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = FindConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FindConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = FindConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            tracing::debug!(%key, %value, dir = %dir.display(), "config updated");

            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::find::FindMode;
    use tempfile::tempdir;

    #[test]
    fn show_all_returns_defaults_without_a_file() {
        let dir = tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(res.config, Some(FindConfig::default()));
    }

    #[test]
    fn set_persists_and_normalizes() {
        let dir = tempdir().unwrap();
        let res = run(
            dir.path(),
            ConfigAction::Set("default-mode".into(), "string".into()),
        )
        .unwrap();
        assert_eq!(res.messages[0].content, "default-mode set to char-phrase");

        let loaded = FindConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_mode, FindMode::CharPhrase);
    }

    #[test]
    fn bad_values_are_reported_not_saved() {
        let dir = tempdir().unwrap();
        let res = run(
            dir.path(),
            ConfigAction::Set("step-budget".into(), "-3".into()),
        )
        .unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_unknown_key() {
        let dir = tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowKey("theme".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
    }
}
