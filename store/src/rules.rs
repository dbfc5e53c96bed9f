use duosweep_core::Rules;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::*;

/// Parses rules from TOML. Missing top-level keys and whole profile tables keep their default values.
///
/// ```toml
/// max_lives = 12
/// reveal_scoring = "RootOnly"
///
/// [hard]
/// rows = 16
/// cols = 30
/// mines = 99
/// lives = 5
/// surprise_cost = 15
/// surprise_bonus = 20
/// points_per_life = 15
/// ```
pub fn rules_from_toml(text: &str) -> Result<Rules> {
    let rules: Rules = toml::from_str(text)?;
    rules.validate()?;
    Ok(rules)
}

/// Loads rules from a TOML file, falling back to the defaults when the file does not exist.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Rules> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => {
            log::debug!("Loading rules from {}", path.display());
            rules_from_toml(&text)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("No rules file at {}, using defaults", path.display());
            Ok(Rules::default())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duosweep_core::{DifficultyProfile, GameError, RevealScoring};

    #[test]
    fn empty_document_is_the_default_rules() {
        assert_eq!(rules_from_toml("").unwrap(), Rules::default());
    }

    #[test]
    fn overrides_top_level_values_and_profiles() {
        let rules = rules_from_toml(
            r#"
            max_lives = 12
            reveal_scoring = "RootOnly"

            [medium]
            rows = 12
            cols = 12
            mines = 20
            lives = 7
            surprise_cost = 8
            surprise_bonus = 12
            points_per_life = 8
            "#,
        )
        .unwrap();

        assert_eq!(rules.max_lives, 12);
        assert_eq!(rules.reveal_scoring, RevealScoring::RootOnly);
        assert_eq!(rules.medium.mines, 20);
        assert_eq!(rules.easy, DifficultyProfile::EASY);
        assert_eq!(rules.flag_safe_penalty, 3);
    }

    #[test]
    fn impossible_board_is_rejected() {
        let err = rules_from_toml(
            r#"
            [easy]
            rows = 2
            cols = 2
            mines = 4
            lives = 10
            surprise_cost = 5
            surprise_bonus = 8
            points_per_life = 5
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, StoreError::Rules(GameError::TooManyMines)));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(rules_from_toml("max_lives = ["), Err(StoreError::Toml(_))));
    }

    #[test]
    fn missing_file_uses_defaults() {
        assert_eq!(load_rules(temp_path("missing-rules.toml")).unwrap(), Rules::default());
    }

    #[test]
    fn loads_rules_from_file() {
        let path = temp_path("rules.toml");
        fs::write(&path, "flag_mine_reward = 2\n").unwrap();

        assert_eq!(load_rules(&path).unwrap().flag_mine_reward, 2);
        let _ = fs::remove_file(&path);
    }
}
