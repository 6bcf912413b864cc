//! crates/logging/src/config.rs
//! Verbosity configuration for the debug categories.

use super::levels::{DebugFlag, DebugLevels};

/// Verbosity configuration consulted by [`debug_log!`](crate::debug_log).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Per-category debug levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a configuration from a single verbose level.
    ///
    /// Level 1 reports backend selection, level 2 adds context transitions
    /// and per-advance scheduling, and level 3 or higher enables everything
    /// at full detail.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.debug.dispatch = 1;
            }
            2 => {
                config.debug.dispatch = 1;
                config.debug.ctx = 1;
                config.debug.sched = 1;
            }
            _ => {
                config.debug.set_all(2);
            }
        }

        config
    }

    /// Apply a single debug flag token (e.g., "sched2", "ctx", "all").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag =
            DebugFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "sched2" into ("sched", 2) or "ctx" into ("ctx", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let (name, level_str) = token.split_at(pos);
            let level = level_str
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_tokens_split_name_and_level() {
        assert_eq!(parse_flag_token("sched").unwrap(), ("sched", 1));
        assert_eq!(parse_flag_token("sched2").unwrap(), ("sched", 2));
        assert_eq!(parse_flag_token("dispatch10").unwrap(), ("dispatch", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("3").is_err());
        assert!(parse_flag_token("ctx2x").is_err());
        assert!(parse_flag_token("ctx999").is_err());
    }

    #[test]
    fn tokens_set_single_categories() {
        let mut config = VerbosityConfig::default();

        config.apply_debug_flag("sched").unwrap();
        assert_eq!(config.debug.sched, 1);

        config.apply_debug_flag("sched2").unwrap();
        assert_eq!(config.debug.sched, 2);

        config.apply_debug_flag("ctx3").unwrap();
        assert_eq!(config.debug.ctx, 3);
        assert_eq!(config.debug.dispatch, 0);

        assert!(config.apply_debug_flag("recv").is_err());
    }

    #[test]
    fn all_token_sets_every_category() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("all2").unwrap();
        assert_eq!(config.debug.sched, 2);
        assert_eq!(config.debug.ctx, 2);
        assert_eq!(config.debug.dispatch, 2);

        config.apply_debug_flag("all0").unwrap();
        assert_eq!(config, VerbosityConfig::default());
    }

    #[test]
    fn verbose_levels_enable_categories_progressively() {
        assert_eq!(VerbosityConfig::from_verbose_level(0), VerbosityConfig::default());

        let one = VerbosityConfig::from_verbose_level(1);
        assert_eq!(one.debug.dispatch, 1);
        assert_eq!(one.debug.sched, 0);

        let two = VerbosityConfig::from_verbose_level(2);
        assert_eq!(two.debug.sched, 1);
        assert_eq!(two.debug.ctx, 1);

        let high = VerbosityConfig::from_verbose_level(9);
        assert_eq!(high.debug.sched, 2);
        assert_eq!(high.debug.ctx, 2);
        assert_eq!(high.debug.dispatch, 2);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn verbosity_config_survives_json() {
            let mut config = VerbosityConfig::default();
            config.debug.sched = 2;
            config.debug.ctx = 1;

            let json = serde_json::to_string(&config).unwrap();
            let back: VerbosityConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(back, config);
        }

        #[test]
        fn debug_flags_serialize_by_variant() {
            let json = serde_json::to_string(&DebugFlag::Dispatch).unwrap();
            assert_eq!(json, "\"Dispatch\"");
            let back: DebugFlag = serde_json::from_str(&json).unwrap();
            assert_eq!(back, DebugFlag::Dispatch);
        }
    }
}
