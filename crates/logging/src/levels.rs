//! crates/logging/src/levels.rs
//! Debug flag categories and their per-category levels.

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Lane scheduling: admissions, advances and completions.
    Sched,
    /// Hash context transitions and rejected submissions.
    Ctx,
    /// Backend detection and provider selection.
    Dispatch,
}

impl DebugFlag {
    /// All flags in declaration order.
    pub const ALL: [Self; 3] = [Self::Sched, Self::Ctx, Self::Dispatch];

    /// Token name used by `--debug`-style flag strings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sched => "sched",
            Self::Ctx => "ctx",
            Self::Dispatch => "dispatch",
        }
    }

    /// Looks up a flag by its token name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Lane scheduling level.
    pub sched: u8,
    /// Hash context level.
    pub ctx: u8,
    /// Backend dispatch level.
    pub dispatch: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Sched => self.sched,
            DebugFlag::Ctx => self.ctx,
            DebugFlag::Dispatch => self.dispatch,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Sched => self.sched = level,
            DebugFlag::Ctx => self.ctx = level,
            DebugFlag::Dispatch => self.dispatch = level,
        }
    }

    /// Set all flags to the specified level.
    pub const fn set_all(&mut self, level: u8) {
        self.sched = level;
        self.ctx = level;
        self.dispatch = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod debug_flag_tests {
        use super::*;

        #[test]
        fn names_round_trip() {
            for flag in DebugFlag::ALL {
                assert_eq!(DebugFlag::from_name(flag.name()), Some(flag));
            }
            assert_eq!(DebugFlag::from_name("recv"), None);
            assert_eq!(DebugFlag::from_name(""), None);
        }

        #[test]
        fn debug_format_uses_variant_name() {
            assert_eq!(format!("{:?}", DebugFlag::Sched), "Sched");
            assert_eq!(format!("{:?}", DebugFlag::Dispatch), "Dispatch");
        }
    }

    mod debug_levels_tests {
        use super::*;

        #[test]
        fn default_debug_levels_are_zero() {
            let levels = DebugLevels::default();
            for flag in DebugFlag::ALL {
                assert_eq!(levels.get(flag), 0);
            }
        }

        #[test]
        fn set_updates_only_the_named_flag() {
            let mut levels = DebugLevels::default();
            levels.set(DebugFlag::Ctx, 3);
            assert_eq!(levels.ctx, 3);
            assert_eq!(levels.sched, 0);
            assert_eq!(levels.dispatch, 0);
            assert_eq!(levels.get(DebugFlag::Ctx), 3);
        }

        #[test]
        fn set_all_updates_all_levels() {
            let mut levels = DebugLevels::default();
            levels.set_all(2);
            assert_eq!(levels, DebugLevels { sched: 2, ctx: 2, dispatch: 2 });
        }
    }
}
