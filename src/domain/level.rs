use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEBUG_RANK: u8 = 20;
pub const INFO_RANK: u8 = 30;
pub const WARN_RANK: u8 = 40;
pub const ERROR_RANK: u8 = 50;
pub const FATAL_RANK: u8 = 60;
/// One rank above `Fatal`: no leveled call can reach it, so nothing is emitted.
pub const SILENT_RANK: u8 = FATAL_RANK + 1;

/// Name of the process-wide variable consulted when no explicit level is given.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Severity of a log call, or the effective minimum severity of a logger.
///
/// Ordering follows the numeric rank, so `Level::Warn > Level::Info`.
/// `Silent` is only meaningful as a logger level; there is no silent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    Silent,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Silent,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            Level::Debug => DEBUG_RANK,
            Level::Info => INFO_RANK,
            Level::Warn => WARN_RANK,
            Level::Error => ERROR_RANK,
            Level::Fatal => FATAL_RANK,
            Level::Silent => SILENT_RANK,
        }
    }

    /// Inverse of [`Level::rank`].
    ///
    /// A rank without a label means the level table itself is broken, so this
    /// is reported as [`LoggerError::UnmappedLevel`] rather than treated as input.
    pub fn from_rank(rank: u8) -> Result<Self, LoggerError> {
        match rank {
            DEBUG_RANK => Ok(Level::Debug),
            INFO_RANK => Ok(Level::Info),
            WARN_RANK => Ok(Level::Warn),
            ERROR_RANK => Ok(Level::Error),
            FATAL_RANK => Ok(Level::Fatal),
            SILENT_RANK => Ok(Level::Silent),
            other => Err(LoggerError::UnmappedLevel(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Silent => "silent",
        }
    }

    /// Exact-match lookup of a canonical label. Anything else counts as absent.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == label)
    }

    /// Whether a call at `self` passes a logger configured at `threshold`.
    pub fn passes(self, threshold: Level) -> bool {
        self != Level::Silent && self.rank() >= threshold.rank()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| LoggerError::Config(format!("unknown log level '{s}'")))
    }
}

fn label_to_rank(label: Option<&str>) -> Option<u8> {
    let label = label?;
    let rank = Level::parse(label).map(Level::rank);
    if rank.is_none() {
        tracing::debug!(label, "ignoring unrecognized log level");
    }
    rank
}

/// Resolves the effective level of a logger.
///
/// Precedence is `explicit`, then `env`, then [`Level::Info`]. Unrecognized
/// strings fall through to the next tier.
pub fn resolve_level(explicit: Option<&str>, env: Option<&str>) -> Result<Level, LoggerError> {
    let rank = label_to_rank(explicit)
        .or_else(|| label_to_rank(env))
        .unwrap_or(Level::default().rank());

    Level::from_rank(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_match_wire_values() {
        assert_eq!(Level::Debug.rank(), 20);
        assert_eq!(Level::Info.rank(), 30);
        assert_eq!(Level::Warn.rank(), 40);
        assert_eq!(Level::Error.rank(), 50);
        assert_eq!(Level::Fatal.rank(), 60);
        assert_eq!(Level::Silent.rank(), 61);
    }

    #[test]
    fn test_rank_is_invertible() {
        for level in Level::ALL {
            assert_eq!(Level::from_rank(level.rank()).unwrap(), level);
        }
    }

    #[test]
    fn test_unmapped_rank_is_an_error() {
        let err = Level::from_rank(35).unwrap_err();
        assert!(matches!(err, LoggerError::UnmappedLevel(35)));
        assert!(err.to_string().contains("35"));
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Level::parse("warn"), Some(Level::Warn));
        assert_eq!(Level::parse("silent"), Some(Level::Silent));
        assert_eq!(Level::parse("WARN"), None);
        assert_eq!(Level::parse("warning"), None);
        assert_eq!(Level::parse(""), None);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(resolve_level(None, None).unwrap(), Level::Info);
        assert_eq!(resolve_level(None, Some("warn")).unwrap(), Level::Warn);
        assert_eq!(resolve_level(Some("debug"), Some("warn")).unwrap(), Level::Debug);
        assert_eq!(resolve_level(Some("silent"), None).unwrap(), Level::Silent);
    }

    #[test]
    fn test_resolve_falls_through_unknown_labels() {
        assert_eq!(resolve_level(Some("loud"), Some("error")).unwrap(), Level::Error);
        assert_eq!(resolve_level(Some("loud"), Some("quiet")).unwrap(), Level::Info);
        assert_eq!(resolve_level(None, Some("")).unwrap(), Level::Info);
    }

    #[test]
    fn test_silent_blocks_every_call_level() {
        for level in Level::ALL {
            assert!(!level.passes(Level::Silent), "{level} passed silent");
        }
    }

    #[test]
    fn test_passes_by_rank() {
        assert!(Level::Info.passes(Level::Info));
        assert!(Level::Fatal.passes(Level::Debug));
        assert!(!Level::Debug.passes(Level::Info));
        assert!(!Level::Error.passes(Level::Fatal));
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        assert_eq!(serde_json::to_string(&Level::Fatal).unwrap(), "\"fatal\"");
        let level: Level = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, Level::Debug);
    }
}
