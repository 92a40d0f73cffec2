//! Configuration types for depth search

use crate::encoding::EncodingStrategy;
use std::time::Duration;

/// How candidate depths are probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Try each depth from the lower bound upwards
    Linear,
    /// Bisect between the lower bound and the node count
    #[default]
    Binary,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Linear => write!(f, "linear"),
            SearchMode::Binary => write!(f, "binary"),
        }
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" | "lin" => Ok(SearchMode::Linear),
            "binary" | "bin" | "bisect" => Ok(SearchMode::Binary),
            _ => Err(format!(
                "Unknown search mode: '{}'. Valid options: linear, binary",
                s
            )),
        }
    }
}

/// Configuration for one synthesis call
#[derive(Debug, Clone, Default)]
pub struct SynthesisConfig {
    /// Constraint encoding used for every probe
    pub strategy: EncodingStrategy,
    /// Linear or binary search over depths
    pub search_mode: SearchMode,
    /// Add symmetry-breaking constraints to every probe
    pub symmetry_breaking: bool,
    /// Timeout for each solver call (None means no timeout)
    pub solver_timeout: Option<Duration>,
}

impl SynthesisConfig {
    pub fn with_strategy(mut self, strategy: EncodingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Shorthand for `with_search_mode(SearchMode::Linear)`
    pub fn linear(self) -> Self {
        self.with_search_mode(SearchMode::Linear)
    }

    pub fn with_solver_timeout(mut self, timeout: Duration) -> Self {
        self.solver_timeout = Some(timeout);
        self
    }

    pub fn with_solver_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.solver_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_from_str() {
        assert_eq!("linear".parse::<SearchMode>().unwrap(), SearchMode::Linear);
        assert_eq!("BINARY".parse::<SearchMode>().unwrap(), SearchMode::Binary);
        assert_eq!("bisect".parse::<SearchMode>().unwrap(), SearchMode::Binary);
        assert!("random".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_search_mode_display() {
        assert_eq!(format!("{}", SearchMode::Linear), "linear");
        assert_eq!(format!("{}", SearchMode::Binary), "binary");
    }

    #[test]
    fn test_defaults() {
        let config = SynthesisConfig::default();
        assert_eq!(config.strategy, EncodingStrategy::EdgeColoring);
        assert_eq!(config.search_mode, SearchMode::Binary);
        assert!(!config.symmetry_breaking);
        assert!(config.solver_timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = SynthesisConfig::default()
            .with_strategy(EncodingStrategy::Scheduling)
            .with_symmetry_breaking(true)
            .linear()
            .with_solver_timeout(Duration::from_secs(2));

        assert_eq!(config.strategy, EncodingStrategy::Scheduling);
        assert_eq!(config.search_mode, SearchMode::Linear);
        assert!(config.symmetry_breaking);
        assert_eq!(config.solver_timeout, Some(Duration::from_secs(2)));
    }
}
