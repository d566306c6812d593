use crate::error::{Error, Result};
use crate::experiment::ExperimentConfig;
use glob::Pattern;

/// Query experiments by glob patterns (OR logic)
///
/// Returns experiments whose name matches any of the provided patterns.
/// An empty pattern list returns every experiment.
pub fn query_experiments(config: &ExperimentConfig, patterns: &[&str]) -> Result<ExperimentConfig> {
    // Compile all patterns first to fail fast on invalid patterns
    let compiled_patterns: Vec<Pattern> = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::InvalidGlobPattern(format!("'{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    if compiled_patterns.is_empty() {
        return Ok(config.clone());
    }

    let queried = config
        .iter()
        .filter(|(name, _)| compiled_patterns.iter().any(|pattern| pattern.matches(name)))
        .map(|(name, experiment)| (name.clone(), experiment.clone()))
        .collect();

    Ok(queried)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Experiment;

    fn create_test_config() -> ExperimentConfig {
        let mut config = ExperimentConfig::new();
        config.insert("onboarding-v2", Experiment::new(true));
        config.insert("onboarding-tour", Experiment::new(false));
        config.insert("reader-mode", Experiment::new(true));
        config.insert("search-suggestions", Experiment::new(false));
        config
    }

    #[test]
    fn test_query_single_pattern() {
        let config = create_test_config();
        let queried = query_experiments(&config, &["onboarding-*"]).unwrap();
        assert_eq!(queried.len(), 2);
        assert!(queried.get("onboarding-v2").is_some());
        assert!(queried.get("onboarding-tour").is_some());
    }

    #[test]
    fn test_query_multiple_patterns_or_logic() {
        let config = create_test_config();
        let queried = query_experiments(&config, &["onboarding-*", "reader-mode"]).unwrap();
        assert_eq!(queried.len(), 3);
        assert!(queried.is_active("reader-mode"));
    }

    #[test]
    fn test_query_no_matches() {
        let config = create_test_config();
        let queried = query_experiments(&config, &["nonexistent-*"]).unwrap();
        assert!(queried.is_empty());
    }

    #[test]
    fn test_query_no_patterns_keeps_everything() {
        let config = create_test_config();
        let queried = query_experiments(&config, &[]).unwrap();
        assert_eq!(queried, config);
    }

    #[test]
    fn test_query_invalid_pattern() {
        let config = create_test_config();
        let result = query_experiments(&config, &["[invalid"]);
        assert!(matches!(result, Err(Error::InvalidGlobPattern(_))));
    }
}
