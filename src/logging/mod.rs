//! Structured logging helpers
//!
//! Filter directive construction for `tracing-subscriber` and per-request
//! correlation ids for the HTTP layer.

pub mod middleware;

pub use middleware::{generate_request_id, request_id, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// Produces `"<level>,reviewgate::<component>=<level>,..."`. Component
/// directives are sorted so the output is stable.
///
/// # Examples
///
/// ```
/// use reviewgate::config::logging::{LogFormat, LoggingConfig};
/// use reviewgate::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("routing".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     log_feedback_content: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,reviewgate::routing=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",reviewgate::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_components_sorted() {
        let mut levels = HashMap::new();
        levels.insert("store".to_string(), "trace".to_string());
        levels.insert("api".to_string(), "debug".to_string());
        let config = LoggingConfig {
            component_levels: Some(levels),
            ..LoggingConfig::default()
        };
        assert_eq!(
            build_filter_directives(&config),
            "info,reviewgate::api=debug,reviewgate::store=trace"
        );
    }
}
