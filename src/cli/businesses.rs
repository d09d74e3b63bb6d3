//! Businesses command implementation

use crate::cli::output::{format_businesses_json, format_businesses_table, BusinessView};
use crate::cli::BusinessesArgs;
use crate::config::ReviewgateConfig;

/// Handle `reviewgate businesses`: list what the config file would seed.
pub fn handle_businesses(args: &BusinessesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = ReviewgateConfig::load(Some(&args.config))?;
    config.validate()?;

    let views: Vec<BusinessView> = config
        .businesses
        .iter()
        .map(|b| BusinessView::from(&b.to_business()))
        .collect();

    if args.json {
        Ok(format_businesses_json(&views))
    } else {
        Ok(format_businesses_table(&views))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn args(config: PathBuf, json: bool) -> BusinessesArgs {
        BusinessesArgs { json, config }
    }

    #[test]
    fn test_businesses_from_example_config() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), include_str!("../../reviewgate.example.toml")).unwrap();

        let output = handle_businesses(&args(temp.path().to_path_buf(), true)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["businesses"][0]["slug"], "johns-cafe");
        assert_eq!(parsed["businesses"][0]["mode"], "round_robin");
    }

    #[test]
    fn test_businesses_rejects_bad_weights() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            r#"
            [[businesses]]
            name = "Cafe"
            slug = "cafe"
            email = "o@cafe.test"

            [[businesses.platforms]]
            name = "Google"
            url = "https://g"
            weight = 90
            "#,
        )
        .unwrap();

        let err = handle_businesses(&args(temp.path().to_path_buf(), false)).unwrap_err();
        assert!(err.to_string().contains("currently 90%"));
    }

    #[test]
    fn test_businesses_missing_config() {
        let result = handle_businesses(&args(PathBuf::from("/nonexistent/reviewgate.toml"), false));
        assert!(result.is_err());
    }
}
