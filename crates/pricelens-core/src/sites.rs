use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_separator() -> char {
    '/'
}

/// A scraped source site: the base origin all relative and derived URLs are
/// resolved against, and the delimiter its combined category paths use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin, e.g. `"https://www.jumia.com.ng"`.
    pub base_url: String,
    #[serde(default = "default_separator")]
    pub category_separator: char,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfig>,
}

impl SitesFile {
    /// Looks up a site by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSite` if no site matches.
    pub fn get(&self, name: &str) -> Result<&SiteConfig, ConfigError> {
        self.sites
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownSite(name.to_owned()))
    }
}

/// Load and validate the site registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile = serde_yaml::from_str(&content)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for site in &sites_file.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }

        if !site.base_url.starts_with("https://") && !site.base_url.starts_with("http://") {
            return Err(ConfigError::Validation(format!(
                "site '{}' has non-absolute base_url '{}'",
                site.name, site.base_url
            )));
        }

        if !seen_names.insert(site.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name: '{}'",
                site.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_site(name: &str, base_url: &str) -> SiteConfig {
        SiteConfig {
            name: name.to_string(),
            base_url: base_url.to_string(),
            category_separator: '/',
            notes: None,
        }
    }

    #[test]
    fn validate_accepts_valid_sites() {
        let sites_file = SitesFile {
            sites: vec![
                make_site("jumia", "https://www.jumia.com.ng"),
                make_site("konga", "https://www.konga.com"),
            ],
        };
        assert!(validate_sites(&sites_file).is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let sites_file = SitesFile {
            sites: vec![make_site("  ", "https://www.jumia.com.ng")],
        };
        let err = validate_sites(&sites_file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let sites_file = SitesFile {
            sites: vec![make_site("jumia", "www.jumia.com.ng")],
        };
        let err = validate_sites(&sites_file).unwrap_err();
        assert!(err.to_string().contains("non-absolute base_url"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let sites_file = SitesFile {
            sites: vec![
                make_site("Jumia", "https://www.jumia.com.ng"),
                make_site("jumia", "https://other.example.com"),
            ],
        };
        let err = validate_sites(&sites_file).unwrap_err();
        assert!(err.to_string().contains("duplicate site name"));
    }

    #[test]
    fn get_is_case_insensitive() {
        let sites_file = SitesFile {
            sites: vec![make_site("jumia", "https://www.jumia.com.ng")],
        };
        let site = sites_file.get("JUMIA").unwrap();
        assert_eq!(site.base_url, "https://www.jumia.com.ng");
    }

    #[test]
    fn get_unknown_site_errors() {
        let sites_file = SitesFile { sites: vec![] };
        let err = sites_file.get("konga").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSite(ref n) if n == "konga"));
    }

    #[test]
    fn separator_defaults_to_slash() {
        let yaml = "sites:\n  - name: jumia\n    base_url: https://www.jumia.com.ng\n";
        let sites_file: SitesFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sites_file.sites[0].category_separator, '/');
    }

    #[test]
    fn load_sites_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("sites.yaml");
        assert!(
            path.exists(),
            "sites.yaml missing at {path:?} — required for this test"
        );
        let result = load_sites(&path);
        assert!(result.is_ok(), "failed to load sites.yaml: {result:?}");
        let sites_file = result.unwrap();
        assert!(!sites_file.sites.is_empty());
    }
}
