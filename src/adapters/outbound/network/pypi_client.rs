use crate::graph_exploration::domain::PackageName;
use crate::ports::outbound::DependencySource;
use crate::shared::error::VisualizerError;
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default registry JSON API base
pub const DEFAULT_REPOSITORY_URL: &str = "https://pypi.org/pypi";

#[derive(Debug, Deserialize)]
struct PyPiPackageInfo {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

/// Outcome of a single HTTP attempt
enum FetchError {
    /// The registry has no such project; retrying will not help
    NotFound,
    Transient(anyhow::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transient(e.into())
    }
}

/// PyPiDependencySource adapter resolving dependencies from the PyPI JSON API
///
/// Issues `GET {base}/{name}/json` and reads `info.requires_dist`. Requests are
/// blocking, spaced out, and retried on transient failures.
///
/// # Security
/// - Package names are validated and URL-encoded before being put in a URL
/// - Implements timeout (10 seconds)
/// - Implements rate limiting (at most one request per 100 ms)
pub struct PyPiDependencySource {
    client: Client,
    base_url: String,
    include_optional: bool,
    max_retries: u32,
    last_request: Mutex<Option<Instant>>,
}

impl PyPiDependencySource {
    const TIMEOUT_SECONDS: u64 = 10;
    const RATE_LIMIT_MS: u64 = 100;

    /// Creates a new source for the given registry base URL
    ///
    /// # Errors
    /// Returns `ConfigInvalid` for a malformed URL, `SourceUnavailable` if the
    /// HTTP client cannot be built.
    pub fn new(repository_url: &str, include_optional: bool) -> Result<Self> {
        let base_url = normalize_repository_url(repository_url)?;

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dep-visualizer/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()
            .map_err(|e| VisualizerError::SourceUnavailable {
                source_name: base_url.clone(),
                details: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            include_optional,
            max_retries: 3,
            last_request: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches package information from PyPI with retry logic
    fn fetch_with_retry(&self, package: &PackageName) -> Result<PyPiPackageInfo> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_from_pypi(package) {
                Ok(info) => return Ok(info),
                Err(FetchError::NotFound) => {
                    return Err(VisualizerError::SourceUnavailable {
                        source_name: self.base_url.clone(),
                        details: format!("package '{}' was not found (HTTP 404)", package),
                    }
                    .into());
                }
                Err(FetchError::Transient(e)) => {
                    tracing::debug!(package = %package, attempt, error = %e, "registry request failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        std::thread::sleep(Duration::from_millis(100 * attempt as u64));
                    }
                }
            }
        }

        let details = last_error
            .map(|e| format!("{:#}", e))
            .unwrap_or_else(|| "no request was attempted".to_string());
        Err(VisualizerError::SourceUnavailable {
            source_name: self.base_url.clone(),
            details,
        }
        .into())
    }

    fn fetch_from_pypi(&self, package: &PackageName) -> std::result::Result<PyPiPackageInfo, FetchError> {
        self.wait_for_rate_limit();

        let url = format!(
            "{}/{}/json",
            self.base_url,
            urlencoding::encode(package.as_str())
        );
        tracing::trace!(%url, "GET");

        let response = self.client.get(&url).send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Transient(anyhow::anyhow!(
                "PyPI API returned status code {}",
                status
            )));
        }

        Ok(response.json()?)
    }

    /// Sleeps until at least `RATE_LIMIT_MS` has passed since the previous request
    fn wait_for_rate_limit(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let spacing = Duration::from_millis(Self::RATE_LIMIT_MS);
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < spacing {
                std::thread::sleep(spacing - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    /// Turns `requires_dist` entries into unique package names, in order
    fn dependency_names(&self, requirements: &[String]) -> Result<Vec<PackageName>> {
        let mut names: Vec<PackageName> = Vec::new();
        for requirement in requirements {
            if !self.include_optional && is_optional_requirement(requirement) {
                continue;
            }
            let Some(raw) = requirement_name(requirement) else {
                continue;
            };
            let name = PackageName::new(raw)?;
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

impl DependencySource for PyPiDependencySource {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        validate_project_name(package, &self.base_url)?;
        let info = self.fetch_with_retry(package)?;
        let requirements = info.info.requires_dist.unwrap_or_default();
        self.dependency_names(&requirements)
    }

    fn describe(&self) -> String {
        format!("registry {}", self.base_url)
    }
}

/// Rejects names that cannot be a registry project, before any request is made
///
/// Project names on the registry are limited to ASCII letters, digits, `-`, `_`
/// and `.`; anything else would only ever produce a 404.
fn validate_project_name(package: &PackageName, base_url: &str) -> Result<()> {
    let valid = package
        .as_str()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid {
        return Err(VisualizerError::SourceUnavailable {
            source_name: base_url.to_string(),
            details: format!(
                "'{}' is not a valid registry project name. Only ASCII letters, digits, hyphens, underscores, and dots are allowed.",
                package
            ),
        }
        .into());
    }
    Ok(())
}

/// Validates a registry URL and maps a `/simple` index URL to the JSON API base
fn normalize_repository_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(VisualizerError::config(format!(
            "repository_url must start with http:// or https://, got '{}'",
            url
        ))
        .into());
    }
    if trimmed.contains(char::is_whitespace) || trimmed.contains('?') || trimmed.contains('#') {
        return Err(VisualizerError::config(format!(
            "repository_url contains characters that are not allowed: '{}'",
            url
        ))
        .into());
    }

    let base = trimmed.trim_end_matches('/');
    let base = match base.strip_suffix("/simple") {
        Some(host) => format!("{}/pypi", host),
        None => base.to_string(),
    };

    let host = base.split("://").nth(1).unwrap_or("");
    if host.is_empty() || host.starts_with('/') {
        return Err(VisualizerError::config(format!("repository_url has no host: '{}'", url)).into());
    }

    Ok(base)
}

/// Extracts the bare project name from a PEP 508 requirement string
///
/// `"requests[security] (>=2.0) ; extra == 'x'"` yields `requests`.
fn requirement_name(requirement: &str) -> Option<&str> {
    let cut = requirement
        .find(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~' | ';' | '(' | ' '))
        .unwrap_or(requirement.len());
    let head = &requirement[..cut];
    let name = match head.find('[') {
        Some(bracket) => &head[..bracket],
        None => head,
    };
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// Whether the requirement only applies when an extra is requested
fn is_optional_requirement(requirement: &str) -> bool {
    match requirement.split_once(';') {
        Some((_, marker)) => marker.replace(' ', "").contains("extra=="),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pypi_source_creation() {
        let source = PyPiDependencySource::new(DEFAULT_REPOSITORY_URL, true);
        assert!(source.is_ok());
    }

    #[test]
    fn test_requirement_name_variants() {
        assert_eq!(requirement_name("urllib3"), Some("urllib3"));
        assert_eq!(requirement_name("urllib3<3,>=1.21.1"), Some("urllib3"));
        assert_eq!(requirement_name("idna (>=2.5)"), Some("idna"));
        assert_eq!(requirement_name("PySocks!=1.5.7"), Some("PySocks"));
        assert_eq!(requirement_name("chardet~=5.0"), Some("chardet"));
        assert_eq!(
            requirement_name("requests[security]>=2.0; extra == 'socks'"),
            Some("requests")
        );
        assert_eq!(requirement_name("typing-extensions; python_version < '3.8'"), Some("typing-extensions"));
        assert_eq!(requirement_name(""), None);
        assert_eq!(requirement_name(">=1.0"), None);
    }

    #[test]
    fn test_is_optional_requirement() {
        assert!(is_optional_requirement("PySocks!=1.5.7; extra == \"socks\""));
        assert!(is_optional_requirement("pytest;extra=='test'"));
        assert!(!is_optional_requirement("idna<4,>=2.5"));
        assert!(!is_optional_requirement("tomli; python_version < \"3.11\""));
    }

    #[test]
    fn test_dependency_names_dedup_keeps_first_occurrence() {
        let source = PyPiDependencySource::new(DEFAULT_REPOSITORY_URL, true).unwrap();
        let requirements = vec![
            "charset-normalizer<4,>=2".to_string(),
            "idna<4,>=2.5".to_string(),
            "charset-normalizer>=3; python_version >= '3.12'".to_string(),
            "PySocks!=1.5.7,>=1.5.6; extra == \"socks\"".to_string(),
        ];

        let names = source.dependency_names(&requirements).unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["charset-normalizer", "idna", "PySocks"]);
    }

    #[test]
    fn test_dependency_names_without_optional() {
        let source = PyPiDependencySource::new(DEFAULT_REPOSITORY_URL, false).unwrap();
        let requirements = vec![
            "idna<4,>=2.5".to_string(),
            "PySocks!=1.5.7,>=1.5.6; extra == \"socks\"".to_string(),
        ];

        let names = source.dependency_names(&requirements).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].as_str(), "idna");
    }

    #[test]
    fn test_normalize_repository_url() {
        assert_eq!(
            normalize_repository_url("https://pypi.org/pypi/").unwrap(),
            "https://pypi.org/pypi"
        );
        assert_eq!(
            normalize_repository_url("https://pypi.org/simple").unwrap(),
            "https://pypi.org/pypi"
        );
        assert_eq!(
            normalize_repository_url("http://localhost:8080/simple/").unwrap(),
            "http://localhost:8080/pypi"
        );
    }

    #[test]
    fn test_normalize_repository_url_rejects_malformed() {
        assert!(normalize_repository_url("pypi.org/pypi").is_err());
        assert!(normalize_repository_url("ftp://pypi.org").is_err());
        assert!(normalize_repository_url("https://").is_err());
        assert!(normalize_repository_url("https://pypi.org/pypi?x=1").is_err());

        let err = normalize_repository_url("pypi.org").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VisualizerError>(),
            Some(VisualizerError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_pypi_info_deserialize_null_requires_dist() {
        let json = r#"{"info": {"name": "numpy", "requires_dist": null}}"#;
        let info: PyPiPackageInfo = serde_json::from_str(json).unwrap();
        assert!(info.info.requires_dist.is_none());
    }

    #[test]
    fn test_resolve_rejects_non_registry_names_without_request() {
        // Validation fails before any request is sent
        let source = PyPiDependencySource::new("http://127.0.0.1:9/pypi", true).unwrap();

        for raw in ["B+C", "lib@2", "a/b", "naïve"] {
            let err = source.resolve(&PackageName::new(raw).unwrap()).unwrap_err();
            match err.downcast_ref::<VisualizerError>() {
                Some(VisualizerError::SourceUnavailable { details, .. }) => {
                    assert!(details.contains("not a valid registry project name"), "{}", details)
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_project_name_accepts_registry_names() {
        for raw in ["requests", "zope.interface", "typing_extensions", "charset-normalizer"] {
            assert!(validate_project_name(&PackageName::new(raw).unwrap(), "base").is_ok());
        }
    }

    #[test]
    fn test_describe_names_registry() {
        let source = PyPiDependencySource::new("https://pypi.org/simple", true).unwrap();
        assert_eq!(source.base_url(), "https://pypi.org/pypi");
        assert_eq!(source.describe(), "registry https://pypi.org/pypi");
    }
}
