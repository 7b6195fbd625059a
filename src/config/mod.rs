//! External service configuration.
//!
//! Properties for a service named e.g. `discovery` are collected from, in
//! increasing order of precedence:
//!
//! 1. `VCAP_SERVICES` (Cloud Foundry bindings)
//! 2. a credentials file: `IBM_CREDENTIALS_FILE`, else `./ibm-credentials.env`,
//!    else `$HOME/ibm-credentials.env`
//! 3. environment variables `DISCOVERY_URL`, `DISCOVERY_APIKEY`, ...
//!
//! Resolution happens once, when a client is constructed. Explicit
//! constructor arguments are applied on top by the caller.

use crate::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";
pub const DEFAULT_CREDENTIALS_FILE: &str = "ibm-credentials.env";
pub const VCAP_SERVICES_ENV: &str = "VCAP_SERVICES";

/// Resolved configuration for one service, keyed by unprefixed upper-case
/// property name (`URL`, `AUTH_TYPE`, `APIKEY`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties {
    service_name: String,
    props: HashMap<String, String>,
}

impl ServiceProperties {
    pub fn from_map(service_name: &str, props: HashMap<String, String>) -> Self {
        Self {
            service_name: service_name.to_string(),
            props,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Interpret a property as a number of seconds.
    pub fn get_secs(&self, key: &str) -> Option<Duration> {
        self.get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Layer `other` on top of `self`; keys present in `other` win.
    pub fn merge(mut self, other: ServiceProperties) -> Self {
        self.props.extend(other.props);
        self
    }
}

/// `discovery-v2` -> `DISCOVERY_V2_`
fn env_prefix(service_name: &str) -> String {
    format!("{}_", service_name.to_ascii_uppercase().replace('-', "_"))
}

/// Pick `<PREFIX>KEY=value` pairs for `service_name` out of `vars`.
pub fn from_env_vars<I>(service_name: &str, vars: I) -> ServiceProperties
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = env_prefix(service_name);
    let props = vars
        .into_iter()
        .filter_map(|(k, v)| {
            k.strip_prefix(&prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest.to_string(), v))
        })
        .collect();
    ServiceProperties::from_map(service_name, props)
}

/// Parse credentials-file contents (`KEY=value` lines, `#` comments).
pub fn parse_credentials(service_name: &str, contents: &str) -> ServiceProperties {
    let pairs = contents.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (k, v) = line.split_once('=')?;
        let v = v.trim().trim_matches('"').trim_matches('\'');
        Some((k.trim().to_string(), v.to_string()))
    });
    from_env_vars(service_name, pairs)
}

pub fn from_credentials_file(service_name: &str, path: &Path) -> Result<ServiceProperties> {
    let contents = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "loaded credentials file");
    Ok(parse_credentials(service_name, &contents))
}

/// Extract credentials for `service_name` from a `VCAP_SERVICES` document.
///
/// An entry whose `name` equals the service name is preferred; otherwise the
/// first entry listed under the service-name key is used.
pub fn from_vcap_services(service_name: &str, vcap: &str) -> ServiceProperties {
    let mut props = HashMap::new();
    let Ok(doc) = serde_json::from_str::<serde_json::Value>(vcap) else {
        return ServiceProperties::from_map(service_name, props);
    };

    let by_name = doc.as_object().and_then(|services| {
        services
            .values()
            .filter_map(|v| v.as_array())
            .flatten()
            .find(|entry| entry.get("name").and_then(|n| n.as_str()) == Some(service_name))
    });
    let entry = by_name.or_else(|| {
        doc.get(service_name)
            .and_then(|v| v.as_array())
            .and_then(|a| a.first())
    });

    if let Some(creds) = entry.and_then(|e| e.get("credentials")) {
        let mut take = |json_key: &str, prop: &str| {
            if let Some(v) = creds.get(json_key).and_then(|v| v.as_str()) {
                props.entry(prop.to_string()).or_insert_with(|| v.to_string());
            }
        };
        take("url", "URL");
        take("apikey", "APIKEY");
        take("iam_apikey", "APIKEY");
        take("username", "USERNAME");
        take("password", "PASSWORD");

        if props.contains_key("APIKEY") {
            props.insert("AUTH_TYPE".into(), "iam".into());
        } else if props.contains_key("USERNAME") && props.contains_key("PASSWORD") {
            props.insert("AUTH_TYPE".into(), "basic".into());
        }
    }
    ServiceProperties::from_map(service_name, props)
}

/// Location of the credentials file, if one exists.
pub fn credentials_file_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(CREDENTIALS_FILE_ENV).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(p);
        if path.is_file() {
            return Some(path);
        }
        warn!(
            path = %path.display(),
            "{} does not name a readable file; ignoring it",
            CREDENTIALS_FILE_ENV
        );
    }
    let cwd = PathBuf::from(DEFAULT_CREDENTIALS_FILE);
    if cwd.is_file() {
        return Some(cwd);
    }
    let home = std::env::var("HOME").ok()?;
    let in_home = Path::new(&home).join(DEFAULT_CREDENTIALS_FILE);
    in_home.is_file().then_some(in_home)
}

/// Resolve properties for `service_name` from every external source.
pub fn read_service_properties(service_name: &str) -> Result<ServiceProperties> {
    let mut props = ServiceProperties::from_map(service_name, HashMap::new());

    if let Ok(vcap) = std::env::var(VCAP_SERVICES_ENV) {
        props = props.merge(from_vcap_services(service_name, &vcap));
    }
    if let Some(path) = credentials_file_path() {
        props = props.merge(from_credentials_file(service_name, &path)?);
    }
    props = props.merge(from_env_vars(service_name, process_env()));
    Ok(props)
}

/// Process environment with non-UTF-8 entries skipped.
fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_vars_are_filtered_by_prefix() {
        let p = from_env_vars(
            "discovery",
            vars(&[
                ("DISCOVERY_URL", "https://x"),
                ("DISCOVERY_AUTH_TYPE", "noauth"),
                ("ASSISTANT_URL", "https://y"),
                ("DISCOVERY_", "ignored"),
            ]),
        );
        assert_eq!(p.get("URL"), Some("https://x"));
        assert_eq!(p.get("AUTH_TYPE"), Some("noauth"));
        assert_eq!(p.props.len(), 2);
    }

    #[test]
    fn hyphenated_service_names_map_to_underscores() {
        let p = from_env_vars("my-discovery", vars(&[("MY_DISCOVERY_APIKEY", "k")]));
        assert_eq!(p.get("APIKEY"), Some("k"));
    }

    #[test]
    fn credentials_file_parsing() {
        let contents = "\
# service credentials
DISCOVERY_APIKEY=\"abc\"
DISCOVERY_URL = https://api.example.com

DISCOVERY_ENABLE_RETRIES=true
DISCOVERY_MAX_RETRIES=3
DISCOVERY_RETRY_INTERVAL=20
OTHER_APIKEY=zzz
";
        let p = parse_credentials("discovery", contents);
        assert_eq!(p.get("APIKEY"), Some("abc"));
        assert_eq!(p.get("URL"), Some("https://api.example.com"));
        assert!(p.get_bool("ENABLE_RETRIES"));
        assert_eq!(p.get_u32("MAX_RETRIES"), Some(3));
        assert_eq!(p.get_secs("RETRY_INTERVAL"), Some(Duration::from_secs(20)));
        assert!(p.get("OTHER_APIKEY").is_none());
    }

    #[test]
    fn credentials_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ibm-credentials.env");
        std::fs::write(&path, "DISCOVERY_AUTH_TYPE=basic\nDISCOVERY_USERNAME=u\n").unwrap();
        let p = from_credentials_file("discovery", &path).unwrap();
        assert_eq!(p.get("AUTH_TYPE"), Some("basic"));
        assert_eq!(p.get("USERNAME"), Some("u"));
    }

    #[test]
    fn missing_credentials_file_is_io_error() {
        let err = from_credentials_file("discovery", Path::new("/nonexistent/creds.env")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn vcap_prefers_entry_by_name() {
        let vcap = r#"{
            "discovery": [
                {"name": "first", "credentials": {"url": "https://first", "apikey": "k1"}}
            ],
            "user-provided": [
                {"name": "discovery", "credentials": {"url": "https://named", "username": "u", "password": "p"}}
            ]
        }"#;
        let p = from_vcap_services("discovery", vcap);
        assert_eq!(p.get("URL"), Some("https://named"));
        assert_eq!(p.get("AUTH_TYPE"), Some("basic"));
    }

    #[test]
    fn vcap_falls_back_to_first_entry_of_service_key() {
        let vcap = r#"{"discovery": [{"name": "x", "credentials": {"url": "https://first", "apikey": "k1"}}]}"#;
        let p = from_vcap_services("discovery", vcap);
        assert_eq!(p.get("URL"), Some("https://first"));
        assert_eq!(p.get("APIKEY"), Some("k1"));
        assert_eq!(p.get("AUTH_TYPE"), Some("iam"));
    }

    #[test]
    fn vcap_garbage_yields_nothing() {
        assert!(from_vcap_services("discovery", "not json").is_empty());
    }

    #[test]
    fn merge_precedence() {
        let low = from_env_vars("d", vars(&[("D_URL", "low"), ("D_APIKEY", "k")]));
        let high = from_env_vars("d", vars(&[("D_URL", "high")]));
        let merged = low.merge(high);
        assert_eq!(merged.get("URL"), Some("high"));
        assert_eq!(merged.get("APIKEY"), Some("k"));
    }

    #[test]
    fn environment_is_read_for_unique_service() {
        std::env::set_var("CFGTEST_SVC_URL", "https://from-env.example.com");
        std::env::set_var("CFGTEST_SVC_AUTH_TYPE", "noauth");
        let p = read_service_properties("cfgtest-svc").unwrap();
        assert_eq!(p.get("URL"), Some("https://from-env.example.com"));
        assert_eq!(p.get("AUTH_TYPE"), Some("noauth"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_environment_entries_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("CFGTEST_RAW_BYTES", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
        std::env::set_var("CFGTEST_RAW_URL", "https://raw.example.com");
        let p = read_service_properties("cfgtest-raw").unwrap();
        assert_eq!(p.get("URL"), Some("https://raw.example.com"));
        assert!(p.get("BYTES").is_none());
        std::env::remove_var("CFGTEST_RAW_BYTES");
    }

    #[test]
    fn stale_credentials_file_variable_is_ignored() {
        std::env::set_var(CREDENTIALS_FILE_ENV, "/nonexistent/ibm-credentials.env");
        std::env::set_var("CFGTEST_STALE_URL", "https://stale.example.com");
        let resolved = credentials_file_path();
        let props = read_service_properties("cfgtest-stale");
        std::env::remove_var(CREDENTIALS_FILE_ENV);

        assert_ne!(
            resolved.as_deref(),
            Some(Path::new("/nonexistent/ibm-credentials.env"))
        );
        assert_eq!(props.unwrap().get("URL"), Some("https://stale.example.com"));
    }
}
