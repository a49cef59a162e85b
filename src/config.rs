use crate::errors::{Result, SmokeError};
use crate::probes::Probe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A smoke-test suite: which image to exercise and how.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuiteSpec {
    /// Image reference to pull and run.
    pub image: String,
    /// Fixed container name; a stale container by this name is removed
    /// before every run.
    pub container: String,
    /// Port the service listens on inside the container.
    #[serde(default = "default_container_port")]
    pub container_port: u16,
    /// Seconds to wait after container start before probing.
    #[serde(default = "default_warmup_secs")]
    pub warmup_secs: u64,
    /// URL path fetched from the host after the probes.
    #[serde(default = "default_path")]
    pub path: String,
    /// Regex the fetched response body must match.
    pub marker: String,
    /// Command override for images whose default entrypoint exits
    /// immediately (e.g. plain alpine kept alive with `sleep infinity`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default)]
    pub probes: Vec<Probe>,
}

fn default_container_port() -> u16 {
    80
}

fn default_warmup_secs() -> u64 {
    2
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suites: BTreeMap<String, SuiteSpec>,
}

impl Config {
    /// Load configuration. An explicit path must exist and parse; otherwise
    /// `.imgsmoke.yml` in the working directory is tried, then the
    /// user-level file, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SmokeError::ConfigError(format!(
                    "config file '{}' not found",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        let local = PathBuf::from(".imgsmoke.yml");
        if local.exists() {
            return Self::load_file(&local);
        }

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                return Self::load_file(&user);
            }
        }

        Ok(Config::default())
    }

    /// User-level config location under the OS config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("imgsmoke").join("config.yml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yml::from_str(&content).map_err(|e| {
            SmokeError::ConfigError(format!("failed to parse '{}': {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// All suites visible to this config: built-ins, with config entries
    /// overriding same-named built-ins and adding new ones.
    pub fn all_suites(&self) -> BTreeMap<String, SuiteSpec> {
        let mut suites = builtin_suites();
        for (name, spec) in &self.suites {
            suites.insert(name.clone(), spec.clone());
        }
        suites
    }

    /// Look up a suite by name.
    pub fn resolve(&self, name: &str) -> Result<SuiteSpec> {
        let suites = self.all_suites();
        suites.get(name).cloned().ok_or_else(|| {
            SmokeError::UnknownSuite(name.to_string(), suites.keys().cloned().collect())
        })
    }
}

/// The two suites the tool ships with, mirroring the images it was
/// built to exercise.
pub fn builtin_suites() -> BTreeMap<String, SuiteSpec> {
    let mut suites = BTreeMap::new();

    suites.insert(
        "nginx".to_string(),
        SuiteSpec {
            image: "nginx:alpine".to_string(),
            container: "test-nginx".to_string(),
            container_port: 80,
            warmup_secs: 2,
            path: "/".to_string(),
            marker: "Welcome to nginx".to_string(),
            command: Vec::new(),
            probes: vec![
                Probe::new("install curl package", &["apk", "add", "--no-cache", "curl"]),
                Probe::new(
                    "write test page",
                    &[
                        "sh",
                        "-c",
                        "echo 'imgsmoke test page' > /usr/share/nginx/html/imgsmoke.html",
                    ],
                ),
                Probe::new(
                    "serve test page inside container",
                    &["curl", "-fsS", "http://localhost/imgsmoke.html"],
                )
                .expect_stdout("imgsmoke test page"),
                Probe::new("ping external host", &["ping", "-c", "1", "-W", "2", "8.8.8.8"]),
                Probe::new("reload nginx", &["nginx", "-s", "reload"]),
            ],
        },
    );

    suites.insert(
        "alpine".to_string(),
        SuiteSpec {
            image: "alpine:latest".to_string(),
            container: "test-alpine-nginx".to_string(),
            container_port: 80,
            warmup_secs: 1,
            path: "/".to_string(),
            marker: "served from alpine".to_string(),
            // plain alpine exits immediately without a long-running command
            command: vec!["sleep".to_string(), "infinity".to_string()],
            probes: vec![
                Probe::new(
                    "install nginx and curl",
                    &["apk", "add", "--no-cache", "nginx", "curl"],
                ),
                Probe::new(
                    "write server config",
                    &[
                        "sh",
                        "-c",
                        "printf 'server { listen 80; root /usr/share/nginx/html; }\\n' \
                         > /etc/nginx/http.d/default.conf",
                    ],
                ),
                Probe::new(
                    "write index page",
                    &[
                        "sh",
                        "-c",
                        "mkdir -p /usr/share/nginx/html && \
                         echo 'served from alpine' > /usr/share/nginx/html/index.html",
                    ],
                ),
                Probe::new("start nginx", &["nginx"]),
                Probe::new(
                    "serve index page inside container",
                    &["curl", "-fsS", "http://localhost/"],
                )
                .expect_stdout("served from alpine"),
                Probe::new("ping external host", &["ping", "-c", "1", "-W", "2", "8.8.8.8"]),
            ],
        },
    );

    suites
}
