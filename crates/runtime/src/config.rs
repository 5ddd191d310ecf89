use std::env;
use std::path::PathBuf;

/// Runtime settings.
///
/// Read from the environment (after the CLI has loaded `.env`):
/// - `READSELF_DATA_DIR`: where the seed and library snapshot live
/// - `READSELF_PERSIST`: `false` keeps everything in memory
/// - `READSELF_LOG`: tracing filter directive, default `info`
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub data_dir: Option<PathBuf>,
    pub persist: bool,
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            persist: true,
            log_filter: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("READSELF_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(persist) = read_var::<bool>(&lookup, "READSELF_PERSIST") {
            config.persist = persist;
        }

        if let Some(filter) = lookup("READSELF_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config(&[]);
        assert_eq!(config.data_dir, None);
        assert!(config.persist);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_all_variables() {
        let config = config(&[
            ("READSELF_DATA_DIR", "/tmp/readself"),
            ("READSELF_PERSIST", "false"),
            ("READSELF_LOG", "companion_runtime=debug"),
        ]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/readself")));
        assert!(!config.persist);
        assert_eq!(config.log_filter, "companion_runtime=debug");
    }

    #[test]
    fn garbage_keeps_defaults() {
        let config = config(&[("READSELF_PERSIST", "maybe"), ("READSELF_DATA_DIR", "  ")]);
        assert!(config.persist);
        assert_eq!(config.data_dir, None);
    }
}
