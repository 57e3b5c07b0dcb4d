#[cfg(test)]
mod tests {
    use donelog::api::todoist::DEFAULT_API_URL;
    use donelog::api::TodoistConfig;
    use donelog::libs::config::{Config, SyncConfig, DEFAULT_SYNC_INTERVAL_SECS};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join("config.json");
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sync_interval(), Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS));
        assert!(config.todoist().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let config = Config {
            todoist: Some(TodoistConfig::with_token("secret")),
            sync: Some(SyncConfig {
                interval_secs: 60,
                db_path: Some(PathBuf::from("/tmp/donelog.db")),
            }),
        };
        config.save_to(&ctx.config_path).unwrap();

        let loaded = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.sync_interval(), Duration::from_secs(60));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.config_path, r#"{ "todoist": { "api_token": "abc" }, "sync": {} }"#).unwrap();

        let config = Config::read_from(&ctx.config_path).unwrap();
        let todoist = config.todoist().unwrap();
        assert_eq!(todoist.api_token, "abc");
        assert_eq!(todoist.api_url, DEFAULT_API_URL);
        assert_eq!(config.sync_interval(), Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let file = Config {
            todoist: Some(TodoistConfig::with_token("from-file")),
            sync: Some(SyncConfig::default()),
        };
        let config = file
            .apply_env(env(&[
                ("TODOIST_API_TOKEN", "from-env"),
                ("DONELOG_API_URL", "http://localhost:9000"),
                ("DONELOG_SYNC_INTERVAL", "42"),
                ("DONELOG_DB", "/data/donelog.db"),
            ]))
            .unwrap();

        let todoist = config.todoist().unwrap();
        assert_eq!(todoist.api_token, "from-env");
        assert_eq!(todoist.api_url, "http://localhost:9000");
        assert_eq!(config.sync_interval(), Duration::from_secs(42));
        assert_eq!(config.sync.unwrap().db_path, Some(PathBuf::from("/data/donelog.db")));
    }

    #[test]
    fn test_token_from_environment_alone_is_enough() {
        let config = Config::default().apply_env(env(&[("TODOIST_API_TOKEN", "from-env")])).unwrap();
        let todoist = config.todoist().unwrap();
        assert_eq!(todoist.api_token, "from-env");
        assert_eq!(todoist.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_blank_environment_values_are_ignored() {
        let file = Config {
            todoist: Some(TodoistConfig::with_token("from-file")),
            sync: None,
        };
        let config = file.apply_env(env(&[("TODOIST_API_TOKEN", "  "), ("DONELOG_SYNC_INTERVAL", "")])).unwrap();
        assert_eq!(config.todoist().unwrap().api_token, "from-file");
        assert!(config.sync.is_none());
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        for bad in ["0", "-5", "five"] {
            let result = Config::default().apply_env(env(&[("DONELOG_SYNC_INTERVAL", bad)]));
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let config = Config {
            todoist: Some(TodoistConfig::with_token("")),
            sync: None,
        };
        assert!(config.todoist().is_err());
    }
}
