//! Configuration layering: defaults, global file, workspace files, environment.

use super::test_utils::with_isolated_env;
use flashgen::config::{global_config_path, ConfigLoader, ProviderType};
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    std::fs::create_dir_all(&workspace).unwrap();

    with_isolated_env(&temp, &[], || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(temp.path().join("xdg-config")));
        write(
            &global,
            r#"
[provider]
provider_type = "anthropic"
model = "claude-test"

[generation]
default_count = 7
"#,
        );

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Anthropic);
        assert_eq!(config.provider.model, "claude-test");
        assert_eq!(config.generation.default_count, 7);
    });
}

#[test]
fn test_workspace_and_env_override_global() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");

    with_isolated_env(
        &temp,
        &[
            ("FLASHGEN_ENV", "test"),
            ("FLASHGEN__PROVIDER__MODEL", "from-env"),
        ],
        || {
            write(
                &global_config_path().unwrap(),
                "[generation]\ndefault_count = 7\ntimeout_secs = 90\n",
            );
            write(
                &workspace.join("config").join("config.toml"),
                "[generation]\ndefault_count = 9\n",
            );
            write(
                &workspace.join("config").join("test.toml"),
                "[generation]\ndefault_count = 11\n",
            );

            let config = ConfigLoader::load(&workspace).unwrap();
            // config/test.toml beats config/config.toml beats the global file
            assert_eq!(config.generation.default_count, 11);
            // Keys only the global file sets still come through
            assert_eq!(config.generation.timeout_secs, 90);
            assert_eq!(config.provider.model, "from-env");
            assert!(config.validate().is_ok());
        },
    );
}

#[test]
fn test_environment_overrides_explicit_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("flashgen.toml");
    write(&file, "[generation]\ndefault_count = 3\n");

    with_isolated_env(
        &temp,
        &[("FLASHGEN__GENERATION__DEFAULT_COUNT", "12")],
        || {
            let config = ConfigLoader::load_from_file(&file).unwrap();
            assert_eq!(config.generation.default_count, 12);
        },
    );
}

#[test]
fn test_invalid_values_are_reported_together() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("bad.toml");
    write(
        &file,
        r#"
[provider]
provider_type = "local"
model = "tiny"

[generation]
default_count = 0

[logging]
output = "syslog"
"#,
    );

    with_isolated_env(&temp, &[], || {
        let config = ConfigLoader::load_from_file(&file).unwrap();
        let issues = config.validate().unwrap_err();
        assert_eq!(issues.len(), 3);
        let rendered: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        assert!(rendered[0].contains("endpoint"));
        assert!(rendered[1].contains("default_count"));
        assert!(rendered[2].contains("syslog"));
    });
}
