//! Tests for validated configuration.

use super::ConfigError;
use super::cli::{AddressKind, Cli};
use super::toml::TomlConfig;
use super::validated::{SettingsCommand, ValidatedConfig};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["netfacts"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn no_args_uses_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert!(config.address.is_none());
        assert_eq!(config.collectors, vec!["network", "top_level"]);
        assert_eq!(
            config.settings,
            Some(SettingsCommand {
                program: "sysctl".to_string(),
                args: vec!["-a".to_string(), "net".to_string()],
            })
        );
        assert!(config.pretty);
        assert!(!config.verbose);
    }

    #[test]
    fn address_subcommand_sets_kind() {
        let config = ValidatedConfig::from_raw(&cli(&["address", "mac"]), None).unwrap();
        assert_eq!(config.address, Some(AddressKind::Mac));
    }

    #[test]
    fn collect_subcommand_has_no_address() {
        let config = ValidatedConfig::from_raw(&cli(&["collect"]), None).unwrap();
        assert!(config.address.is_none());
    }

    #[test]
    fn display_summarizes_config() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();
        let display = config.to_string();

        assert!(display.contains("network, top_level"));
        assert!(display.contains("sysctl -a net"));
    }

    #[test]
    fn display_shows_disabled_settings() {
        let config = ValidatedConfig::from_raw(&cli(&["--no-settings"]), None).unwrap();
        assert!(config.to_string().contains("settings: disabled"));
    }
}

mod collectors {
    use super::*;

    #[test]
    fn cli_replaces_toml_list() {
        let toml = toml("[collect]\ncollectors = [\"network\"]\n");
        let config =
            ValidatedConfig::from_raw(&cli(&["--collector", "top_level"]), Some(&toml)).unwrap();

        assert_eq!(config.collectors, vec!["top_level"]);
    }

    #[test]
    fn toml_list_used_without_cli() {
        let toml = toml("[collect]\ncollectors = [\"top_level\", \"network\"]\n");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.collectors, vec!["top_level", "network"]);
    }

    #[test]
    fn duplicates_are_collapsed_keeping_first() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--collector",
                "network",
                "--collector",
                "top_level",
                "--collector",
                "network",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.collectors, vec!["network", "top_level"]);
    }

    #[test]
    fn unknown_collector_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--collector", "disk"]), None);

        match result {
            Err(ConfigError::UnknownCollector { name, known }) => {
                assert_eq!(name, "disk");
                assert_eq!(known, "network, top_level");
            }
            other => panic!("expected UnknownCollector, got {other:?}"),
        }
    }

    #[test]
    fn empty_toml_list_is_rejected() {
        let toml = toml("[collect]\ncollectors = []\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::NoCollectors)));
    }
}

mod settings {
    use super::*;

    #[test]
    fn no_settings_flag_wins_over_toml() {
        let toml = toml("[settings]\nenabled = true\n");
        let config = ValidatedConfig::from_raw(&cli(&["--no-settings"]), Some(&toml)).unwrap();

        assert!(config.settings.is_none());
    }

    #[test]
    fn toml_can_disable() {
        let toml = toml("[settings]\nenabled = false\n");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.settings.is_none());
    }

    #[test]
    fn toml_command_and_args() {
        let toml = toml("[settings]\ncommand = \"/sbin/sysctl\"\nargs = [\"net.ipv4\"]\n");
        let settings = ValidatedConfig::from_raw(&cli(&[]), Some(&toml))
            .unwrap()
            .settings
            .unwrap();

        assert_eq!(settings.program, "/sbin/sysctl");
        assert_eq!(settings.args, vec!["net.ipv4"]);
    }

    #[test]
    fn cli_overrides_toml_command_and_args() {
        let toml = toml("[settings]\ncommand = \"/sbin/sysctl\"\nargs = [\"net.ipv4\"]\n");
        let settings = ValidatedConfig::from_raw(
            &cli(&[
                "--settings-command",
                "cat",
                "--settings-arg",
                "/tmp/sysctl.txt",
            ]),
            Some(&toml),
        )
        .unwrap()
        .settings
        .unwrap();

        assert_eq!(settings.program, "cat");
        assert_eq!(settings.args, vec!["/tmp/sysctl.txt"]);
    }

    #[test]
    fn cli_command_keeps_toml_args() {
        let toml = toml("[settings]\nargs = [\"-n\", \"net.core.somaxconn\"]\n");
        let settings =
            ValidatedConfig::from_raw(&cli(&["--settings-command", "sysctl"]), Some(&toml))
                .unwrap()
                .settings
                .unwrap();

        assert_eq!(settings.args, vec!["-n", "net.core.somaxconn"]);
    }

    #[test]
    fn empty_program_is_rejected() {
        let toml = toml("[settings]\ncommand = \"  \"\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidCommand { .. })));
    }

    #[test]
    fn empty_program_is_ignored_when_disabled() {
        let toml = toml("[settings]\ncommand = \"\"\n");
        let config = ValidatedConfig::from_raw(&cli(&["--no-settings"]), Some(&toml)).unwrap();

        assert!(config.settings.is_none());
    }
}

mod output {
    use super::*;

    #[test]
    fn compact_flag_wins() {
        let toml = toml("[output]\npretty = true\n");
        let config = ValidatedConfig::from_raw(&cli(&["--compact"]), Some(&toml)).unwrap();

        assert!(!config.pretty);
    }

    #[test]
    fn toml_can_disable_pretty() {
        let toml = toml("[output]\npretty = false\n");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(!config.pretty);
    }
}

mod loading {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [collect]
            collectors = ["top_level"]

            [output]
            pretty = false
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.collectors, vec!["top_level"]);
        assert!(!config.pretty);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let cli = cli(&["--config", "/nonexistent/path/config.toml"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml [[[").unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod init {
    use std::fs;

    use tempfile::tempdir;

    use super::super::validated::write_default_config;
    use super::*;

    #[test]
    fn write_default_config_creates_parseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("netfacts.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[collect]"));
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        let result = write_default_config(std::path::Path::new("/nonexistent/dir/netfacts.toml"));

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
