//! Settings loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "travel-agent";
const PROJECT_CONFIG: &str = "travel-agent.toml";
const ENV_PREFIX: &str = "TRAVEL_AGENT_";

/// Settings loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `TRAVEL_AGENT_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./travel-agent.toml`
    /// 4. Global: `~/.config/travel-agent/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }
        let mut figment = Self::file_figment(config_path);
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().map_err(Box::new)
    }

    /// Defaults and files only, no environment.
    fn file_figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project = PathBuf::from(PROJECT_CONFIG);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default settings
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `~/.config/travel-agent/config.toml` (platform config dir)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG);
        path.exists().then_some(path)
    }

    /// Human-readable list of config sources, highest priority first.
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mark = |found: bool| if found { "[FOUND]" } else { "[     ]" };
        let mut lines = vec![format!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX)];

        if let Some(path) = config_path {
            lines.push(format!("  {} Explicit: {}", mark(path.exists()), path.display()));
        }
        lines.push(format!(
            "  {} Project: ./{}",
            mark(Self::project_config_path().is_some()),
            PROJECT_CONFIG
        ));
        if let Some(path) = Self::global_config_path() {
            lines.push(format!("  {} Global:  {}", mark(path.exists()), path.display()));
        }
        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agents.root, "manager_agent");
        assert!(config.guardrail.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("travel-agent"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[model]\nname = \"gpt-4.1\"\n\n[execution]\nmax_tool_turns = 3\n"
        )
        .unwrap();

        let config: FileConfig = ConfigLoader::file_figment(Some(file.path()))
            .extract()
            .unwrap();
        assert_eq!(config.model.name, "gpt-4.1");
        assert_eq!(config.execution.max_tool_turns, 3);
        assert_eq!(config.web.bind, FileConfig::default().web.bind);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[execution]\nmax_tool_turns = \"many\"").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_env_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[web]\nbind = \"127.0.0.1:9000\"\n")?;
            jail.set_env("TRAVEL_AGENT_WEB__BIND", "127.0.0.1:9100");
            jail.set_env("TRAVEL_AGENT_GUARDRAIL__ENABLED", "false");

            let config = ConfigLoader::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.web.bind, "127.0.0.1:9100");
            assert!(!config.guardrail.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_lists_explicit_path() {
        let lines = ConfigLoader::describe_sources(Some(Path::new("/nowhere/travel.toml")));
        assert!(lines.iter().any(|l| l.contains("/nowhere/travel.toml")));
        assert!(lines.last().unwrap().contains("Default"));
    }
}
