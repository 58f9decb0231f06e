use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discord_token: String,
    pub rgapi_key: String,
    pub platform_route: String,
    pub data_file: PathBuf,
    pub channel_file: PathBuf,
    pub rank_images_path: PathBuf,
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            rgapi_key: String::new(),
            platform_route: "EUW1".to_string(),
            data_file: PathBuf::from("summoners.json"),
            channel_file: PathBuf::from("channel_config.json"),
            rank_images_path: PathBuf::from("rank_images"),
            poll_interval_secs: 24 * 60 * 60,
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = read_to_string(path).await?;
        Ok(toml::from_str(&contents)?)
    }

    fn with_env_overrides(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        self.discord_token = var("DISCORD_TOKEN").unwrap_or(self.discord_token);
        self.rgapi_key = var("RGAPI_KEY").unwrap_or(self.rgapi_key);
        self.platform_route = var("PLATFORM_ROUTE").unwrap_or(self.platform_route);
        self.data_file = var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(self.data_file);
        self.channel_file = var("CHANNEL_FILE")
            .map(PathBuf::from)
            .unwrap_or(self.channel_file);
        self.rank_images_path = var("RANK_IMAGES_PATH")
            .map(PathBuf::from)
            .unwrap_or(self.rank_images_path);
        if let Some(secs) = var("POLL_INTERVAL_SECS") {
            self.poll_interval_secs = secs.parse()?;
        }
        anyhow::ensure!(self.poll_interval_secs > 0, "Poll interval must be positive");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_poll_daily() {
        let config = Config::default().with_env_overrides(env(&[])).unwrap();
        assert_eq!(config.poll_interval_secs, 86_400);
        assert_eq!(config.platform_route, "EUW1");
        assert_eq!(config.data_file, PathBuf::from("summoners.json"));
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let config: Config = toml::from_str(
            r#"
            rgapi_key = "from-file"
            platform_route = "NA1"
            poll_interval_secs = 60
            "#,
        )
        .unwrap();
        let config = config
            .with_env_overrides(env(&[("RGAPI_KEY", "from-env"), ("DATA_FILE", "x.json")]))
            .unwrap();

        assert_eq!(config.rgapi_key, "from-env");
        assert_eq!(config.platform_route, "NA1");
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.data_file, PathBuf::from("x.json"));
        assert_eq!(config.channel_file, PathBuf::from("channel_config.json"));
    }

    #[test]
    fn rejects_bad_interval() {
        assert!(Config::default()
            .with_env_overrides(env(&[("POLL_INTERVAL_SECS", "soon")]))
            .is_err());
        assert!(Config::default()
            .with_env_overrides(env(&[("POLL_INTERVAL_SECS", "0")]))
            .is_err());
    }
}
