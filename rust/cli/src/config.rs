use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use tablejudge_engine::judge::JudgeConfig;

use crate::cli::TableArgs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seats: usize,
    pub buy_in: u32,
    pub small_blind: Option<u32>,
    pub big_blind: u32,
    /// Seconds per decision
    pub time_limit: f64,
    pub hand_limit: u32,
    pub seed: Option<u64>,
    pub display: bool,
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub buy_in: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub time_limit: ValueSource,
    pub hand_limit: ValueSource,
    pub seed: ValueSource,
    pub display: ValueSource,
    pub agents: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            buy_in: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            time_limit: ValueSource::Default,
            hand_limit: ValueSource::Default,
            seed: ValueSource::Default,
            display: ValueSource::Default,
            agents: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seats: 2,
            buy_in: 500,
            small_blind: None,
            big_blind: 10,
            time_limit: 2.0,
            hand_limit: 1000,
            seed: None,
            display: false,
            agents: Vec::new(),
        }
    }
}

impl Config {
    pub fn judge_config(&self) -> JudgeConfig {
        JudgeConfig {
            buy_in: self.buy_in,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            time_limit: Duration::try_from_secs_f64(self.time_limit).unwrap_or(Duration::MAX),
            hand_limit: Some(self.hand_limit),
            display: self.display,
            seed: self.seed,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Defaults, then the TOML file named by `TABLEJUDGE_CONFIG`, then the
/// `TABLEJUDGE_*` variables, all read through `env`.
pub fn resolve<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env("TABLEJUDGE_CONFIG").filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = Some(v);
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.time_limit {
            cfg.time_limit = v;
            sources.time_limit = ValueSource::File;
        }
        if let Some(v) = f.hand_limit {
            cfg.hand_limit = v;
            sources.hand_limit = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.display {
            cfg.display = v;
            sources.display = ValueSource::File;
        }
        if let Some(v) = f.agents {
            cfg.agents = v;
            sources.agents = ValueSource::File;
        }
        seats_from_agents(&mut cfg, &mut sources, ValueSource::File);
    }

    if let Some(seed) = env("TABLEJUDGE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(limit) = env("TABLEJUDGE_TIME_LIMIT")
        && !limit.is_empty()
    {
        cfg.time_limit = limit
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid time limit".into()))?;
        sources.time_limit = ValueSource::Env;
    }
    if let Some(buy_in) = env("TABLEJUDGE_BUY_IN")
        && !buy_in.is_empty()
    {
        cfg.buy_in = buy_in
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid buy-in".into()))?;
        sources.buy_in = ValueSource::Env;
    }
    if let Some(bb) = env("TABLEJUDGE_BIG_BLIND")
        && !bb.is_empty()
    {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid big blind".into()))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(display) = env("TABLEJUDGE_DISPLAY")
        && !display.is_empty()
    {
        cfg.display =
            parse_bool(&display).ok_or_else(|| ConfigError::Invalid("Invalid display".into()))?;
        sources.display = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

impl ConfigResolved {
    /// Command-line flags win over every other source.
    pub fn apply_args(&mut self, args: &TableArgs) -> Result<(), ConfigError> {
        let (cfg, src) = (&mut self.config, &mut self.sources);
        if let Some(v) = args.seats {
            cfg.seats = v;
            src.seats = ValueSource::Cli;
        }
        if let Some(v) = args.buy_in {
            cfg.buy_in = v;
            src.buy_in = ValueSource::Cli;
        }
        if let Some(v) = args.small_blind {
            cfg.small_blind = Some(v);
            src.small_blind = ValueSource::Cli;
        }
        if let Some(v) = args.big_blind {
            cfg.big_blind = v;
            src.big_blind = ValueSource::Cli;
        }
        if let Some(v) = args.time_limit {
            cfg.time_limit = v;
            src.time_limit = ValueSource::Cli;
        }
        if !args.agents.is_empty() {
            cfg.agents = args.agents.clone();
            src.agents = ValueSource::Cli;
            seats_from_agents(cfg, src, ValueSource::Cli);
        }
        if let Some(v) = args.seed {
            cfg.seed = Some(v);
            src.seed = ValueSource::Cli;
        }
        if args.display {
            cfg.display = true;
            src.display = ValueSource::Cli;
        }
        validate(cfg)
    }

    pub fn apply_hand_limit(&mut self, hand_limit: Option<u32>) -> Result<(), ConfigError> {
        if let Some(v) = hand_limit {
            self.config.hand_limit = v;
            self.sources.hand_limit = ValueSource::Cli;
        }
        validate(&self.config)
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    time_limit: Option<f64>,
    #[serde(default)]
    hand_limit: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    display: Option<bool>,
    #[serde(default)]
    agents: Option<Vec<String>>,
}

/// Without an explicit seat count, a longer agent list sets it.
fn seats_from_agents(cfg: &mut Config, src: &mut ConfigSources, from: ValueSource) {
    if src.seats == ValueSource::Default && cfg.agents.len() > cfg.seats {
        cfg.seats = cfg.agents.len();
        src.seats = from;
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(2..=10).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: seats must be between 2 and 10".into(),
        ));
    }
    if cfg.buy_in == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: buy_in must be >0".into(),
        ));
    }
    if cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >0".into(),
        ));
    }
    if cfg.small_blind.is_some_and(|sb| sb > cfg.big_blind) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must not exceed big_blind".into(),
        ));
    }
    if cfg.time_limit <= 0.0 || Duration::try_from_secs_f64(cfg.time_limit).is_err() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: time_limit must be >0 seconds".into(),
        ));
    }
    if cfg.hand_limit == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: hand_limit must be >=1".into(),
        ));
    }
    if cfg.agents.len() > cfg.seats {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {} agents for {} seats",
            cfg.agents.len(),
            cfg.seats
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let r = resolve(env_of(&[])).unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.buy_in, ValueSource::Default);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablejudge.toml");
        fs::write(&path, "buy_in = 1000\nseed = 1\nagents = [\"call\", \"baseline\"]\n").unwrap();
        let path_str = path.to_string_lossy().to_string();
        let r = resolve(env_of(&[
            ("TABLEJUDGE_CONFIG", path_str.as_str()),
            ("TABLEJUDGE_SEED", "7"),
            ("TABLEJUDGE_DISPLAY", "yes"),
        ]))
        .unwrap();
        assert_eq!(r.config.buy_in, 1000);
        assert_eq!(r.sources.buy_in, ValueSource::File);
        assert_eq!(r.config.seed, Some(7));
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert!(r.config.display);
        assert_eq!(r.config.agents, vec!["call", "baseline"]);
    }

    #[test]
    fn flags_override_everything() {
        let mut r = resolve(env_of(&[("TABLEJUDGE_BIG_BLIND", "20")])).unwrap();
        let args = TableArgs {
            big_blind: Some(50),
            seats: Some(3),
            agents: vec!["call".into()],
            ..TableArgs::default()
        };
        r.apply_args(&args).unwrap();
        assert_eq!(r.config.big_blind, 50);
        assert_eq!(r.sources.big_blind, ValueSource::Cli);
        assert_eq!(r.config.judge_config().blinds().small, 25);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            resolve(env_of(&[("TABLEJUDGE_TIME_LIMIT", "soon")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            resolve(env_of(&[("TABLEJUDGE_BUY_IN", "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            resolve(env_of(&[("TABLEJUDGE_TIME_LIMIT", "NaN")])),
            Err(ConfigError::Invalid(_))
        ));
        let mut r = resolve(env_of(&[])).unwrap();
        let args = TableArgs {
            seats: Some(2),
            agents: vec!["a".into(), "b".into(), "c".into()],
            ..TableArgs::default()
        };
        assert!(r.apply_args(&args).is_err());
    }

    #[test]
    fn unrepresentable_time_limit_is_rejected() {
        assert!(matches!(
            resolve(env_of(&[("TABLEJUDGE_TIME_LIMIT", "1e20")])),
            Err(ConfigError::Invalid(_))
        ));
        let mut r = resolve(env_of(&[])).unwrap();
        let args = TableArgs {
            time_limit: Some(1e20),
            ..TableArgs::default()
        };
        assert!(r.apply_args(&args).is_err());
    }

    #[test]
    fn agent_list_sets_seat_count_when_seats_unset() {
        let mut r = resolve(env_of(&[])).unwrap();
        let args = TableArgs {
            agents: vec!["call".into(), "call".into(), "baseline".into()],
            ..TableArgs::default()
        };
        r.apply_args(&args).unwrap();
        assert_eq!(r.config.seats, 3);
        assert_eq!(r.sources.seats, ValueSource::Cli);

        // a single agent keeps the default table and is padded later
        let mut r = resolve(env_of(&[])).unwrap();
        let args = TableArgs {
            agents: vec!["call".into()],
            ..TableArgs::default()
        };
        r.apply_args(&args).unwrap();
        assert_eq!(r.config.seats, 2);
        assert_eq!(r.sources.seats, ValueSource::Default);
    }

    #[test]
    fn explicit_seat_count_is_not_overridden_by_agents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablejudge.toml");
        fs::write(&path, "seats = 2\nagents = [\"call\", \"call\", \"call\"]\n").unwrap();
        let path_str = path.to_string_lossy().to_string();
        assert!(matches!(
            resolve(env_of(&[("TABLEJUDGE_CONFIG", path_str.as_str())])),
            Err(ConfigError::Invalid(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablejudge.toml");
        fs::write(&path, "agents = [\"call\", \"call\", \"call\"]\n").unwrap();
        let path_str = path.to_string_lossy().to_string();
        let r = resolve(env_of(&[("TABLEJUDGE_CONFIG", path_str.as_str())])).unwrap();
        assert_eq!(r.config.seats, 3);
        assert_eq!(r.sources.seats, ValueSource::File);
    }
}
