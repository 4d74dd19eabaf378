use std::{
    error::Error,
    fmt, fs, io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{arch::activations::ActFn, initialization::DEFAULT_SEED};

const DEFAULT_MAX_EPOCHS: NonZeroUsize = NonZeroUsize::new(15).unwrap();

/// The config module's result type.
pub type Result<T> = std::result::Result<T, ConfigErr>;

#[derive(Debug)]
pub enum ConfigErr {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Io(e) => write!(f, "cannot read the configuration: {e}"),
            ConfigErr::Json(e) => write!(f, "invalid configuration: {e}"),
            ConfigErr::Invalid(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigErr::Io(e) => Some(e),
            ConfigErr::Json(e) => Some(e),
            ConfigErr::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// The activation function as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFnConfig {
    Sigmoid { amp: f32 },
    Tanh,
}

impl Default for ActFnConfig {
    fn default() -> Self {
        Self::Sigmoid { amp: 1. }
    }
}

impl From<ActFnConfig> for ActFn {
    fn from(value: ActFnConfig) -> Self {
        match value {
            ActFnConfig::Sigmoid { amp } => ActFn::sigmoid(amp),
            ActFnConfig::Tanh => ActFn::tanh(),
        }
    }
}

/// Everything a training run needs. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub train_path: PathBuf,
    pub test_path: Option<PathBuf>,
    pub output_path: PathBuf,
    /// Maximum amount of records read from each CSV file.
    pub limit: Option<usize>,
    /// Every feature is divided by this value.
    pub scale: f32,
    pub outputs: usize,
    pub hidden_layers: Vec<usize>,
    pub act_fn: ActFnConfig,
    pub learning_rate: f32,
    pub max_epochs: NonZeroUsize,
    pub random_weights: bool,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("train.csv"),
            test_path: None,
            output_path: PathBuf::from("out.csv"),
            limit: None,
            scale: 255.,
            outputs: 10,
            hidden_layers: Vec::new(),
            act_fn: ActFnConfig::default(),
            learning_rate: 0.01,
            max_epochs: DEFAULT_MAX_EPOCHS,
            random_weights: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl RunConfig {
    /// Reads and validates a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(ConfigErr::Invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }

        if !(self.scale.is_finite() && self.scale > 0.) {
            return Err(ConfigErr::Invalid(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }

        match self.act_fn {
            ActFnConfig::Sigmoid { amp } if !(amp.is_finite() && amp > 0.) => Err(
                ConfigErr::Invalid(format!("the sigmoid amplitude must be positive, got {amp}")),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_the_defaults() {
        let config = RunConfig::from_json("{}").unwrap();

        assert_eq!(config, RunConfig::default());
        assert_eq!(config.outputs, 10);
        assert_eq!(config.max_epochs.get(), 15);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(ActFn::from(config.act_fn), ActFn::default());
    }

    #[test]
    fn fields_override_the_defaults() {
        let config = RunConfig::from_json(
            r#"{
                "train_path": "data/train.csv",
                "test_path": "data/test.csv",
                "limit": 500,
                "hidden_layers": [32, 16],
                "act_fn": "tanh",
                "learning_rate": 0.1,
                "max_epochs": 3,
                "random_weights": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.train_path, PathBuf::from("data/train.csv"));
        assert_eq!(config.test_path, Some(PathBuf::from("data/test.csv")));
        assert_eq!(config.limit, Some(500));
        assert_eq!(config.hidden_layers, [32, 16]);
        assert_eq!(ActFn::from(config.act_fn), ActFn::tanh());
        assert_eq!(config.max_epochs.get(), 3);
        assert!(!config.random_weights);
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn sigmoid_amplitude_is_read() {
        let json = r#"{ "act_fn": { "sigmoid": { "amp": 2.0 } } }"#;
        let config = RunConfig::from_json(json).unwrap();
        assert_eq!(ActFn::from(config.act_fn), ActFn::sigmoid(2.));
    }

    #[test]
    fn non_positive_rates_are_invalid() {
        for json in [
            r#"{ "learning_rate": 0.0 }"#,
            r#"{ "learning_rate": -0.5 }"#,
            r#"{ "scale": 0.0 }"#,
            r#"{ "act_fn": { "sigmoid": { "amp": 0.0 } } }"#,
        ] {
            let err = RunConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigErr::Invalid(_)), "{json}: got {err:?}");
        }
    }

    #[test]
    fn malformed_files_are_json_errors() {
        for json in [r#"{ "max_epochs": 0 }"#, r#"{ "epochs": 3 }"#, "not json"] {
            let err = RunConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigErr::Json(_)), "{json}: got {err:?}");
        }
    }

    #[test]
    fn files_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "outputs": 3 }"#).unwrap();

        assert_eq!(RunConfig::from_path(&path).unwrap().outputs, 3);
        assert!(matches!(
            RunConfig::from_path(dir.path().join("missing.json")),
            Err(ConfigErr::Io(_))
        ));
    }
}
