use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    currency::{CurrencyCode, CurrencyDisplay, Formatter, LocaleConfig, NegativeStyle},
    errors::{BudgetError, Result},
    storage::{LoadPolicy, RuleLoader},
};

pub const CONFIG_ENV_VAR: &str = "RECUR_BUDGET_CONFIG";
const CONFIG_DIR_NAME: &str = "recur_budget";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences for loading rules and rendering reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub skip_invalid_rules: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: LocaleConfig::default(),
            negative_style: NegativeStyle::default(),
            currency_display: CurrencyDisplay::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            delimiter: Self::default_delimiter(),
            skip_invalid_rules: false,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_delimiter() -> char {
        ','
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(CurrencyCode::new(&self.currency), self.locale.clone())
            .with_negative_style(self.negative_style)
            .with_display(self.currency_display)
    }

    /// A rule loader honouring the configured delimiter and skip policy.
    pub fn rule_loader(&self) -> Result<RuleLoader> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                BudgetError::Config(format!(
                    "delimiter `{}` must be a single ASCII character",
                    self.delimiter
                ))
            })?;
        let policy = if self.skip_invalid_rules {
            LoadPolicy::SkipInvalid
        } else {
            LoadPolicy::Strict
        };
        Ok(RuleLoader::new()
            .with_delimiter(delimiter)
            .with_policy(policy))
    }
}

/// Locates, reads and writes the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `explicit` when given, then `RECUR_BUDGET_CONFIG`, then the
    /// platform config directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::with_path(path));
        }
        if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            return Ok(Self::with_path(PathBuf::from(path)));
        }
        let base = dirs::config_dir().ok_or_else(|| {
            BudgetError::Config("no configuration directory available on this platform".into())
        })?;
        Ok(Self::with_path(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing files yield the defaults.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
