// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use medicare_app::{DEFAULT_REFERENCE_DATE, Granularity, Page, SettingRow};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

pub const CONFIG_PATH_ENV: &str = "MEDICARE_CONFIG_PATH";
pub const LOG_LEVEL_ENV: &str = "MEDICARE_LOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_page: Option<String>,
    pub sidebar_collapsed: Option<bool>,
    pub calendar_view: Option<String>,
    pub reference_date: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_page: Some(Page::Dashboard.label().to_owned()),
            sidebar_collapsed: Some(false),
            calendar_view: Some(Granularity::Day.as_str().to_owned()),
            reference_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root
            .join(medicare_data::APP_NAME)
            .join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [data], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(data_path) = &self.data.path {
            medicare_data::validate_dataset_path(data_path)
                .with_context(|| format!("invalid data.path in {}", path.display()))?;
        }

        self.start_page()
            .with_context(|| format!("invalid ui.start_page in {}", path.display()))?;
        self.calendar_view()
            .with_context(|| format!("invalid ui.calendar_view in {}", path.display()))?;
        self.reference_date()
            .with_context(|| format!("invalid ui.reference_date in {}", path.display()))?;

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).map_err(|error| {
                anyhow!(
                    "log.level {level:?} in {} is not a valid filter: {error}",
                    path.display()
                )
            })?;
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} must not be empty; remove it to use the default",
                path.display()
            );
        }

        Ok(())
    }

    /// Dataset file to load; `None` means the built-in sample clinic.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.path.as_deref().map(PathBuf::from)
    }

    pub fn start_page(&self) -> Result<Page> {
        match self.ui.start_page.as_deref() {
            None => Ok(Page::Dashboard),
            Some(raw) => Page::parse(raw).ok_or_else(|| {
                anyhow!(
                    "unknown page {raw:?}; use one of Dashboard, Patients, Appointments, Staff, Settings"
                )
            }),
        }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.ui.sidebar_collapsed.unwrap_or(false)
    }

    pub fn calendar_view(&self) -> Result<Granularity> {
        match self.ui.calendar_view.as_deref() {
            None => Ok(Granularity::Day),
            Some(raw) => Granularity::parse(raw)
                .ok_or_else(|| anyhow!("unknown calendar view {raw:?}; use day, week, or month")),
        }
    }

    /// The "today" used by the dashboard and the initial schedule.
    pub fn reference_date(&self) -> Result<Date> {
        match self.ui.reference_date.as_deref() {
            None => Ok(DEFAULT_REFERENCE_DATE),
            Some(raw) => Date::parse(raw, format_description!("[year]-[month]-[day]"))
                .with_context(|| format!("expected YYYY-MM-DD, got {raw:?}")),
        }
    }

    /// `MEDICARE_LOG` first, then the config value, then `info`. A blank
    /// variable counts as unset.
    pub fn log_level(&self) -> String {
        env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .or_else(|| self.log.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in the config")
        })?;
        Ok(data_root
            .join(medicare_data::APP_NAME)
            .join(format!("{}.log", medicare_data::APP_NAME)))
    }

    /// Rows for the settings page.
    pub fn setting_rows(&self, config_path: &Path, data_source: &str) -> Result<Vec<SettingRow>> {
        let log_file = self.log_file()?;
        Ok(vec![
            SettingRow::new("config file", config_path.display().to_string()),
            SettingRow::new("data source", data_source),
            SettingRow::new("start page", self.start_page()?.label()),
            SettingRow::new(
                "sidebar",
                if self.sidebar_collapsed() {
                    "collapsed"
                } else {
                    "expanded"
                },
            ),
            SettingRow::new("calendar view", self.calendar_view()?.as_str()),
            SettingRow::new("reference date", self.reference_date()?.to_string()),
            SettingRow::new("log level", self.log_level()),
            SettingRow::new("log file", log_file.display().to_string()),
        ])
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# medicare config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Without a path the built-in sample clinic is shown.\n# `medicare --print-sample-data > clinic.json` writes a starting point.\n# path = \"/absolute/path/to/clinic.json\"\n\n[ui]\nstart_page = \"Dashboard\"\nsidebar_collapsed = false\n# day, week, or month\ncalendar_view = \"day\"\n# The \"today\" used by the dashboard and the schedule.\nreference_date = \"{}\"\n\n[log]\n# Any tracing filter, for example \"debug\" or \"medicare_tui=debug,info\".\n# {LOG_LEVEL_ENV} overrides this for a single run.\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# file = \"/absolute/path/to/medicare.log\"\n",
            path.display(),
            DEFAULT_REFERENCE_DATE,
        )
    }
}
