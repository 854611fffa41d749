// src/config/validate.rs

use chrono::format::{Item, StrftimeItems};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ProjdagError, Result};

pub const MIN_GANTT_WIDTH: usize = 10;
pub const MAX_GANTT_WIDTH: usize = 400;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ProjdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.storage, raw.schedule, raw.view))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_storage(cfg)?;
    validate_view(cfg)?;
    Ok(())
}

fn validate_storage(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = &cfg.storage.graph_file {
        if path.as_os_str().is_empty() {
            return Err(ProjdagError::ConfigError(
                "[storage].graph_file must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_view(cfg: &RawConfigFile) -> Result<()> {
    let width = cfg.view.gantt_width;
    if !(MIN_GANTT_WIDTH..=MAX_GANTT_WIDTH).contains(&width) {
        return Err(ProjdagError::ConfigError(format!(
            "[view].gantt_width must be between {MIN_GANTT_WIDTH} and {MAX_GANTT_WIDTH} (got {width})"
        )));
    }

    let format = &cfg.view.date_format;
    if format.trim().is_empty() {
        return Err(ProjdagError::ConfigError(
            "[view].date_format must not be empty".to_string(),
        ));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ProjdagError::ConfigError(format!(
            "[view].date_format '{format}' is not a valid strftime format"
        )));
    }

    Ok(())
}
