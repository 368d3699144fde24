//! Runtime configuration read from `NEXUS_*` environment variables.

use std::str::FromStr;

use anyhow::{Context, bail};

use nexus_core::DEFAULT_PAGE_LIMIT;
use nexus_inventario::DEFAULT_LOW_STOCK_THRESHOLD;

pub const LOW_STOCK_THRESHOLD_VAR: &str = "NEXUS_LOW_STOCK_THRESHOLD";
pub const PAGE_SIZE_VAR: &str = "NEXUS_PAGE_SIZE";
pub const TOOL_LIST_LIMIT_VAR: &str = "NEXUS_TOOL_LIST_LIMIT";
pub const LOG_VAR: &str = "NEXUS_LOG";

/// Default `limit` for chatbot list tools.
pub const DEFAULT_TOOL_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusConfig {
    pub low_stock_threshold: i64,
    /// Default `limit` for unpaginated list calls.
    pub page_size: usize,
    pub tool_list_limit: usize,
    pub log_filter: String,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            page_size: DEFAULT_PAGE_LIMIT,
            tool_list_limit: DEFAULT_TOOL_LIST_LIMIT,
            log_filter: "info".to_string(),
        }
    }
}

impl NexusConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables fall
    /// back to defaults; present but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            low_stock_threshold: parse_or(
                read(LOW_STOCK_THRESHOLD_VAR),
                LOW_STOCK_THRESHOLD_VAR,
                defaults.low_stock_threshold,
            )?,
            page_size: parse_or(read(PAGE_SIZE_VAR), PAGE_SIZE_VAR, defaults.page_size)?,
            tool_list_limit: parse_or(
                read(TOOL_LIST_LIMIT_VAR),
                TOOL_LIST_LIMIT_VAR,
                defaults.tool_list_limit,
            )?,
            log_filter: read(LOG_VAR).unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.low_stock_threshold < 0 {
            bail!("{LOW_STOCK_THRESHOLD_VAR} must not be negative");
        }
        if self.page_size == 0 {
            bail!("{PAGE_SIZE_VAR} must be greater than zero");
        }
        if self.tool_list_limit == 0 {
            bail!("{TOOL_LIST_LIMIT_VAR} must be greater than zero");
        }
        Ok(())
    }
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = NexusConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, NexusConfig::default());
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.tool_list_limit, 10);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_overrides() {
        let config = NexusConfig::from_lookup(lookup(&[
            (LOW_STOCK_THRESHOLD_VAR, " 25 "),
            (PAGE_SIZE_VAR, "50"),
            (TOOL_LIST_LIMIT_VAR, "3"),
            (LOG_VAR, "nexus=debug"),
        ]))
        .unwrap();
        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.tool_list_limit, 3);
        assert_eq!(config.log_filter, "nexus=debug");
    }

    #[test]
    fn blank_means_default() {
        let config = NexusConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "  ")])).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn unparsable_value_names_the_variable() {
        let err = NexusConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "lots")])).unwrap_err();
        assert!(err.to_string().contains(PAGE_SIZE_VAR));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(NexusConfig::from_lookup(lookup(&[(LOW_STOCK_THRESHOLD_VAR, "-1")])).is_err());
        assert!(NexusConfig::from_lookup(lookup(&[(TOOL_LIST_LIMIT_VAR, "0")])).is_err());
    }
}
