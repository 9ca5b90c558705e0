use crate::adapters::{crazy_air, tough_jet};
use crate::utils::error::{FlightSearchError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub http: Option<HttpConfig>,
    #[serde(default)]
    pub suppliers: Vec<SupplierConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplierKind {
    CrazyAir,
    ToughJet,
}

impl SupplierKind {
    pub fn default_name(self) -> &'static str {
        match self {
            SupplierKind::CrazyAir => crazy_air::DEFAULT_NAME,
            SupplierKind::ToughJet => tough_jet::DEFAULT_NAME,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    pub kind: SupplierKind,
    pub name: Option<String>,
    pub base_url: String,
    pub enabled: Option<bool>,
}

impl SupplierConfig {
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.kind.default_name())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlightSearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlightSearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlightSearchError::ConfigError {
            message: format!("env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;

        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validate_range("http.timeout_seconds", timeout, 1, 120)?;
        }

        let mut seen = HashSet::new();
        for (index, supplier) in self.enabled_suppliers().enumerate() {
            let field = format!("suppliers[{}]", index);
            validate_non_empty_string(&format!("{}.name", field), supplier.name())?;
            validate_url(&format!("{}.base_url", field), &supplier.base_url)?;

            if !seen.insert(supplier.name()) {
                return Err(FlightSearchError::InvalidConfigValueError {
                    field: format!("{}.name", field),
                    value: supplier.name().to_string(),
                    reason: "Supplier names must be unique".to_string(),
                });
            }
        }

        if seen.is_empty() {
            return Err(FlightSearchError::MissingConfigError {
                field: "suppliers (at least one enabled supplier)".to_string(),
            });
        }

        Ok(())
    }

    /// Enabled suppliers in file order, which is also their registration order.
    pub fn enabled_suppliers(&self) -> impl Iterator<Item = &SupplierConfig> {
        self.suppliers.iter().filter(|s| s.is_enabled())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.http.as_ref().and_then(|h| h.user_agent.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
