use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:8080,http://127.0.0.1:3000,http://127.0.0.1:3001";

#[derive(Debug, Clone)]
pub struct CookingConfig {
    pub common: core_config::Config,
    pub environment: String,
    pub ai: AiConfig,
    pub google_maps_api_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
}

/// Requested generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    OpenAi,
    Mock,
    /// Gemini if keyed, else OpenAI if keyed, else mock.
    Auto,
}

impl FromStr for AiProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(AiProvider::Gemini),
            "openai" => Ok(AiProvider::OpenAi),
            "mock" => Ok(AiProvider::Mock),
            "auto" | "" => Ok(AiProvider::Auto),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "AI_PROVIDER must be one of gemini, openai, mock, auto (got '{}')",
                other
            ))),
        }
    }
}

/// Backend resolved from [`AiConfig`], with the credentials it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderChoice {
    Gemini { api_key: String, model: String },
    OpenAi { api_key: String, model: String },
    Mock,
}

impl AiConfig {
    pub fn resolve(&self) -> Result<ProviderChoice, AppError> {
        let gemini = || {
            self.gemini_api_key.clone().map(|api_key| ProviderChoice::Gemini {
                api_key,
                model: self.gemini_model.clone(),
            })
        };
        let openai = || {
            self.openai_api_key.clone().map(|api_key| ProviderChoice::OpenAi {
                api_key,
                model: self.openai_model.clone(),
            })
        };

        match self.provider {
            AiProvider::Gemini => gemini().ok_or_else(|| missing("GEMINI_API_KEY", "gemini")),
            AiProvider::OpenAi => openai().ok_or_else(|| missing("OPENAI_API_KEY", "openai")),
            AiProvider::Mock => Ok(ProviderChoice::Mock),
            AiProvider::Auto => Ok(gemini().or_else(openai).unwrap_or(ProviderChoice::Mock)),
        }
    }
}

fn missing(key: &str, provider: &str) -> AppError {
    AppError::ConfigError(anyhow::anyhow!(
        "{} is required when AI_PROVIDER={}",
        key,
        provider
    ))
}

impl CookingConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string());
        let is_prod = environment == "prod";

        let cors = get_env(&lookup, "CORS_ALLOWED_ORIGINS", Some(DEFAULT_CORS_ORIGINS), is_prod)?;
        let cors_allowed_origins = cors
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(CookingConfig {
            common,
            ai: AiConfig {
                provider: get_env(&lookup, "AI_PROVIDER", Some("auto"), false)?.parse()?,
                gemini_api_key: lookup("GEMINI_API_KEY"),
                gemini_model: get_env(&lookup, "GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), false)?,
                openai_api_key: lookup("OPENAI_API_KEY"),
                openai_model: get_env(&lookup, "OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL), false)?,
            },
            google_maps_api_key: lookup("GOOGLE_MAPS_API_KEY"),
            cors_allowed_origins,
            log_level: get_env(&lookup, "LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: lookup("OTLP_ENDPOINT"),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "prod"
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
