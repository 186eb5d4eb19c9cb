use std::env;

/// Deployment environment, selected by `APP_ENV`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// True everywhere except production.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub env: Environment,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")?,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")?,
            port,
            allowed_origins,
            env: Environment::from_env(),
        })
    }
}
