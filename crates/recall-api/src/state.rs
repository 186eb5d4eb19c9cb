use axum::extract::FromRef;
use recall_gateway::Gateway;

use crate::{ApiConfig, config::Environment};

/// Shared application state.
///
/// The Gateway handle is the only long-lived value shared across requests.
/// It is immutable after construction; each request scopes its own data
/// call with the caller's bearer token.
#[derive(Clone)]
pub struct ApiState {
    pub gateway: Gateway,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let gateway = Gateway::new(
            &config.supabase_url,
            config.supabase_service_role_key.clone(),
        )?;

        Ok(Self {
            gateway,
            environment: config.env.clone(),
        })
    }
}

impl FromRef<ApiState> for Gateway {
    fn from_ref(state: &ApiState) -> Self {
        state.gateway.clone()
    }
}
