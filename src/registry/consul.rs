//! Consul agent implementation of the registry capability.
//!
//! Talks to the local agent's HTTP API:
//! - `PUT /v1/agent/service/register`
//! - `PUT /v1/agent/service/deregister/{id}`

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::config::RegistryConfig;
use crate::registry::{RegistryError, ServiceInstance, ServiceRegistry};

/// Registry client backed by a Consul-compatible agent.
pub struct ConsulRegistry {
    http: reqwest::Client,
    base: Url,
}

impl ConsulRegistry {
    /// Build a client for the agent at `config.address`.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let base = Url::parse(&config.address)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, base })
    }
}

#[async_trait]
impl ServiceRegistry for ConsulRegistry {
    async fn register(&self, instance: &ServiceInstance) -> Result<(), RegistryError> {
        let url = self.base.join("v1/agent/service/register")?;
        let payload = RegisterPayload::from(instance);

        tracing::debug!(id = %instance.id, url = %url, "Submitting registration");

        let response = self.http.put(url).json(&payload).send().await?;
        ensure_success(response).await
    }

    async fn deregister(&self, id: &str) -> Result<(), RegistryError> {
        let url = self.base.join(&format!("v1/agent/service/deregister/{id}"))?;

        tracing::debug!(id = %id, url = %url, "Submitting deregistration");

        let response = self.http.put(url).send().await?;
        ensure_success(response).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<(), RegistryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(RegistryError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Wire format of the agent's service registration endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RegisterPayload<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    name: &'a str,
    address: String,
    port: u16,
    check: CheckPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CheckPayload {
    #[serde(rename = "HTTP")]
    http: String,
    interval: String,
    timeout: String,
    deregister_critical_service_after: String,
}

impl<'a> From<&'a ServiceInstance> for RegisterPayload<'a> {
    fn from(instance: &'a ServiceInstance) -> Self {
        let check = &instance.health_check;
        Self {
            id: &instance.id,
            name: &instance.name,
            address: instance.address.to_string(),
            port: instance.port,
            check: CheckPayload {
                http: check.endpoint_url.clone(),
                interval: consul_duration(check.interval),
                timeout: consul_duration(check.timeout),
                deregister_critical_service_after: consul_duration(check.deregister_critical_after),
            },
        }
    }
}

/// Consul duration strings: whole seconds with an "s" suffix.
fn consul_duration(duration: Duration) -> String {
    format!("{}s", duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthCheckConfig;

    #[test]
    fn payload_uses_agent_api_field_names() {
        let instance = ServiceInstance::new(
            "orders",
            "10.0.0.5".parse().unwrap(),
            9001,
            &HealthCheckConfig::default(),
        );
        let payload = serde_json::to_value(RegisterPayload::from(&instance)).unwrap();

        assert_eq!(payload["ID"], instance.id);
        assert_eq!(payload["Name"], "orders");
        assert_eq!(payload["Address"], "10.0.0.5");
        assert_eq!(payload["Port"], 9001);
        assert_eq!(payload["Check"]["HTTP"], "http://10.0.0.5:9001/health");
        assert_eq!(payload["Check"]["Interval"], "5s");
        assert_eq!(payload["Check"]["Timeout"], "10s");
        assert_eq!(payload["Check"]["DeregisterCriticalServiceAfter"], "60s");
    }

    #[test]
    fn rejects_unparseable_agent_address() {
        let config = RegistryConfig {
            address: "http://".to_string(),
            ..RegistryConfig::default()
        };
        assert!(matches!(
            ConsulRegistry::new(&config),
            Err(RegistryError::Address(_))
        ));
    }

    #[test]
    fn duration_formatting_is_whole_seconds() {
        assert_eq!(consul_duration(Duration::from_secs(90)), "90s");
        assert_eq!(consul_duration(Duration::from_millis(1500)), "1s");
    }
}
