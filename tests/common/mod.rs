//! Shared utilities for lifecycle integration testing.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use herald::registry::{RegistryError, ServiceInstance, ServiceRegistry};

/// One call observed by the recording registry, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Registered {
        id: String,
        address: IpAddr,
        port: u16,
    },
    Deregistered {
        id: String,
    },
}

/// In-memory registry double that records every call.
///
/// `deregister_delay` holds the deregistration in flight for a while so
/// tests can observe what the service does during that window.
pub struct RecordingRegistry {
    events: Mutex<Vec<RegistryEvent>>,
    records: Mutex<HashMap<String, (IpAddr, u16)>>,
    deregister_delay: Duration,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::with_deregister_delay(Duration::ZERO)
    }

    pub fn with_deregister_delay(delay: Duration) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            records: Mutex::new(HashMap::new()),
            deregister_delay: delay,
        }
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Ids currently registered (registered and not yet deregistered).
    pub fn active_records(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ServiceRegistry for RecordingRegistry {
    async fn register(&self, instance: &ServiceInstance) -> Result<(), RegistryError> {
        self.records
            .lock()
            .unwrap()
            .insert(instance.id.clone(), (instance.address, instance.port));
        self.events.lock().unwrap().push(RegistryEvent::Registered {
            id: instance.id.clone(),
            address: instance.address,
            port: instance.port,
        });
        Ok(())
    }

    async fn deregister(&self, id: &str) -> Result<(), RegistryError> {
        if !self.deregister_delay.is_zero() {
            tokio::time::sleep(self.deregister_delay).await;
        }
        self.records.lock().unwrap().remove(id);
        self.events
            .lock()
            .unwrap()
            .push(RegistryEvent::Deregistered { id: id.to_string() });
        Ok(())
    }
}

/// Registry double whose registration always fails.
pub struct RejectingRegistry;

#[async_trait]
impl ServiceRegistry for RejectingRegistry {
    async fn register(&self, _instance: &ServiceInstance) -> Result<(), RegistryError> {
        Err(RegistryError::Rejected {
            status: 503,
            body: "agent unavailable".to_string(),
        })
    }

    async fn deregister(&self, _id: &str) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Poll `url` until it answers 200 or `deadline` elapses.
pub async fn wait_until_healthy(client: &reqwest::Client, url: &str, deadline: Duration) {
    let started = std::time::Instant::now();
    loop {
        if let Ok(response) = client.get(url).send().await {
            if response.status().is_success() {
                return;
            }
        }
        assert!(
            started.elapsed() < deadline,
            "service did not become healthy at {url} within {deadline:?}"
        );
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}
