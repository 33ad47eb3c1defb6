//! Lifecycle integration tests: registration ordering, drain behavior, and
//! the end-to-end register/serve/deregister scenario.

use std::sync::Arc;
use std::time::{Duration, Instant};

use herald::config::ServiceConfig;
use herald::lifecycle::{Coordinator, LifecycleError};
use herald::observability::NullSink;

mod common;

use common::{RecordingRegistry, RegistryEvent, RejectingRegistry};

fn test_config(port: u16, grace_secs: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.service.name = "mytest".to_string();
    config.service.port = port;
    config.resolver.advertise = Some("10.0.0.5".parse().unwrap());
    config.shutdown.grace_period_secs = grace_secs;
    config
}

fn probe_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn end_to_end_register_serve_deregister() {
    let registry = Arc::new(RecordingRegistry::new());
    let coordinator = Coordinator::new(
        test_config(9001, 5),
        registry.clone(),
        Arc::new(NullSink),
        None,
    );
    let shutdown = coordinator.shutdown_handle();

    let run = tokio::spawn(coordinator.run());

    let client = probe_client();
    common::wait_until_healthy(&client, "http://127.0.0.1:9001/health", Duration::from_secs(5))
        .await;

    // Registered exactly once, with the advertised address and port.
    let events = registry.events();
    let registered_id = match events.as_slice() {
        [RegistryEvent::Registered { id, address, port }] => {
            assert_eq!(address, &"10.0.0.5".parse::<std::net::IpAddr>().unwrap());
            assert_eq!(*port, 9001);
            id.clone()
        }
        other => panic!("expected exactly one registration, got {other:?}"),
    };
    assert!(registered_id.starts_with("mytest-"));

    let health = client
        .get("http://127.0.0.1:9001/health")
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert_eq!(health.text().await.unwrap(), "ok");

    let hello = client.get("http://127.0.0.1:9001/").send().await.unwrap();
    assert_eq!(hello.text().await.unwrap(), "hello world");

    let triggered_at = Instant::now();
    shutdown.trigger();
    run.await.unwrap().unwrap();

    // Drain completed well within the configured grace period.
    assert!(triggered_at.elapsed() < Duration::from_secs(5));

    // Deregistered with the same id, leaving no record behind.
    assert_eq!(
        registry.events().as_slice(),
        [
            RegistryEvent::Registered {
                id: registered_id.clone(),
                address: "10.0.0.5".parse().unwrap(),
                port: 9001,
            },
            RegistryEvent::Deregistered { id: registered_id },
        ]
    );
    assert!(registry.active_records().is_empty());
}

#[tokio::test]
async fn deregister_is_ordered_before_listener_close() {
    // Deregistration held in flight for 300ms: the listener must still be
    // answering the probe during that window.
    let registry = Arc::new(RecordingRegistry::with_deregister_delay(
        Duration::from_millis(300),
    ));
    let coordinator = Coordinator::new(
        test_config(29101, 5),
        registry.clone(),
        Arc::new(NullSink),
        None,
    );
    let shutdown = coordinator.shutdown_handle();

    let run = tokio::spawn(coordinator.run());

    let client = probe_client();
    let health_url = "http://127.0.0.1:29101/health";
    common::wait_until_healthy(&client, health_url, Duration::from_secs(5)).await;

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Mid-deregistration: not yet deregistered, probe still answered.
    assert_eq!(registry.events().len(), 1, "deregistration finished too early");
    let health = client.get(health_url).send().await.unwrap();
    assert_eq!(health.status(), 200);

    run.await.unwrap().unwrap();

    // Deregistration strictly precedes listener close.
    assert!(matches!(
        registry.events().as_slice(),
        [RegistryEvent::Registered { .. }, RegistryEvent::Deregistered { .. }]
    ));
    assert!(
        client.get(health_url).send().await.is_err(),
        "listener should be closed after the lifecycle completes"
    );
}

#[tokio::test]
async fn registration_failure_is_fatal() {
    let coordinator = Coordinator::new(
        test_config(29201, 5),
        Arc::new(RejectingRegistry),
        Arc::new(NullSink),
        None,
    );

    let error = coordinator.run().await.unwrap_err();
    assert!(matches!(error, LifecycleError::Registration(_)));

    // Nothing was bound.
    assert!(probe_client()
        .get("http://127.0.0.1:29201/health")
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn bind_failure_deregisters_before_failing() {
    // Occupy the port so the coordinator's bind fails after registration.
    let _occupant = tokio::net::TcpListener::bind("0.0.0.0:29301").await.unwrap();

    let registry = Arc::new(RecordingRegistry::new());
    let coordinator = Coordinator::new(
        test_config(29301, 5),
        registry.clone(),
        Arc::new(NullSink),
        None,
    );

    let error = coordinator.run().await.unwrap_err();
    assert!(matches!(error, LifecycleError::ListenerStart(_)));

    // No partial state: the record created before the bind failure is gone.
    assert!(matches!(
        registry.events().as_slice(),
        [RegistryEvent::Registered { .. }, RegistryEvent::Deregistered { .. }]
    ));
    assert!(registry.active_records().is_empty());
}
