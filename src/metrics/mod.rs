use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry};

lazy_static! {
    pub static ref ACTIVE_PROJECT_WATCHERS: IntGauge = IntGauge::new(
        "active_project_watchers",
        "Number of project watch streams currently running"
    )
    .expect("metric can not be created");

    pub static ref PROJECT_WATCH_EVENTS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "project_watch_events",
            "Events forwarded to project watch consumers"
        ),
        &["kind"]
    )
    .expect("metric can not be created");

    pub static ref SLOW_WATCHER_TERMINATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "slow_project_watcher_terminations",
            "Watch streams terminated because the consumer could not keep up"
        ),
        &["principal"]
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

pub fn register_custom_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_PROJECT_WATCHERS.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(PROJECT_WATCH_EVENTS.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(SLOW_WATCHER_TERMINATIONS.clone()))
        .expect("collector can be registered");
}

/// Export metrics for Prometheus to scrape
pub fn get_metrics_body() -> String {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        eprintln!("could not encode custom metrics: {}", e);
    };
    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("custom metrics could not be from_utf8'd: {}", e);
            String::default()
        }
    }
}
