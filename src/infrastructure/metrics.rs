// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 未启用时不安装任何记录器，`counter!` 调用成为空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address {}: {}",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("cache_hits_total", "Total number of cache hits per named cache");
    describe_counter!(
        "cache_misses_total",
        "Total number of cache misses per named cache"
    );
    describe_counter!(
        "cache_errors_total",
        "Total number of cache backend failures that fell through to the repository"
    );
    describe_counter!("orders_created_total", "Total number of orders created");
    describe_counter!("orders_deleted_total", "Total number of orders deleted");
    describe_counter!(
        "products_changed_total",
        "Total number of product create/update/delete operations"
    );

    info!("Metrics exporter listening on {}", addr);
}
