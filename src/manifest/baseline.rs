//! Fixed baseline templates.
//!
//! Each run builds a fresh copy of these documents; the baseline itself is
//! never mutated, so the diagnosis engine can always re-derive "what the
//! clean template would have had".

use serde_json::json;

use crate::core::config::ScenarioConfig;
use crate::manifest::doc::{DocKind, DocumentSet, ManifestDoc};

/// Canonical readiness endpoint the workload serves.
pub const HEALTH_PATH: &str = "/health";
/// Port the container listens on.
pub const CONTAINER_PORT: i64 = 80;
/// Name of the workload volume that mounts the claim.
pub const VOLUME_NAME: &str = "webroot";
/// ConfigMap name the `env_missing_key` fault references. No such ConfigMap
/// is ever rendered, which is exactly what makes the reference a fault.
pub const ABSENT_CONFIG_MAP: &str = "app-config";
/// Key inside the absent ConfigMap.
pub const ABSENT_CONFIG_KEY: &str = "welcome";

/// Build the clean document set for one scenario.
#[must_use]
pub fn baseline_set(scenario: &ScenarioConfig) -> DocumentSet {
    let ns = &scenario.namespace;
    let app = &scenario.app_name;
    let claim = &scenario.claim_name;

    let namespace = ManifestDoc::new(
        DocKind::Namespace,
        json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": {"name": ns},
        }),
    );

    let workload = ManifestDoc::new(
        DocKind::Workload,
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": app, "namespace": ns},
            "spec": {
                "replicas": 1,
                "selector": {"matchLabels": {"app": app}},
                "template": {
                    "metadata": {"labels": {"app": app}},
                    "spec": {
                        "containers": [{
                            "name": app,
                            "image": "nginx:1.27-alpine",
                            "ports": [{"containerPort": CONTAINER_PORT}],
                            "readinessProbe": {
                                "httpGet": {"path": HEALTH_PATH, "port": CONTAINER_PORT},
                                "initialDelaySeconds": 2,
                                "periodSeconds": 5,
                            },
                            "volumeMounts": [{
                                "name": VOLUME_NAME,
                                "mountPath": "/usr/share/nginx/html",
                            }],
                        }],
                        "volumes": [{
                            "name": VOLUME_NAME,
                            "persistentVolumeClaim": {"claimName": claim},
                        }],
                    },
                },
            },
        }),
    );

    let service = ManifestDoc::new(
        DocKind::Service,
        json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": app, "namespace": ns},
            "spec": {
                "selector": {"app": app},
                "ports": [{
                    "protocol": "TCP",
                    "port": CONTAINER_PORT,
                    "targetPort": CONTAINER_PORT,
                }],
            },
        }),
    );

    let volume_claim = ManifestDoc::new(
        DocKind::VolumeClaim,
        json!({
            "apiVersion": "v1",
            "kind": "PersistentVolumeClaim",
            "metadata": {"name": claim, "namespace": ns},
            "spec": {
                "accessModes": ["ReadWriteOnce"],
                "resources": {"requests": {"storage": "1Gi"}},
            },
        }),
    );

    DocumentSet {
        namespace,
        workload,
        service,
        volume_claim,
        network_policy: None,
    }
}
