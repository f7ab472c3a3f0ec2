//! Injector/detector bodies for every cataloged fault.
//!
//! Each fault is one block: injector, detector, issue text, remediation.
//! Pointer constants are shared between the halves so the field an injector
//! bends is the same field its detector inspects.

use serde_json::{Value, json};

use super::{FaultId, FaultSpec};
use crate::core::errors::{DrillError, Result};
use crate::manifest::baseline::{ABSENT_CONFIG_KEY, ABSENT_CONFIG_MAP, HEALTH_PATH};
use crate::manifest::{DocKind, DocumentSet, ManifestDoc};

const LABEL_PTR: &str = "/spec/template/metadata/labels/app";
const SELECTOR_PTR: &str = "/spec/selector/app";
const CONTAINER_PORT_PTR: &str = "/spec/template/spec/containers/0/ports/0/containerPort";
const TARGET_PORT_PTR: &str = "/spec/ports/0/targetPort";
const PROBE_PATH_PTR: &str = "/spec/template/spec/containers/0/readinessProbe/httpGet/path";
const PROBE_DELAY_PTR: &str =
    "/spec/template/spec/containers/0/readinessProbe/initialDelaySeconds";
const PROBE_PERIOD_PTR: &str = "/spec/template/spec/containers/0/readinessProbe/periodSeconds";
const ENV_PTR: &str = "/spec/template/spec/containers/0/env";
const VOLUMES_PTR: &str = "/spec/template/spec/volumes";
const CLAIM_NAME_PTR: &str = "/spec/template/spec/volumes/0/persistentVolumeClaim/claimName";
const STORAGE_CLASS_PTR: &str = "/spec/storageClassName";

/// The single source of truth both engines project from.
pub const CATALOG: [FaultSpec; 7] = [
    FaultSpec {
        id: FaultId::SvcSelectorMismatch,
        summary: "Service selector diverges from the pod-template label",
        inject: inject_selector_mismatch,
        detect: detect_selector_mismatch,
        issue: issue_selector_mismatch,
        remedy: &[
            "Fix the Service selector to match the Pod labels:",
            "  kubectl -n kbox patch svc app --type='json' \
             -p='[{\"op\":\"replace\",\"path\":\"/spec/selector/app\",\"value\":\"app\"}]'",
        ],
    },
    FaultSpec {
        id: FaultId::TargetportMismatch,
        summary: "Service targetPort disagrees with the container port",
        inject: inject_targetport_mismatch,
        detect: detect_targetport_mismatch,
        issue: issue_targetport_mismatch,
        remedy: &[
            "Set the Service targetPort to the container's declared port:",
            "  kubectl -n kbox patch svc app --type='json' \
             -p='[{\"op\":\"replace\",\"path\":\"/spec/ports/0/targetPort\",\"value\":80}]'",
        ],
    },
    FaultSpec {
        id: FaultId::BadReadinessProbe,
        summary: "Readiness probe points at the wrong path or fires too early",
        inject: inject_bad_readiness_probe,
        detect: detect_bad_readiness_probe,
        issue: issue_bad_readiness_probe,
        remedy: &[
            "Patch the readiness probe back to the served path and sane timing:",
            "  kubectl -n kbox patch deploy app --type='json' -p='[",
            "    {\"op\":\"replace\",\"path\":\"/spec/template/spec/containers/0/readinessProbe/httpGet/path\",\"value\":\"/health\"},",
            "    {\"op\":\"replace\",\"path\":\"/spec/template/spec/containers/0/readinessProbe/initialDelaySeconds\",\"value\":2},",
            "    {\"op\":\"replace\",\"path\":\"/spec/template/spec/containers/0/readinessProbe/periodSeconds\",\"value\":5}",
            "  ]'",
        ],
    },
    FaultSpec {
        id: FaultId::DefaultDenyNp,
        summary: "A default-deny NetworkPolicy blocks all traffic",
        inject: inject_default_deny_np,
        detect: detect_default_deny_np,
        issue: issue_default_deny_np,
        remedy: &[
            "Allow ingress to the app from its own namespace:",
            "  kubectl -n kbox apply -f - <<'YAML'",
            "  apiVersion: networking.k8s.io/v1",
            "  kind: NetworkPolicy",
            "  metadata: { name: allow-same-ns }",
            "  spec:",
            "    podSelector: { matchLabels: { app: app } }",
            "    ingress:",
            "    - from: [ { podSelector: {} } ]",
            "      ports: [ { protocol: TCP, port: 80 } ]",
            "  YAML",
        ],
    },
    FaultSpec {
        id: FaultId::EnvMissingKey,
        summary: "Container env references a ConfigMap key that does not exist",
        inject: inject_env_missing_key,
        detect: detect_env_missing_key,
        issue: issue_env_missing_key,
        remedy: &[
            "Create the expected ConfigMap key (or drop the env reference):",
            "  kubectl -n kbox create configmap app-config --from-literal=welcome='hello' \
             --dry-run=client -o yaml | kubectl apply -f -",
        ],
    },
    FaultSpec {
        id: FaultId::ClaimrefMismatch,
        summary: "Workload volume references a near-miss of the real claim name",
        inject: inject_claimref_mismatch,
        detect: detect_claimref_mismatch,
        issue: issue_claimref_mismatch,
        remedy: &[
            "Point the Deployment volume at the real claim and roll out:",
            "  kubectl -n kbox patch deploy app --type='json' \
             -p='[{\"op\":\"replace\",\"path\":\"/spec/template/spec/volumes/0/persistentVolumeClaim/claimName\",\"value\":\"app-pvc\"}]'",
        ],
    },
    FaultSpec {
        id: FaultId::PvcUnknownSc,
        summary: "PVC requests a storage class no provisioner serves",
        inject: inject_pvc_unknown_sc,
        detect: detect_pvc_unknown_sc,
        issue: issue_pvc_unknown_sc,
        remedy: &[
            "Remove the unknown storageClassName so the default class binds:",
            "  kubectl -n kbox patch pvc app-pvc --type='json' \
             -p='[{\"op\":\"remove\",\"path\":\"/spec/storageClassName\"}]'",
            "  (a bound PVC may need delete + re-apply)",
        ],
    },
];

const fn drift(id: FaultId, kind: DocKind, pointer: &'static str) -> DrillError {
    DrillError::CatalogDrift {
        fault: id.as_str(),
        document: kind.label(),
        pointer,
    }
}

// --- svc_selector_mismatch ------------------------------------------------

fn inject_selector_mismatch(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::SvcSelectorMismatch;
    let label = docs
        .workload
        .get_str(LABEL_PTR)
        .ok_or(drift(id, DocKind::Workload, LABEL_PTR))?;
    // Near-miss of the real value, so the mismatch survives renamed apps.
    let near_miss = format!("{label}p");
    if !docs.service.set(SELECTOR_PTR, json!(near_miss)) {
        return Err(drift(id, DocKind::Service, SELECTOR_PTR));
    }
    Ok(())
}

fn detect_selector_mismatch(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    match (
        observed.workload.get_str(LABEL_PTR),
        observed.service.get_str(SELECTOR_PTR),
    ) {
        (Some(label), Some(selector)) => label != selector,
        _ => false,
    }
}

fn issue_selector_mismatch(observed: &DocumentSet) -> String {
    let label = observed.workload.get_str(LABEL_PTR).unwrap_or("?");
    let selector = observed.service.get_str(SELECTOR_PTR).unwrap_or("?");
    format!(
        "Service selector ('{selector}') does not match the Pod label ('{label}'); \
         the Service has no endpoints."
    )
}

// --- targetport_mismatch ---------------------------------------------------

fn inject_targetport_mismatch(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::TargetportMismatch;
    let container_port = docs
        .workload
        .get_i64(CONTAINER_PORT_PTR)
        .ok_or(drift(id, DocKind::Workload, CONTAINER_PORT_PTR))?;
    let wrong_port = if container_port == 8080 { 9090 } else { 8080 };
    if !docs.service.set(TARGET_PORT_PTR, json!(wrong_port)) {
        return Err(drift(id, DocKind::Service, TARGET_PORT_PTR));
    }
    Ok(())
}

fn detect_targetport_mismatch(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    // targetPort may be numeric or a named port; compare canonical strings.
    match (
        observed.workload.get_scalar_string(CONTAINER_PORT_PTR),
        observed.service.get_scalar_string(TARGET_PORT_PTR),
    ) {
        (Some(cport), Some(tport)) => cport != tport,
        _ => false,
    }
}

fn issue_targetport_mismatch(observed: &DocumentSet) -> String {
    let cport = observed
        .workload
        .get_scalar_string(CONTAINER_PORT_PTR)
        .unwrap_or_else(|| "?".to_string());
    let tport = observed
        .service
        .get_scalar_string(TARGET_PORT_PTR)
        .unwrap_or_else(|| "?".to_string());
    format!("Service targetPort ({tport}) != containerPort ({cport}).")
}

// --- bad_readiness_probe ---------------------------------------------------

fn inject_bad_readiness_probe(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::BadReadinessProbe;
    for (pointer, value) in [
        (PROBE_PATH_PTR, json!("/readyz")),
        (PROBE_DELAY_PTR, json!(0)),
        (PROBE_PERIOD_PTR, json!(2)),
    ] {
        if !docs.workload.set(pointer, value) {
            return Err(drift(id, DocKind::Workload, pointer));
        }
    }
    Ok(())
}

fn detect_bad_readiness_probe(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    // No probe at all means the precondition does not hold.
    let Some(path) = observed.workload.get_str(PROBE_PATH_PTR) else {
        return false;
    };
    let delay = observed.workload.get_i64(PROBE_DELAY_PTR).unwrap_or(0);
    path != HEALTH_PATH || delay < 1
}

fn issue_bad_readiness_probe(observed: &DocumentSet) -> String {
    let path = observed.workload.get_str(PROBE_PATH_PTR).unwrap_or("?");
    let delay = observed.workload.get_i64(PROBE_DELAY_PTR).unwrap_or(0);
    format!("Readiness probe is misconfigured (path='{path}', initial delay={delay}s).")
}

// --- default_deny_np ---------------------------------------------------------

fn inject_default_deny_np(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::DefaultDenyNp;
    let namespace = docs
        .namespace
        .name()
        .ok_or(drift(id, DocKind::Namespace, "/metadata/name"))?;
    docs.network_policy = Some(ManifestDoc::new(
        DocKind::NetworkPolicy,
        json!({
            "apiVersion": "networking.k8s.io/v1",
            "kind": "NetworkPolicy",
            "metadata": {"name": "default-deny", "namespace": namespace},
            "spec": {"podSelector": {}, "policyTypes": ["Ingress", "Egress"]},
        }),
    ));
    Ok(())
}

fn detect_default_deny_np(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    observed.network_policy.as_ref().is_some_and(|np| {
        np.get_str("/kind") == Some("NetworkPolicy")
            && np
                .get("/spec/podSelector")
                .and_then(Value::as_object)
                .is_some_and(serde_json::Map::is_empty)
    })
}

fn issue_default_deny_np(observed: &DocumentSet) -> String {
    let name = observed
        .network_policy
        .as_ref()
        .and_then(ManifestDoc::name)
        .unwrap_or("default-deny");
    format!(
        "NetworkPolicy '{name}' selects every pod and lists both directions; \
         all traffic is denied."
    )
}

// --- env_missing_key ---------------------------------------------------------

fn inject_env_missing_key(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::EnvMissingKey;
    let entry = json!({
        "name": "WELCOME_MSG",
        "valueFrom": {
            "configMapKeyRef": {"name": ABSENT_CONFIG_MAP, "key": ABSENT_CONFIG_KEY},
        },
    });
    if let Some(Value::Array(env)) = docs.workload.get_mut(ENV_PTR) {
        env.push(entry);
        return Ok(());
    }
    // No env list yet: create one on the container.
    if !docs.workload.set(ENV_PTR, json!([entry])) {
        return Err(drift(id, DocKind::Workload, ENV_PTR));
    }
    Ok(())
}

fn detect_env_missing_key(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    observed
        .workload
        .get(ENV_PTR)
        .and_then(Value::as_array)
        .is_some_and(|env| {
            env.iter().any(|entry| {
                entry
                    .pointer("/valueFrom/configMapKeyRef/name")
                    .and_then(Value::as_str)
                    == Some(ABSENT_CONFIG_MAP)
            })
        })
}

fn issue_env_missing_key(_observed: &DocumentSet) -> String {
    format!(
        "Container env references key '{ABSENT_CONFIG_KEY}' of ConfigMap \
         '{ABSENT_CONFIG_MAP}', which does not exist; pods cannot start."
    )
}

// --- claimref_mismatch -------------------------------------------------------

fn inject_claimref_mismatch(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::ClaimrefMismatch;
    let actual = docs
        .volume_claim
        .name()
        .ok_or(drift(id, DocKind::VolumeClaim, "/metadata/name"))?;
    let near_miss = format!("{actual}c");
    if !docs.workload.set(CLAIM_NAME_PTR, json!(near_miss)) {
        return Err(drift(id, DocKind::Workload, CLAIM_NAME_PTR));
    }
    Ok(())
}

fn detect_claimref_mismatch(observed: &DocumentSet, _baseline: &DocumentSet) -> bool {
    let Some(actual) = observed.volume_claim.name() else {
        return false;
    };
    observed
        .workload
        .get(VOLUMES_PTR)
        .and_then(Value::as_array)
        .is_some_and(|volumes| {
            volumes.iter().any(|volume| {
                volume
                    .pointer("/persistentVolumeClaim/claimName")
                    .and_then(Value::as_str)
                    .is_some_and(|referenced| referenced != actual)
            })
        })
}

fn issue_claimref_mismatch(observed: &DocumentSet) -> String {
    let actual = observed.volume_claim.name().unwrap_or("?");
    let referenced = observed.workload.get_str(CLAIM_NAME_PTR).unwrap_or("?");
    format!("Deployment mounts claimName '{referenced}' but the PVC is named '{actual}'.")
}

// --- pvc_unknown_sc ----------------------------------------------------------

fn inject_pvc_unknown_sc(docs: &mut DocumentSet) -> Result<()> {
    let id = FaultId::PvcUnknownSc;
    if !docs.volume_claim.set(STORAGE_CLASS_PTR, json!("fast")) {
        return Err(drift(id, DocKind::VolumeClaim, STORAGE_CLASS_PTR));
    }
    Ok(())
}

fn detect_pvc_unknown_sc(observed: &DocumentSet, baseline: &DocumentSet) -> bool {
    // The one differential detector: the clean template carries no
    // storageClassName, so any divergence from it is the injected fault.
    observed.volume_claim.get_str(STORAGE_CLASS_PTR)
        != baseline.volume_claim.get_str(STORAGE_CLASS_PTR)
}

fn issue_pvc_unknown_sc(observed: &DocumentSet) -> String {
    let class = observed
        .volume_claim
        .get_str(STORAGE_CLASS_PTR)
        .unwrap_or("?");
    format!("PVC requests storageClassName '{class}'; no such class exists, so it never binds.")
}
