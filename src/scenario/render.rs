//! YAML rendering of a document set to and from a directory on disk.
//!
//! File names match what trainees apply with `kubectl apply -f .`:
//! `ns.yaml`, `app-deploy.yaml`, `app-svc.yaml`, `pvc.yaml`, and `np.yaml`
//! when a network-policy fault created one.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::errors::{DrillError, Result};
use crate::manifest::{DocKind, DocumentSet, ManifestDoc};

pub const NAMESPACE_FILE: &str = "ns.yaml";
pub const WORKLOAD_FILE: &str = "app-deploy.yaml";
pub const SERVICE_FILE: &str = "app-svc.yaml";
pub const CLAIM_FILE: &str = "pvc.yaml";
pub const POLICY_FILE: &str = "np.yaml";
pub const BRIEF_FILE: &str = "BRIEF.md";

/// Manifest file names in apply order, policy last when present.
#[must_use]
pub fn manifest_names(docs: &DocumentSet) -> Vec<&'static str> {
    let mut names = vec![NAMESPACE_FILE, CLAIM_FILE, WORKLOAD_FILE, SERVICE_FILE];
    if docs.network_policy.is_some() {
        names.push(POLICY_FILE);
    }
    names
}

/// Write the document set into `dir`, replacing any previous drill.
///
/// Stale files from an earlier run are removed first so a scenario without a
/// network policy does not inherit one from the previous seed.
pub fn write_document_set(dir: &Path, docs: &DocumentSet) -> Result<()> {
    clear_previous_drill(dir)?;
    write_doc(dir, NAMESPACE_FILE, &docs.namespace)?;
    write_doc(dir, WORKLOAD_FILE, &docs.workload)?;
    write_doc(dir, SERVICE_FILE, &docs.service)?;
    write_doc(dir, CLAIM_FILE, &docs.volume_claim)?;
    if let Some(policy) = &docs.network_policy {
        write_doc(dir, POLICY_FILE, policy)?;
    }
    Ok(())
}

/// Write the trainee brief next to the manifests.
pub fn write_brief(dir: &Path, contents: &str) -> Result<()> {
    let path = dir.join(BRIEF_FILE);
    fs::write(&path, contents).map_err(|source| DrillError::io(path, source))
}

/// Load a rendered drill back into memory for diagnosis.
///
/// The four base manifests are required; the network policy is optional
/// because only one fault creates it.
pub fn load_document_set(dir: &Path) -> Result<DocumentSet> {
    Ok(DocumentSet {
        namespace: load_doc(dir, NAMESPACE_FILE, DocKind::Namespace)?,
        workload: load_doc(dir, WORKLOAD_FILE, DocKind::Workload)?,
        service: load_doc(dir, SERVICE_FILE, DocKind::Service)?,
        volume_claim: load_doc(dir, CLAIM_FILE, DocKind::VolumeClaim)?,
        network_policy: load_optional_doc(dir, POLICY_FILE, DocKind::NetworkPolicy)?,
    })
}

fn write_doc(dir: &Path, name: &str, doc: &ManifestDoc) -> Result<()> {
    let path = dir.join(name);
    let yaml = serde_yaml::to_string(doc.body())?;
    fs::write(&path, yaml).map_err(|source| DrillError::io(path, source))
}

fn load_doc(dir: &Path, name: &'static str, kind: DocKind) -> Result<ManifestDoc> {
    load_optional_doc(dir, name, kind)?.ok_or_else(|| DrillError::MissingDocument {
        dir: dir.to_path_buf(),
        manifest: name,
    })
}

fn load_optional_doc(
    dir: &Path,
    name: &'static str,
    kind: DocKind,
) -> Result<Option<ManifestDoc>> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(|source| DrillError::io(&path, source))?;
    let body: Value = serde_yaml::from_str(&raw)?;
    Ok(Some(ManifestDoc::new(kind, body)))
}

fn clear_previous_drill(dir: &Path) -> Result<()> {
    for name in [
        NAMESPACE_FILE,
        WORKLOAD_FILE,
        SERVICE_FILE,
        CLAIM_FILE,
        POLICY_FILE,
        BRIEF_FILE,
    ] {
        let path = dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(DrillError::io(path, source)),
        }
    }
    Ok(())
}
