//! Build reports and the appendices attached to them.
//!
//! A [`BuildReport`] owns at most one [`AttributionStore`] plus any number of
//! tagged custom appendices. Reports persist either as pretty JSON or as a
//! versioned bincode blob; both go through the flat
//! [`PersistedAttribution`] layout, never through the live maps.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::persist::PersistedAttribution;
use crate::store::AttributionStore;
use crate::{Error, Result};

/// Current on-disk format version for both codecs.
///
/// - Version 1: report envelope with flattened attribution records
const FORMAT_VERSION: u32 = 1;

/// Tag under which the attribution appendix is listed.
pub const ATTRIBUTION_TAG: &str = "attribution";

/// Appendix handed to [`BuildReport::add_appendix`].
#[derive(Debug, Clone, PartialEq)]
pub enum Appendix {
    /// The inclusion attribution store.
    Attribution(AttributionStore),
    /// Arbitrary tagged data owned by another tool.
    Custom {
        tag: String,
        payload: serde_json::Value,
    },
}

impl Appendix {
    /// Tag that identifies this appendix within its report.
    pub fn tag(&self) -> &str {
        match self {
            Self::Attribution(_) => ATTRIBUTION_TAG,
            Self::Custom { tag, .. } => tag,
        }
    }
}

/// The record of one finished build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    name: String,
    platform: String,
    created_at: DateTime<Utc>,
    attribution: Option<AttributionStore>,
    custom: Vec<(String, serde_json::Value)>,
}

impl BuildReport {
    /// Create an empty report stamped with the current time.
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self::with_timestamp(name, platform, Utc::now())
    }

    /// Create an empty report with an explicit timestamp.
    pub fn with_timestamp(
        name: impl Into<String>,
        platform: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            created_at,
            attribution: None,
            custom: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the report's attribution store, creating it on first use.
    pub fn attribution_mut(&mut self) -> &mut AttributionStore {
        self.attribution.get_or_insert_with(|| {
            debug!(report = %self.name, "created attribution appendix");
            AttributionStore::new()
        })
    }

    /// The report's attribution store, if one was ever created.
    pub fn attribution(&self) -> Option<&AttributionStore> {
        self.attribution.as_ref()
    }

    /// Attach an appendix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the report already holds an
    /// attribution store, when a custom tag is empty, reserved, or already used.
    pub fn add_appendix(&mut self, appendix: Appendix) -> Result<()> {
        match appendix {
            Appendix::Attribution(store) => {
                if self.attribution.is_some() {
                    return Err(Error::InvalidArgument(format!(
                        "report '{}' already has an attribution appendix",
                        self.name
                    )));
                }
                self.attribution = Some(store);
            }
            Appendix::Custom { tag, payload } => {
                if tag.trim().is_empty() {
                    return Err(Error::InvalidArgument(
                        "appendix tag must not be empty".to_owned(),
                    ));
                }
                if tag == ATTRIBUTION_TAG || self.custom_appendix(&tag).is_some() {
                    return Err(Error::InvalidArgument(format!(
                        "report '{}' already has an appendix tagged '{tag}'",
                        self.name
                    )));
                }
                self.custom.push((tag, payload));
            }
        }
        Ok(())
    }

    /// Payload of the custom appendix tagged `tag`.
    pub fn custom_appendix(&self, tag: &str) -> Option<&serde_json::Value> {
        self.custom
            .iter()
            .find(|(existing, _)| existing == tag)
            .map(|(_, payload)| payload)
    }

    /// Tags of every attached appendix, attribution first.
    pub fn appendix_tags(&self) -> Vec<&str> {
        self.attribution
            .iter()
            .map(|_| ATTRIBUTION_TAG)
            .chain(self.custom.iter().map(|(tag, _)| tag.as_str()))
            .collect()
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let persisted = self.to_persisted()?;
        serde_json::to_string_pretty(&persisted)
            .map_err(|e| Error::InvalidFormat(format!("Failed to serialize report: {e}")))
    }

    /// Deserialize a report written by [`BuildReport::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let persisted: PersistedReport = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("Failed to parse report JSON: {e}")))?;
        Self::from_persisted(persisted)
    }

    /// Serialize the report to binary using bincode.
    ///
    /// The blob starts with the format version so readers can reject it
    /// before decoding the rest.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let persisted = self.to_persisted()?;
        bincode::serde::encode_to_vec(&persisted, bincode::config::standard())
            .map_err(|e| Error::InvalidFormat(format!("Failed to serialize report to bytes: {e}")))
    }

    /// Deserialize a report written by [`BuildReport::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails, the format version is unknown,
    /// bytes follow the encoded report, or the attribution data is corrupt.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (version, _): (u32, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map_err(|e| {
                Error::InvalidFormat(format!("Failed to read report format version: {e}"))
            })?;
        check_version(version)?;

        let (persisted, consumed): (PersistedReport, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map_err(|e| {
                Error::InvalidFormat(format!("Failed to deserialize report from bytes: {e}"))
            })?;
        if consumed != bytes.len() {
            return Err(Error::InvalidFormat(format!(
                "{} trailing bytes after report",
                bytes.len() - consumed
            )));
        }
        Self::from_persisted(persisted)
    }

    /// Write the report to `path`.
    ///
    /// `.json` files get JSON, anything else the binary format. The data is
    /// written to a uniquely named temporary file in the target's directory
    /// and then renamed over the target, so a reader never sees a
    /// half-written report and concurrent saves never share a staging file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = if is_json_path(path) {
            self.to_json()?.into_bytes()
        } else {
            self.to_bytes()?
        };

        let mut staging = tempfile::Builder::new()
            .prefix(".tally-")
            .suffix(".tmp")
            .tempfile_in(staging_dir(path))?;
        staging.write_all(&bytes)?;
        staging.as_file().sync_all()?;
        // Dropping an unpersisted temp file removes it.
        staging.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(path = %path.display(), bytes = bytes.len(), "saved build report");
        Ok(())
    }

    /// Read a report saved by [`BuildReport::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let report = if is_json_path(path) {
            let json = String::from_utf8(bytes)
                .map_err(|e| Error::InvalidFormat(format!("Report is not UTF-8: {e}")))?;
            Self::from_json(&json)?
        } else {
            Self::from_bytes(&bytes)?
        };

        debug!(path = %path.display(), report = %report.name, "loaded build report");
        Ok(report)
    }

    fn to_persisted(&self) -> Result<PersistedReport> {
        let custom = self
            .custom
            .iter()
            .map(|(tag, payload)| {
                let payload = serde_json::to_string(payload).map_err(|e| {
                    Error::InvalidFormat(format!("Failed to serialize appendix '{tag}': {e}"))
                })?;
                Ok(PersistedCustom {
                    tag: tag.clone(),
                    payload,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PersistedReport {
            version: FORMAT_VERSION,
            name: self.name.clone(),
            platform: self.platform.clone(),
            created_at: self.created_at,
            attribution: self.attribution.as_ref().map(AttributionStore::flatten),
            custom,
        })
    }

    fn from_persisted(persisted: PersistedReport) -> Result<Self> {
        check_version(persisted.version)?;

        let mut report =
            Self::with_timestamp(persisted.name, persisted.platform, persisted.created_at);

        if let Some(attribution) = persisted.attribution {
            report.add_appendix(Appendix::Attribution(AttributionStore::restore(
                attribution,
            )?))?;
        }

        for PersistedCustom { tag, payload } in persisted.custom {
            let payload = serde_json::from_str(&payload).map_err(|e| {
                Error::Corrupt(format!("Appendix '{tag}' holds invalid JSON: {e}"))
            })?;
            report
                .add_appendix(Appendix::Custom { tag, payload })
                .map_err(|e| Error::Corrupt(e.to_string()))?;
        }

        Ok(report)
    }
}

/// Resolve the attribution store of a report handed across a tool boundary.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when no report is supplied.
pub fn attribution_for(report: Option<&mut BuildReport>) -> Result<&mut AttributionStore> {
    report
        .map(BuildReport::attribution_mut)
        .ok_or_else(|| Error::InvalidArgument("build report is required".to_owned()))
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedReport {
    // Must stay the first field: `from_bytes` decodes it on its own.
    version: u32,
    name: String,
    platform: String,
    created_at: DateTime<Utc>,
    attribution: Option<PersistedAttribution>,
    custom: Vec<PersistedCustom>,
}

/// Custom payloads travel as JSON text so the binary codec never needs a
/// self-describing format.
#[derive(Serialize, Deserialize)]
struct PersistedCustom {
    tag: String,
    payload: String,
}

fn check_version(version: u32) -> Result<()> {
    if version != FORMAT_VERSION {
        return Err(Error::InvalidFormat(format!(
            "Incompatible report format version: expected {FORMAT_VERSION}, got {version}"
        )));
    }
    Ok(())
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
