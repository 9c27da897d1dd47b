// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation export.
//!
//! This module writes saved annotation documents in YAML or JSON
//! format, chosen by file extension.

use crate::models::project::AnnotationSet;
use anyhow::{bail, Result};
use std::path::Path;

/// Serialize annotation data to YAML.
pub fn to_yaml(data: &AnnotationSet) -> Result<String> {
    Ok(serde_yaml::to_string(data)?)
}

/// Serialize annotation data to pretty-printed JSON.
pub fn to_json(data: &AnnotationSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Export annotation data, picking the format from the file extension.
pub fn export(data: &AnnotationSet, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    let text = match extension {
        Some("yaml") | Some("yml") => to_yaml(data)?,
        Some("json") => to_json(data)?,
        _ => bail!("Unsupported file extension: {:?}", extension),
    };
    std::fs::write(path, text)?;
    Ok(())
}
