// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Widget configuration.
//!
//! The class list and zoom range are fixed for the lifetime of an
//! annotator instance. They can be read from a YAML or JSON file.

use crate::models::annotation::UNASSIGNED_LABEL;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zoom slider range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.2,
            max: 5.0,
            step: 0.1,
            initial: 1.0,
        }
    }
}

impl ZoomConfig {
    /// Clamp a requested zoom into range. Non-finite values yield `None`.
    pub fn clamp(&self, zoom: f64) -> Option<f64> {
        zoom.is_finite().then(|| zoom.max(self.min).min(self.max))
    }
}

/// Configuration for one annotator instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Selectable classes, in display order
    pub classes: Vec<String>,
    pub zoom: ZoomConfig,
}

impl AnnotatorConfig {
    /// Create a config with the given classes and the default zoom range.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self {
            classes: classes.into_iter().map(Into::into).collect(),
            zoom: ZoomConfig::default(),
        };
        config.normalize();
        config
    }

    /// Load configuration from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let mut config: Self = match extension {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("Invalid YAML config {}", path.display()))?,
            _ => bail!("Unsupported config extension: {:?}", extension),
        };

        config.validate()?;
        config.normalize();
        log::info!(
            "Loaded config from {} ({} classes)",
            path.display(),
            config.classes.len()
        );
        Ok(config)
    }

    /// Reject zoom ranges the coordinate mapper cannot work with.
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if !(zoom.min.is_finite() && zoom.max.is_finite() && zoom.step.is_finite()) {
            bail!("Zoom range must be finite");
        }
        if zoom.min <= 0.0 {
            bail!("Minimum zoom must be positive, got {}", zoom.min);
        }
        if zoom.min > zoom.max {
            bail!("Minimum zoom {} exceeds maximum {}", zoom.min, zoom.max);
        }
        if zoom.step <= 0.0 {
            bail!("Zoom step must be positive, got {}", zoom.step);
        }
        Ok(())
    }

    /// Drop duplicate classes and the unassigned sentinel; clamp the initial zoom.
    pub fn normalize(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.classes.len());
        for class in self.classes.drain(..) {
            let class = class.trim().to_string();
            if class.is_empty() || class == UNASSIGNED_LABEL || seen.contains(&class) {
                continue;
            }
            seen.push(class);
        }
        self.classes = seen;
        self.zoom.initial = self.zoom.clamp(self.zoom.initial).unwrap_or(1.0);
    }

    /// Labels offered by the label picker: the sentinel, then every class.
    pub fn label_choices(&self) -> Vec<String> {
        std::iter::once(UNASSIGNED_LABEL.to_string())
            .chain(self.classes.iter().cloned())
            .collect()
    }

    /// Check whether `label` may be assigned to a box.
    pub fn accepts_label(&self, label: &str) -> bool {
        label == UNASSIGNED_LABEL || self.classes.iter().any(|c| c == label)
    }
}
