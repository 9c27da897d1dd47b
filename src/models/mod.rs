// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for boxes and saved documents.

pub mod annotation;
pub mod project;
