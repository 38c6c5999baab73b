// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for dots and projects.

pub mod dot;
pub mod project;
