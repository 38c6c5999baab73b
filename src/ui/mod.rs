// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Dot Sketch application.

pub mod about;
pub mod canvas;
pub mod home;
pub mod interaction;
pub mod properties;
pub mod render;
pub mod toolbar;
