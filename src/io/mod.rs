// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: export, project files, local storage and upload.

pub mod export;
pub mod serialization;
pub mod storage;
pub mod upload;
