// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! gitpost library
//!
//! This module exports the command-line configuration, the generation
//! context, prompt construction and file output of the `gitpost` binary for
//! use in integration tests and as a library.

pub mod commands;
pub mod config;
pub mod context;
pub mod output;
pub mod prompt;
