// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem table owner task, dealer and snapshot store.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod dealer;
pub mod db;
pub mod server;
pub use server::{Config, run};
pub mod table;
