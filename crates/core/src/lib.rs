// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem table core types and betting state machine.
//!
//! ```
//! use holdem_core::{
//!     poker::Chips,
//!     table::{Table, TableConfig},
//! };
//!
//! let mut table = Table::new(TableConfig::default());
//! table.add_player("alice".into(), "Alice", false).unwrap();
//! table.add_player("bob".into(), "Bob", true).unwrap();
//! table.shuffle();
//!
//! let alice = "alice".into();
//! assert_eq!(table.blind(&alice).unwrap(), Chips::new(1));
//! assert_eq!(table.pot(), Chips::new(1));
//! assert_eq!(table.seats_summary(), "Alice(SB) | Bob(BB)");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod player;
pub mod poker;
pub mod table;
pub mod view;
