// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! Terminal client for a remote to-do list service.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod state;
pub mod terminal;
pub mod ui;
