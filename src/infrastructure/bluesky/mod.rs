// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Bluesky XRPC 客户端
pub mod client;
pub mod models;

pub use client::BlueskyClient;
