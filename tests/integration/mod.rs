// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod generate_api_test;
pub mod helpers;
pub mod process_api_test;
