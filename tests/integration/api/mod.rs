// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_test;
pub mod categories_test;
pub mod orders_test;
pub mod products_test;
pub mod users_test;
