// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod order_redis_repository_test;
pub mod order_repository_test;
pub mod relational_repository_test;
