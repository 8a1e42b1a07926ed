// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod graph_building;
mod hostvars_merge;
mod staleness;
