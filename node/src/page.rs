// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The player/marker page, served verbatim on `GET /`.

pub const INDEX_HTML: &str = include_str!("../assets/index.html");
