// Copyright 2026 the brio authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The scene-side description of out-of-band assets.
//!
//! This module defines the "common language" between the scene file and the
//! loader machinery in [`crate::loader`]. It knows what an asset *is* — its
//! identity, declared kind, and any bytes the scene embedded for it — but
//! nothing about how its contents are resolved.

mod file;
mod uuid;

pub use file::*;
pub use uuid::*;
