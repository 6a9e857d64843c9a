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

//! # Brio Core
//!
//! Foundational crate for the brio embedding runtime: the asset model, the
//! out-of-band asset-loader contracts, and the lifecycle of the opaque
//! native resource every loader wraps.
//!
//! When a loaded scene references a binary asset (a font, an image, an
//! audio clip) that is not embedded inline, the rendering core asks the
//! host's configured loader for its bytes. Hosts compose loaders into a
//! [`FallbackChain`](loader::FallbackChain) that tries each candidate in
//! order until one succeeds.
//!
//! Remote (network) asset resolution is permanently disabled in this
//! runtime. The policy is enforced structurally: the chain refuses to admit
//! a remote-fetch loader, and the remote variant itself fails on every
//! path. See [`loader::RemoteAssetLoader`].

#![warn(missing_docs)]

pub mod asset;
pub mod loader;

pub use asset::FileAsset;
pub use loader::{AssetLoader, FallbackChain};
