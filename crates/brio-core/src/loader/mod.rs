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

//! Out-of-band asset resolution.
//!
//! When the rendering core encounters a [`FileAsset`] whose contents are
//! not embedded inline, it calls [`AssetLoader::load_contents`] on the
//! host's configured top-level loader — usually a [`FallbackChain`] that
//! tries child loaders in insertion order until one succeeds.
//!
//! # Design
//!
//! Every concrete loader owns exactly one [`NativeHandle`](native::NativeHandle)
//! wrapping the opaque resource the native runtime keeps per loader; the
//! handle's reference counting keeps the managed and native sides in
//! lock-step. Resolution itself is a single synchronous capability:
//! `load_contents` either handles the asset (`true`) or declines (`false`)
//! so the next candidate gets its turn. Declining is control flow, never an
//! error.
//!
//! Remote-fetch resolution is permanently disabled. The
//! [`RemoteAssetLoader`] type remains so existing call sites keep
//! compiling, but every path through it fails, and
//! [`FallbackChain::reset_policy`] guarantees no such loader survives a
//! reconfiguration.

mod chain;
mod error;
mod local;
pub mod native;
mod remote;

pub use chain::FallbackChain;
pub use error::{ConfigurationError, LifecycleError};
pub use local::{DirectoryAssetLoader, FnAssetLoader};
pub use remote::RemoteAssetLoader;

use crate::asset::FileAsset;
use native::{NativeHandle, RendererType};

/// The capability every asset loader implements.
///
/// Implementors own one [`NativeHandle`] (created at construction, disposed
/// with the loader) and supply bytes for assets the scene references
/// out-of-band.
pub trait AssetLoader: Send + 'static {
    /// The native-resource handle this loader owns.
    fn handle(&self) -> &NativeHandle;

    /// Attempts to supply the contents of `asset`.
    ///
    /// `in_band_bytes` holds any bytes already embedded in the scene
    /// payload (possibly empty) as a hint or fallback source. Returns
    /// `true` if the asset was fully handled, `false` to decline and let
    /// the next loader try. May block on local I/O; must never perform
    /// network fetches.
    fn load_contents(&mut self, asset: &FileAsset, in_band_bytes: &[u8]) -> bool;

    /// Takes an additional reference on this loader's native resource,
    /// native and managed counts in lock-step. Returns the new managed
    /// count.
    fn acquire(&self) -> Result<usize, LifecycleError> {
        self.handle().acquire()
    }

    /// Drops one reference; the last release disposes the native resource.
    fn release(&self) -> Result<usize, LifecycleError> {
        self.handle().release()
    }

    /// Pushes a renderer-type value into the native resource. Pure
    /// pass-through configuration, no managed state.
    fn set_renderer_type(&self, renderer_type: RendererType) -> Result<(), LifecycleError> {
        self.handle().set_renderer_type(renderer_type)
    }

    /// Whether this loader is the disabled remote-fetch variant.
    /// [`FallbackChain::reset_policy`] uses this probe to purge offenders;
    /// only [`RemoteAssetLoader`] overrides it.
    fn is_remote_fetch(&self) -> bool {
        false
    }
}
