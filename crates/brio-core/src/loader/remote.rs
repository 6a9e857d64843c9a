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

use super::error::ConfigurationError;
use super::native::{NativeBridge, NativeHandle};
use super::AssetLoader;
use crate::asset::FileAsset;
use log::error;
use std::sync::Arc;

/// The disabled remote-fetch loader variant.
///
/// Remote asset resolution is permanently disabled in this runtime: no
/// loader may perform network fetches. This type is kept so call sites that
/// reference it keep compiling, but it is fail-closed — every path through
/// it fails rather than attempting I/O, and [`FallbackChain`] purges any
/// instance on [`reset_policy`]. This is an intentional, permanent policy,
/// not a temporary gap.
///
/// [`FallbackChain`]: super::FallbackChain
/// [`reset_policy`]: super::FallbackChain::reset_policy
pub struct RemoteAssetLoader {
    handle: NativeHandle,
}

impl RemoteAssetLoader {
    /// Always fails with [`ConfigurationError::RemoteLoaderConstruction`].
    pub fn new(_bridge: Arc<dyn NativeBridge>) -> Result<Self, ConfigurationError> {
        Err(ConfigurationError::RemoteLoaderConstruction)
    }

    /// Builds the variant anyway, so a pre-existing configuration that
    /// still holds one can be represented — and purged by
    /// [`FallbackChain::reset_policy`](super::FallbackChain::reset_policy).
    /// Every capability call on the result fails.
    #[deprecated(
        note = "remote-fetch asset loading is permanently disabled; this exists only so legacy configurations can be represented and purged"
    )]
    #[must_use]
    pub fn new_unchecked(bridge: Arc<dyn NativeBridge>) -> Self {
        error!("constructed a remote-fetch asset loader; every load through it will fail");
        Self {
            handle: NativeHandle::new(bridge),
        }
    }
}

impl AssetLoader for RemoteAssetLoader {
    fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    /// Never performs I/O.
    ///
    /// # Panics
    /// Always. Reaching this method means a remote-fetch loader survived in
    /// a chain, which the policy machinery is supposed to make impossible.
    fn load_contents(&mut self, asset: &FileAsset, _in_band_bytes: &[u8]) -> bool {
        error!(
            "remote fetch requested for asset '{}' ({})",
            asset.name(),
            asset.uuid()
        );
        panic!("remote-fetch asset loading is permanently disabled");
    }

    fn is_remote_fetch(&self) -> bool {
        true
    }
}
