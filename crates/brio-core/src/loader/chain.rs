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
use log::{debug, error};
use std::sync::Arc;

/// A composite loader that tries children in insertion order until one
/// succeeds (chain-of-responsibility).
///
/// The chain exclusively owns its children: the ordered `Vec` of boxes is
/// both the dispatch sequence and the disposal set, so the two views cannot
/// drift apart. Dropping the chain drops every child (each child's native
/// resource disposed exactly once through its handle) and then the chain's
/// own handle.
///
/// Structural mutation (`append_loader`, `prepend_loader`, `reset_policy`)
/// takes `&mut self` and is expected to run on the host's single
/// configuration thread; only the handle's reference counters are safe to
/// touch concurrently.
pub struct FallbackChain {
    // Field order matters: fields drop in declaration order, and the
    // children's native resources must be disposed before the chain's own.
    loaders: Vec<Box<dyn AssetLoader>>,
    handle: NativeHandle,
}

impl FallbackChain {
    /// Creates a chain, optionally seeded with a host-supplied loader.
    ///
    /// Fails with [`ConfigurationError::RemoteLoadingUnsupported`] if
    /// `enable_remote_loading` is true — before any loader is added.
    pub fn new(
        bridge: Arc<dyn NativeBridge>,
        enable_remote_loading: bool,
        custom_loader: Option<Box<dyn AssetLoader>>,
    ) -> Result<Self, ConfigurationError> {
        if enable_remote_loading {
            error!("chain construction requested remote-fetch loading");
            return Err(ConfigurationError::RemoteLoadingUnsupported);
        }
        let mut chain = Self {
            loaders: Vec::new(),
            handle: NativeHandle::new(bridge),
        };
        if let Some(loader) = custom_loader {
            chain.append_loader(loader);
        }
        Ok(chain)
    }

    /// Creates an empty chain.
    #[must_use]
    pub fn empty(bridge: Arc<dyn NativeBridge>) -> Self {
        Self {
            loaders: Vec::new(),
            handle: NativeHandle::new(bridge),
        }
    }

    /// Adds `loader` at the end of the sequence.
    pub fn append_loader(&mut self, loader: Box<dyn AssetLoader>) {
        debug!(
            "appending loader {:?} at index {}",
            loader.handle().raw(),
            self.loaders.len()
        );
        self.loaders.push(loader);
    }

    /// Adds `loader` at index 0, giving it first refusal over everything
    /// already configured.
    pub fn prepend_loader(&mut self, loader: Box<dyn AssetLoader>) {
        debug!("prepending loader {:?}", loader.handle().raw());
        self.loaders.insert(0, loader);
    }

    /// Rebuilds the chain configuration for a new host setup.
    ///
    /// A supplied `custom_loader` is prepended so it executes before any
    /// previously configured loader. Any remote-fetch-variant loader in the
    /// sequence is then removed and disposed. Finally, if
    /// `wants_remote_loader` is true the reset fails: remote-fetch loaders
    /// can never be (re)admitted. Note the custom loader stays prepended
    /// even on that failure.
    pub fn reset_policy(
        &mut self,
        wants_remote_loader: bool,
        custom_loader: Option<Box<dyn AssetLoader>>,
    ) -> Result<(), ConfigurationError> {
        if let Some(loader) = custom_loader {
            self.prepend_loader(loader);
        }
        while let Some(index) = self.loaders.iter().position(|l| l.is_remote_fetch()) {
            let removed = self.loaders.remove(index);
            debug!(
                "purging remote-fetch loader {:?} from index {index}",
                removed.handle().raw()
            );
            if let Err(err) = removed.release() {
                // Any references still outstanding are torn down by the
                // handle's drop backstop.
                error!("releasing purged remote-fetch loader failed: {err}");
            }
        }
        if wants_remote_loader {
            error!("policy reset requested remote-fetch loading");
            return Err(ConfigurationError::RemoteLoadingUnsupported);
        }
        Ok(())
    }

    /// Read-only view of the configured loaders, in dispatch order.
    #[must_use]
    pub fn loaders(&self) -> &[Box<dyn AssetLoader>] {
        &self.loaders
    }

    /// The number of configured loaders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Whether the chain has no loaders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl AssetLoader for FallbackChain {
    fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    /// Tries children strictly in insertion order and short-circuits on the
    /// first success; children after it are never invoked. An empty chain
    /// declines.
    fn load_contents(&mut self, asset: &FileAsset, in_band_bytes: &[u8]) -> bool {
        self.loaders
            .iter_mut()
            .any(|loader| loader.load_contents(asset, in_band_bytes))
    }
}
