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

// Brio Sandbox
// Wires up a loader chain the way an embedding host would.

use anyhow::Result;
use brio_core::asset::{AssetKind, FileAsset};
use brio_core::loader::native::{InProcessBridge, NativeBridge, RendererType};
use brio_core::loader::{DirectoryAssetLoader, FallbackChain, FnAssetLoader};
use brio_core::AssetLoader;
use log::info;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();

    let bridge: Arc<dyn NativeBridge> = Arc::new(InProcessBridge::new());

    // A host-supplied loader that only understands fonts with in-band
    // bytes; it gets first refusal over the chain defaults.
    let custom = FnAssetLoader::new(bridge.clone(), |asset: &FileAsset, bytes: &[u8]| {
        asset.kind() == AssetKind::Font && !bytes.is_empty()
    });

    // Chain default: resolve everything else from the working directory.
    let from_disk = DirectoryAssetLoader::new(bridge.clone(), ".", |asset, bytes| {
        info!("decoded {} bytes for '{}'", bytes.len(), asset.name());
        true
    });

    let mut chain = FallbackChain::new(bridge.clone(), false, Some(Box::new(from_disk)))?;
    chain.reset_policy(false, Some(Box::new(custom)))?;
    chain.set_renderer_type(RendererType::Gpu)?;

    let embedded_font =
        FileAsset::with_embedded_bytes("body.ttf", AssetKind::Font, b"glyf".to_vec());
    let missing_image = FileAsset::new("missing.png", AssetKind::Image);

    for asset in [&embedded_font, &missing_image] {
        let in_band = asset.embedded_bytes().unwrap_or_default().to_vec();
        let handled = chain.load_contents(asset, &in_band);
        info!("asset '{}' handled: {handled}", asset.name());
    }

    // Asking for remote loading is a terminal configuration error.
    match chain.reset_policy(true, None) {
        Err(err) => info!("remote loading refused as expected: {err}"),
        Ok(()) => unreachable!("remote loading must never be admitted"),
    }

    Ok(())
}
