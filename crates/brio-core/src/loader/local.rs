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

//! Concrete loaders for host-supplied and local-disk resolution.

use super::native::{NativeBridge, NativeHandle};
use super::AssetLoader;
use crate::asset::FileAsset;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loader backed by a host-supplied closure.
///
/// The usual way to customize asset resolution: the closure receives the
/// asset and any in-band bytes and returns whether it handled them.
pub struct FnAssetLoader<F> {
    handle: NativeHandle,
    load: F,
}

impl<F> FnAssetLoader<F>
where
    F: FnMut(&FileAsset, &[u8]) -> bool + Send + 'static,
{
    /// Wraps `load` as an asset loader with its own native resource.
    #[must_use]
    pub fn new(bridge: Arc<dyn NativeBridge>, load: F) -> Self {
        Self {
            handle: NativeHandle::new(bridge),
            load,
        }
    }
}

impl<F> AssetLoader for FnAssetLoader<F>
where
    F: FnMut(&FileAsset, &[u8]) -> bool + Send + 'static,
{
    fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    fn load_contents(&mut self, asset: &FileAsset, in_band_bytes: &[u8]) -> bool {
        (self.load)(asset, in_band_bytes)
    }
}

/// Resolves assets from a directory on local disk.
///
/// In-band bytes win when the scene embedded any; otherwise the loader
/// looks for the asset's [`unique_file_name`](FileAsset::unique_file_name)
/// under the root directory, falling back to the plain display name for
/// hand-placed files. Resolved bytes go to the host's `deliver` callback,
/// which decodes them into the scene. A missing file is a decline, not an
/// error.
pub struct DirectoryAssetLoader {
    handle: NativeHandle,
    root: PathBuf,
    deliver: Box<dyn FnMut(&FileAsset, Vec<u8>) -> bool + Send>,
}

impl DirectoryAssetLoader {
    /// Creates a loader rooted at `root`.
    #[must_use]
    pub fn new(
        bridge: Arc<dyn NativeBridge>,
        root: impl Into<PathBuf>,
        deliver: impl FnMut(&FileAsset, Vec<u8>) -> bool + Send + 'static,
    ) -> Self {
        Self {
            handle: NativeHandle::new(bridge),
            root: root.into(),
            deliver: Box::new(deliver),
        }
    }

    /// The directory this loader resolves from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_from_disk(&self, asset: &FileAsset) -> Option<Vec<u8>> {
        for candidate in [asset.unique_file_name(), asset.name().to_owned()] {
            let path = self.root.join(&candidate);
            match fs::read(&path) {
                Ok(bytes) => return Some(bytes),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    warn!("Could not read asset file {}: {err}", path.display());
                    return None;
                }
            }
        }
        None
    }
}

impl AssetLoader for DirectoryAssetLoader {
    fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    fn load_contents(&mut self, asset: &FileAsset, in_band_bytes: &[u8]) -> bool {
        if !in_band_bytes.is_empty() {
            return (self.deliver)(asset, in_band_bytes.to_vec());
        }
        match self.read_from_disk(asset) {
            Some(bytes) => (self.deliver)(asset, bytes),
            None => {
                warn!(
                    "Could not resolve asset '{}' under {}",
                    asset.name(),
                    self.root.display()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;
    use crate::loader::native::InProcessBridge;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bridge() -> Arc<dyn NativeBridge> {
        Arc::new(InProcessBridge::new())
    }

    #[test]
    fn test_fn_loader_forwards_verdict() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut loader = FnAssetLoader::new(bridge(), move |_asset, bytes| {
            seen.fetch_add(1, Ordering::Relaxed);
            !bytes.is_empty()
        });

        let asset = FileAsset::new("icon.png", AssetKind::Image);
        assert!(loader.load_contents(&asset, b"png"));
        assert!(!loader.load_contents(&asset, &[]));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_directory_loader_prefers_in_band_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let mut loader = DirectoryAssetLoader::new(bridge(), dir.path(), move |_asset, bytes| {
            sink.lock().unwrap().push(bytes);
            true
        });

        let asset = FileAsset::new("icon.png", AssetKind::Image);
        assert!(loader.load_contents(&asset, b"inline"));
        assert_eq!(*delivered.lock().unwrap(), vec![b"inline".to_vec()]);
    }

    #[test]
    fn test_directory_loader_reads_unique_file_name_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let asset = FileAsset::new("icon.png", AssetKind::Image);
        fs::write(dir.path().join(asset.unique_file_name()), b"disk").unwrap();

        let delivered = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let mut loader = DirectoryAssetLoader::new(bridge(), dir.path(), move |_asset, bytes| {
            sink.lock().unwrap().push(bytes);
            true
        });

        assert!(loader.load_contents(&asset, &[]));
        assert_eq!(*delivered.lock().unwrap(), vec![b"disk".to_vec()]);
    }

    #[test]
    fn test_directory_loader_falls_back_to_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("music.ogg"), b"ogg").unwrap();

        let mut loader =
            DirectoryAssetLoader::new(bridge(), dir.path(), move |_asset, bytes| bytes == b"ogg");

        let asset = FileAsset::new("music.ogg", AssetKind::Audio);
        assert!(loader.load_contents(&asset, &[]));
    }

    #[test]
    fn test_directory_loader_declines_on_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = DirectoryAssetLoader::new(bridge(), dir.path(), |_asset, _bytes| {
            panic!("deliver must not run on a miss")
        });

        let asset = FileAsset::new("absent.ttf", AssetKind::Font);
        assert!(!loader.load_contents(&asset, &[]));
    }
}
