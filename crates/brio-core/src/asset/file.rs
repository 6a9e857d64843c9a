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

use super::AssetUuid;
use serde::{Deserialize, Serialize};

/// The declared kind of an out-of-band asset, as recorded in the scene file.
///
/// `Unknown` covers kinds written by newer scene exporters; loaders that
/// dispatch on the kind should decline such assets rather than error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// A font face.
    Font,
    /// A raster or vector image.
    Image,
    /// An audio clip.
    Audio,
    /// A kind this runtime version does not recognize.
    Unknown,
}

/// A binary asset referenced by a loaded scene.
///
/// A `FileAsset` is constructed once, from the scene file, and never mutated
/// afterwards: it is the *description* of the asset (identity, declared
/// kind, and any bytes the scene embedded inline), not a container for
/// resolved contents. Resolution happens in the
/// [`loader`](crate::loader) module, which receives the asset by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAsset {
    uuid: AssetUuid,
    name: String,
    kind: AssetKind,
    embedded_bytes: Option<Vec<u8>>,
}

impl FileAsset {
    /// Creates an asset description with no in-band payload.
    pub fn new(name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            uuid: AssetUuid::new(),
            name: name.into(),
            kind,
            embedded_bytes: None,
        }
    }

    /// Creates an asset description carrying bytes embedded in the scene.
    pub fn with_embedded_bytes(name: impl Into<String>, kind: AssetKind, bytes: Vec<u8>) -> Self {
        Self {
            uuid: AssetUuid::new(),
            name: name.into(),
            kind,
            embedded_bytes: Some(bytes),
        }
    }

    /// The stable identifier of this asset.
    #[must_use]
    pub fn uuid(&self) -> AssetUuid {
        self.uuid
    }

    /// The display name recorded in the scene file, extension included.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind of this asset.
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Bytes the scene embedded for this asset, if any.
    #[must_use]
    pub fn embedded_bytes(&self) -> Option<&[u8]> {
        self.embedded_bytes.as_deref()
    }

    /// A collision-free file name for this asset: the display name with the
    /// UUID folded in before the extension (`logo.png` becomes
    /// `logo-<uuid>.png`).
    ///
    /// Hosts that export scene assets to disk write them under this name,
    /// so loaders performing local lookup should try it first.
    #[must_use]
    pub fn unique_file_name(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((stem, extension)) => format!("{stem}-{}.{extension}", self.uuid),
            None => format!("{}-{}", self.name, self.uuid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_file_name_keeps_extension() {
        let asset = FileAsset::new("logo.png", AssetKind::Image);
        let unique = asset.unique_file_name();
        assert!(unique.starts_with("logo-"));
        assert!(unique.ends_with(".png"));
        assert!(unique.contains(&asset.uuid().to_string()));
    }

    #[test]
    fn test_unique_file_name_without_extension() {
        let asset = FileAsset::new("ambient_loop", AssetKind::Audio);
        assert_eq!(
            asset.unique_file_name(),
            format!("ambient_loop-{}", asset.uuid())
        );
    }

    #[test]
    fn test_embedded_bytes_accessor() {
        let asset = FileAsset::with_embedded_bytes("face.ttf", AssetKind::Font, vec![1, 2, 3]);
        assert_eq!(asset.embedded_bytes(), Some(&[1u8, 2, 3][..]));

        let bare = FileAsset::new("face.ttf", AssetKind::Font);
        assert!(bare.embedded_bytes().is_none());
    }
}
