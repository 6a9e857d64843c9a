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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique, persistent identifier for an out-of-band asset.
///
/// This UUID represents the "idea" of an asset, decoupled from its name or
/// any physical file path. Scene files may reference the same logical asset
/// under different display names; the UUID is what stays stable, and it is
/// what [`FileAsset::unique_file_name`](super::FileAsset::unique_file_name)
/// folds into the on-disk lookup name so renames never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetUuid(Uuid);

impl AssetUuid {
    /// Creates a new, random (version 4) `AssetUuid`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetUuid {
    /// Creates a new, random (version 4) `AssetUuid`.
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uuids_are_distinct() {
        assert_ne!(AssetUuid::new(), AssetUuid::new());
    }

    #[test]
    fn test_display_roundtrips_through_serde() {
        let id = AssetUuid::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: AssetUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
