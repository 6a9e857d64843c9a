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

//! Error types for loader configuration and native-resource lifecycle.
//!
//! A loader declining an asset is *not* an error: `load_contents` returns
//! `false` and the chain moves on. The types here cover the two failure
//! classes that must surface immediately instead — policy violations at
//! configuration time and reference-counting bugs at disposal time.

use super::native::NativeRef;
use std::fmt;

/// A fatal configuration violation.
///
/// These are never recovered locally: a configuration that asks for
/// remote-fetch loading is refused outright rather than degraded silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A chain construction or policy reset requested remote-fetch asset
    /// loading, which this runtime permanently disables.
    RemoteLoadingUnsupported,
    /// An attempt to construct the remote-fetch loader variant.
    RemoteLoaderConstruction,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::RemoteLoadingUnsupported => {
                write!(f, "Remote-fetch asset loading is permanently disabled")
            }
            ConfigurationError::RemoteLoaderConstruction => {
                write!(
                    f,
                    "Remote-fetch asset loaders cannot be constructed; remote loading is permanently disabled"
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A native-resource lifecycle violation.
///
/// Indicates a programming bug in reference counting; detected and
/// reported, never masked, because continuing with a double-freed resource
/// is unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// A release on a handle whose reference count already reached zero.
    AlreadyDisposed {
        /// The native resource the handle owned.
        resource: NativeRef,
    },
    /// An acquire or configuration call on a disposed handle.
    UseAfterDispose {
        /// The native resource the handle owned.
        resource: NativeRef,
    },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::AlreadyDisposed { resource } => {
                write!(
                    f,
                    "Release of native resource {:#x} which was already disposed",
                    resource.raw()
                )
            }
            LifecycleError::UseAfterDispose { resource } => {
                write!(
                    f,
                    "Operation on disposed native resource {:#x}",
                    resource.raw()
                )
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        assert_eq!(
            ConfigurationError::RemoteLoadingUnsupported.to_string(),
            "Remote-fetch asset loading is permanently disabled"
        );
        assert!(ConfigurationError::RemoteLoaderConstruction
            .to_string()
            .contains("cannot be constructed"));
    }

    #[test]
    fn test_lifecycle_error_display_names_resource() {
        let err = LifecycleError::AlreadyDisposed {
            resource: NativeRef::new(0x2a),
        };
        assert_eq!(
            err.to_string(),
            "Release of native resource 0x2a which was already disposed"
        );

        let err = LifecycleError::UseAfterDispose {
            resource: NativeRef::new(7),
        };
        assert!(err.to_string().contains("0x7"));
    }
}
