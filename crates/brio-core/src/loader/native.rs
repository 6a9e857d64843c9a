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

//! The seam between managed loaders and the native runtime.
//!
//! Every loader wraps one opaque native resource. The native side is
//! abstracted behind the [`NativeBridge`] trait so the core stays agnostic
//! of how the resource is actually allocated: embedders back it with their
//! FFI bindings, while [`InProcessBridge`] serves hosts (and the
//! test-suite) that run without a native runtime.
//!
//! [`NativeHandle`] carries the managed reference count and guarantees the
//! native destructor runs exactly once, on the 1→0 transition or, failing
//! an explicit release, when the handle is dropped.

use super::error::LifecycleError;
use log::{error, warn};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// The renderer the native resource should prepare its decoded contents
/// for. Pushed through [`NativeBridge::set_renderer_type`]; the managed
/// side keeps no copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RendererType {
    /// The GPU-accelerated renderer.
    Gpu = 0,
    /// The software rasterizer.
    Software = 1,
}

impl RendererType {
    /// The discriminant passed across the native boundary.
    #[must_use]
    pub fn native_value(self) -> u32 {
        self as u32
    }
}

/// An opaque reference to a native-side resource. `0` is the null value and
/// never identifies a live resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeRef(u64);

impl NativeRef {
    /// The null reference.
    pub const NULL: NativeRef = NativeRef(0);

    /// Wraps a raw native reference value.
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw reference value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the null reference.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// The outbound interface to the native runtime.
///
/// One implementation exists per embedding: real hosts forward these calls
/// to their FFI bindings, [`InProcessBridge`] keeps everything in-process.
/// Implementations must be callable from any thread; reference bookkeeping
/// on the native side is expected to mirror the managed count kept by
/// [`NativeHandle`].
pub trait NativeBridge: Send + Sync + Debug + 'static {
    /// Allocates a new native resource and returns its reference.
    /// Returning [`NativeRef::NULL`] signals an unrecoverable allocation
    /// failure.
    fn construct(&self) -> NativeRef;

    /// Takes an additional native-side reference on `resource`.
    fn ref_resource(&self, resource: NativeRef);

    /// Runs the native destructor for `resource`. Called exactly once per
    /// resource, by [`NativeHandle`].
    fn dispose(&self, resource: NativeRef);

    /// Pushes a renderer-type value into `resource`.
    fn set_renderer_type(&self, resource: NativeRef, renderer_type: RendererType);
}

/// Owner of one native resource reference.
///
/// The managed reference count starts at 1 on construction. [`acquire`]
/// bumps both the managed count and the native-side count so the two stay
/// in lock-step; [`release`] decrements and triggers the native destructor
/// exactly once, when the count reaches zero. Releasing an already-disposed
/// handle is a [`LifecycleError`], never a silent no-op: a double free must
/// stay observable.
///
/// Dropping a handle that was never explicitly released to zero disposes
/// the native resource as a backstop, so the resource cannot leak on error
/// paths through chain mutation.
///
/// [`acquire`]: NativeHandle::acquire
/// [`release`]: NativeHandle::release
#[derive(Debug)]
pub struct NativeHandle {
    bridge: Arc<dyn NativeBridge>,
    raw: NativeRef,
    refs: AtomicUsize,
    disposed: AtomicBool,
}

impl NativeHandle {
    /// Allocates the backing native resource through `bridge`.
    ///
    /// # Panics
    /// Panics if the bridge returns the null reference. A loader without a
    /// backing resource cannot function, so there is no recoverable path.
    #[must_use]
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        let raw = bridge.construct();
        assert!(
            !raw.is_null(),
            "native constructor returned a null resource reference"
        );
        Self {
            bridge,
            raw,
            refs: AtomicUsize::new(1),
            disposed: AtomicBool::new(false),
        }
    }

    /// The opaque reference owned by this handle.
    #[must_use]
    pub fn raw(&self) -> NativeRef {
        self.raw
    }

    /// The bridge this handle allocates through. Useful for constructing
    /// sibling loaders against the same native runtime.
    #[must_use]
    pub fn bridge(&self) -> &Arc<dyn NativeBridge> {
        &self.bridge
    }

    /// The current managed reference count.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }

    /// Whether the native resource has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Takes an additional reference, on both the native and the managed
    /// side, and returns the new managed count.
    ///
    /// Refuses to resurrect a dead handle: the count is only incremented
    /// while it is still non-zero, so an acquire racing the final release
    /// fails instead of touching the disposed native resource.
    pub fn acquire(&self) -> Result<usize, LifecycleError> {
        let mut current = self.refs.load(Ordering::Acquire);
        loop {
            if current == 0 {
                return Err(LifecycleError::UseAfterDispose {
                    resource: self.raw,
                });
            }
            match self.refs.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
        self.bridge.ref_resource(self.raw);
        Ok(current + 1)
    }

    /// Drops one reference and returns the remaining managed count. The
    /// 1→0 transition runs the native destructor, exactly once.
    pub fn release(&self) -> Result<usize, LifecycleError> {
        let mut current = self.refs.load(Ordering::Acquire);
        loop {
            if current == 0 {
                return Err(LifecycleError::AlreadyDisposed {
                    resource: self.raw,
                });
            }
            match self.refs.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
        let remaining = current - 1;
        if remaining == 0 {
            self.dispose_native();
        }
        Ok(remaining)
    }

    /// Pushes a renderer-type value into the native resource.
    pub fn set_renderer_type(&self, renderer_type: RendererType) -> Result<(), LifecycleError> {
        if self.is_disposed() {
            return Err(LifecycleError::UseAfterDispose {
                resource: self.raw,
            });
        }
        self.bridge.set_renderer_type(self.raw, renderer_type);
        Ok(())
    }

    // The swap makes the destructor run at most once even when the last
    // explicit release races the owner's drop.
    fn dispose_native(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.bridge.dispose(self.raw);
        }
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        if self.is_disposed() {
            return;
        }
        let outstanding = self.refs.load(Ordering::Acquire);
        if outstanding > 1 {
            warn!(
                "native resource {:?} dropped with {} outstanding references",
                self.raw, outstanding
            );
        }
        self.dispose_native();
    }
}

/// A [`NativeBridge`] backed by an in-process resource table.
///
/// Used by hosts that run without a native runtime, and by the test-suite:
/// the table tracks which resources are live, so lifecycle violations
/// (double dispose, operations on unknown references) surface instead of
/// scribbling over freed memory.
#[derive(Debug, Default)]
pub struct InProcessBridge {
    next_ref: AtomicU64,
    resources: Mutex<HashMap<u64, ResourceState>>,
}

#[derive(Debug, Default)]
struct ResourceState {
    refs: u64,
    renderer_type: Option<RendererType>,
}

impl InProcessBridge {
    /// Creates a bridge with an empty resource table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of currently live resources.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.resources
            .lock()
            .expect("native resource table poisoned")
            .len()
    }

    /// Whether `resource` is live.
    #[must_use]
    pub fn is_live(&self, resource: NativeRef) -> bool {
        self.resources
            .lock()
            .expect("native resource table poisoned")
            .contains_key(&resource.raw())
    }

    /// The renderer type most recently pushed into `resource`, if any.
    #[must_use]
    pub fn renderer_type_of(&self, resource: NativeRef) -> Option<RendererType> {
        self.resources
            .lock()
            .expect("native resource table poisoned")
            .get(&resource.raw())
            .and_then(|state| state.renderer_type)
    }
}

impl NativeBridge for InProcessBridge {
    fn construct(&self) -> NativeRef {
        let raw = self.next_ref.fetch_add(1, Ordering::Relaxed) + 1;
        self.resources
            .lock()
            .expect("native resource table poisoned")
            .insert(raw, ResourceState { refs: 1, renderer_type: None });
        NativeRef::new(raw)
    }

    fn ref_resource(&self, resource: NativeRef) {
        let mut table = self
            .resources
            .lock()
            .expect("native resource table poisoned");
        match table.get_mut(&resource.raw()) {
            Some(state) => state.refs += 1,
            None => {
                error!("ref of unknown native resource {resource:?}");
                debug_assert!(false, "ref of unknown native resource");
            }
        }
    }

    fn dispose(&self, resource: NativeRef) {
        let removed = self
            .resources
            .lock()
            .expect("native resource table poisoned")
            .remove(&resource.raw());
        if removed.is_none() {
            error!("dispose of unknown native resource {resource:?}");
            debug_assert!(false, "double dispose of native resource");
        }
    }

    fn set_renderer_type(&self, resource: NativeRef, renderer_type: RendererType) {
        let mut table = self
            .resources
            .lock()
            .expect("native resource table poisoned");
        match table.get_mut(&resource.raw()) {
            Some(state) => state.renderer_type = Some(renderer_type),
            None => {
                error!("set_renderer_type on unknown native resource {resource:?}");
                debug_assert!(false, "set_renderer_type on unknown native resource");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_starts_at_one_reference() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge.clone());
        assert_eq!(handle.ref_count(), 1);
        assert!(!handle.is_disposed());
        assert!(bridge.is_live(handle.raw()));
    }

    #[test]
    fn test_acquire_then_release_leaves_count_unchanged() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge);
        assert_eq!(handle.acquire().unwrap(), 2);
        assert_eq!(handle.release().unwrap(), 1);
        assert_eq!(handle.ref_count(), 1);
        assert!(!handle.is_disposed());
    }

    #[test]
    fn test_release_to_zero_disposes_exactly_once() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge.clone());
        let raw = handle.raw();

        assert_eq!(handle.release().unwrap(), 0);
        assert!(handle.is_disposed());
        assert!(!bridge.is_live(raw));

        // The Drop backstop must not run the destructor again; the bridge
        // would debug-assert on a double dispose.
        drop(handle);
        assert_eq!(bridge.live_count(), 0);
    }

    #[test]
    fn test_release_after_dispose_is_an_error() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge);
        handle.release().unwrap();

        match handle.release() {
            Err(LifecycleError::AlreadyDisposed { resource }) => {
                assert_eq!(resource, handle.raw());
            }
            other => panic!("expected AlreadyDisposed, got {other:?}"),
        }
    }

    #[test]
    fn test_acquire_after_dispose_is_an_error() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge);
        handle.release().unwrap();
        assert!(matches!(
            handle.acquire(),
            Err(LifecycleError::UseAfterDispose { .. })
        ));
    }

    #[test]
    fn test_acquire_on_dead_handle_never_touches_native_side() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge.clone());
        handle.release().unwrap();

        // A native-side ref of the already-disposed resource would trip the
        // bridge's debug assertion; the refusal must come first.
        assert!(matches!(
            handle.acquire(),
            Err(LifecycleError::UseAfterDispose { .. })
        ));
        assert_eq!(handle.ref_count(), 0);
        assert_eq!(bridge.live_count(), 0);
    }

    #[test]
    fn test_drop_backstop_disposes_unreleased_handle() {
        let bridge = Arc::new(InProcessBridge::new());
        {
            let _handle = NativeHandle::new(bridge.clone());
            assert_eq!(bridge.live_count(), 1);
        }
        assert_eq!(bridge.live_count(), 0);
    }

    #[test]
    fn test_acquire_keeps_native_count_in_lock_step() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge.clone());
        handle.acquire().unwrap();
        handle.acquire().unwrap();

        let table = bridge
            .resources
            .lock()
            .expect("native resource table poisoned");
        assert_eq!(table.get(&handle.raw().raw()).unwrap().refs, 3);
    }

    #[test]
    fn test_set_renderer_type_passes_through() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = NativeHandle::new(bridge.clone());
        handle.set_renderer_type(RendererType::Software).unwrap();
        assert_eq!(
            bridge.renderer_type_of(handle.raw()),
            Some(RendererType::Software)
        );

        handle.release().unwrap();
        assert!(matches!(
            handle.set_renderer_type(RendererType::Gpu),
            Err(LifecycleError::UseAfterDispose { .. })
        ));
    }

    #[test]
    fn test_concurrent_acquire_release_balances() {
        let bridge = Arc::new(InProcessBridge::new());
        let handle = Arc::new(NativeHandle::new(bridge.clone()));

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        handle.acquire().unwrap();
                        handle.release().unwrap();
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(handle.ref_count(), 1);
        assert!(!handle.is_disposed());
        assert_eq!(bridge.live_count(), 1);
    }
}
