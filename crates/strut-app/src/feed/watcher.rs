//! Viewport intersection watcher.
//!
//! The platform (browser, native list view) owns the actual visibility
//! sensor; this module owns its lifecycle. [`IntersectionWatcher`] wraps
//! the sensor callback behind an armed flag so that after [`detach`]
//! returns, no enter-viewport signal reaches the consumer, no matter how
//! late the platform fires. Firing into torn-down state is the defect
//! class this gate exists to prevent.
//!
//! [`detach`]: IntersectionWatcher::detach

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared enter-viewport callback handed to the platform sensor.
pub type EnterSignal = Arc<dyn Fn() + Send + Sync>;

/// A platform visibility sensor.
///
/// Implementations observe the trailing element of the container named by
/// `container_id` and invoke `on_enter` each time it becomes visible,
/// until the returned binding is disconnected.
pub trait ViewportSensor {
    /// Begin observing; the binding carries the platform disconnect hook.
    fn observe(&self, container_id: &str, on_enter: EnterSignal) -> SensorBinding;
}

/// Disconnect hook returned by a sensor.
pub struct SensorBinding {
    disconnect: Option<Box<dyn FnOnce() + Send>>,
}

impl SensorBinding {
    /// A binding that runs `hook` on disconnect.
    pub fn new(hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            disconnect: Some(Box::new(hook)),
        }
    }

    /// A binding with no platform-side teardown.
    pub fn noop() -> Self {
        Self { disconnect: None }
    }

    fn disconnect(&mut self) {
        if let Some(hook) = self.disconnect.take() {
            hook();
        }
    }
}

impl std::fmt::Debug for SensorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorBinding")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}

/// Observes a container's trailing element and forwards enter-viewport
/// signals while armed.
///
/// The consumer above (the pager) is responsible for ignoring redundant
/// signals while fetching or exhausted; the watcher only guarantees that
/// nothing is forwarded after detach. Detach is idempotent and also runs
/// on drop: the watcher owns its own teardown.
pub struct IntersectionWatcher {
    armed: Arc<AtomicBool>,
    binding: Mutex<Option<SensorBinding>>,
    container_id: String,
}

impl IntersectionWatcher {
    /// Attach to `sensor`, forwarding enter signals to `on_enter`.
    pub fn attach<S>(
        sensor: &S,
        container_id: impl Into<String>,
        on_enter: impl Fn() + Send + Sync + 'static,
    ) -> Self
    where
        S: ViewportSensor + ?Sized,
    {
        let container_id = container_id.into();
        let armed = Arc::new(AtomicBool::new(true));

        let gate = armed.clone();
        let signal: EnterSignal = Arc::new(move || {
            if gate.load(Ordering::Acquire) {
                on_enter();
            }
        });

        let binding = sensor.observe(&container_id, signal);
        debug!(container = %container_id, "viewport watcher attached");
        Self {
            armed,
            binding: Mutex::new(Some(binding)),
            container_id,
        }
    }

    /// Stop observing.
    ///
    /// Disarms before disconnecting, so a sensor firing mid-teardown is
    /// dropped at the gate. Safe to call any number of times.
    pub fn detach(&self) {
        self.armed.store(false, Ordering::Release);
        if let Some(mut binding) = self.binding.lock().take() {
            binding.disconnect();
            debug!(container = %self.container_id, "viewport watcher detached");
        }
    }

    /// Whether signals are still being forwarded.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// The observed container.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for IntersectionWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntersectionWatcher")
            .field("container_id", &self.container_id)
            .field("armed", &self.is_armed())
            .finish()
    }
}
