use planeview_common::Viewport;
use std::cell::Cell;

/// The environment a viewer runs in: window metrics and a frame scheduler.
pub trait Host {
    /// Current logical size of the window's drawable area.
    fn inner_size(&self) -> Viewport;

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Ask for one more frame callback.
    fn request_frame(&self);
}

/// Host without a window: fixed metrics, frame requests are counted.
#[derive(Debug)]
pub struct HeadlessHost {
    size: Cell<Viewport>,
    device_pixel_ratio: Cell<f64>,
    pending: Cell<u32>,
    requested: Cell<u64>,
}

impl HeadlessHost {
    pub fn new(size: Viewport, device_pixel_ratio: f64) -> Self {
        Self {
            size: Cell::new(size),
            device_pixel_ratio: Cell::new(device_pixel_ratio),
            pending: Cell::new(0),
            requested: Cell::new(0),
        }
    }

    /// Simulate the window being resized.
    pub fn set_size(&self, size: Viewport) {
        self.size.set(size);
    }

    /// Simulate the window moving to a display with another density.
    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        self.device_pixel_ratio.set(ratio);
    }

    /// Frames requested but not yet taken.
    pub fn pending_frames(&self) -> u32 {
        self.pending.get()
    }

    /// Total frames ever requested.
    pub fn frames_requested(&self) -> u64 {
        self.requested.get()
    }

    /// Consume one pending frame request. False when none is pending.
    pub fn take_frame(&self) -> bool {
        match self.pending.get() {
            0 => false,
            n => {
                self.pending.set(n - 1);
                true
            }
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(Viewport::new(1280, 720), 1.0)
    }
}

impl Host for HeadlessHost {
    fn inner_size(&self) -> Viewport {
        self.size.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.get()
    }

    fn request_frame(&self) {
        self.pending.set(self.pending.get() + 1);
        self.requested.set(self.requested.get() + 1);
    }
}
