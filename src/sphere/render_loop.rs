//! Host-independent frame loop. A `FrameClock` stands in for the display's
//! per-frame callback and a `Surface` for the 2D canvas.

use super::{Field, Frame, Point, Pointer, Viewport};

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: &'static str,
    pub alpha: f64,
    pub width: f64,
}

pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    fn line(&mut self, from: Point, to: Point, style: Style);
    fn disc(&mut self, center: Point, radius: f64, style: Style);
}

/// Yields frame timestamps in milliseconds; `None` means the host went away
pub trait FrameClock {
    fn next_frame(&mut self) -> Option<f64>;
}

impl<F: FnMut() -> Option<f64>> FrameClock for F {
    fn next_frame(&mut self) -> Option<f64> {
        self()
    }
}

/// Shared between the UI and the loop.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Last pointer position written by input handlers, read once per frame.
/// Input and frames share one thread, so a `Cell` is enough.
#[derive(Clone, Default)]
pub struct PointerCell(Rc<Cell<Pointer>>);

impl PointerCell {
    pub fn set(&self, pointer: Pointer) {
        self.0.set(pointer);
    }

    pub fn move_to(&self, client_x: f64, client_y: f64, window: Viewport) {
        self.set(Pointer::from_client(client_x, client_y, window));
    }

    pub fn get(&self) -> Pointer {
        self.0.get()
    }
}

pub struct RenderLoop {
    field: Field,
    pointer: PointerCell,
}

impl RenderLoop {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            pointer: PointerCell::default(),
        }
    }

    pub fn pointer(&self) -> PointerCell {
        self.pointer.clone()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.field.resize(viewport);
    }

    /// Draws a single frame and hands back what was drawn
    pub fn render<S: Surface + ?Sized>(&self, ts: f64, surface: &mut S) -> Frame {
        let frame = self.field.frame(ts, self.pointer.get());
        frame.paint(surface);
        frame
    }

    /// Draws until the clock stops or `cancel` fires. Returns the number of frames drawn.
    pub fn run<C, S>(&self, clock: &mut C, surface: &mut S, cancel: &CancellationToken) -> usize
    where
        C: FrameClock + ?Sized,
        S: Surface + ?Sized,
    {
        let mut frames = 0;
        while !cancel.is_cancelled() {
            let Some(ts) = clock.next_frame() else {
                break;
            };
            self.render(ts, surface);
            frames += 1;
        }
        debug!("Render loop stopped after {} frames", frames);
        frames
    }
}
