//! Shared engine with deferred rendering
//!
//! Drawable updates and render cycles are mutually exclusive: both run
//! inside one blocking mutex. Updates never render; they only raise a dirty
//! flag, and a periodic [`SharedEngine::tick`] performs the render cycle.
//! Nested access from inside an `update` or `with` closure is refused with
//! [`Error::Busy`] instead of aliasing the engine; a nested `tick` skips the
//! frame and leaves it pending.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use lumen_hal::RegisterBus;
use portable_atomic::{AtomicBool, Ordering};

use crate::engine::{Engine, Error};
use crate::registry::{Registry, DEFAULT_CAPACITY};

/// Engine behind a mutex plus a dirty flag
pub struct SharedEngine<
    'a,
    M: RawMutex,
    B,
    const W: usize = 128,
    const P: usize = 8,
    const N: usize = DEFAULT_CAPACITY,
> {
    engine: Mutex<M, RefCell<Engine<'a, B, W, P, N>>>,
    dirty: AtomicBool,
}

impl<'a, M, B, const W: usize, const P: usize, const N: usize> SharedEngine<'a, M, B, W, P, N>
where
    M: RawMutex,
    B: RegisterBus,
{
    /// Wrap an engine behind `raw`; the first tick renders
    pub const fn new(raw: M, engine: Engine<'a, B, W, P, N>) -> Self {
        Self {
            engine: Mutex::const_new(raw, RefCell::new(engine)),
            dirty: AtomicBool::new(true),
        }
    }

    /// Mutate drawables and schedule a render
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut Registry<'a, N>) -> R,
    ) -> Result<R, Error<B::Error>> {
        let result = self.with(|engine| f(engine.registry_mut()))?;
        self.mark_dirty();
        Ok(result)
    }

    /// Locked access to the whole engine (init, controller commands)
    ///
    /// Does not schedule a render.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Engine<'a, B, W, P, N>) -> R,
    ) -> Result<R, Error<B::Error>> {
        self.engine.lock(|engine| {
            let mut engine = engine.try_borrow_mut().map_err(|_| Error::Busy)?;
            Ok(f(&mut engine))
        })
    }

    /// Schedule a render without touching drawables
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Check if a render is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Render if anything changed since the last successful frame
    ///
    /// Returns `Ok(true)` when a frame was sent. A failed or skipped frame
    /// leaves the engine dirty so the next tick tries again.
    pub fn tick(&self) -> Result<bool, Error<B::Error>> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }
        let rendered = self.engine.lock(|engine| match engine.try_borrow_mut() {
            Ok(mut engine) => engine.render().map(|()| true),
            Err(_) => Ok(false),
        });
        match rendered {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.mark_dirty();
                Ok(false)
            }
            Err(err) => {
                self.mark_dirty();
                Err(err)
            }
        }
    }
}
