//! Render cycle controller
//!
//! The engine owns the drawable registry, the framebuffer and the bus. A
//! render cycle clears the framebuffer, paints every used slot in ascending
//! order and streams the whole buffer to the controller as one data block.
//!
//! Transmission is synchronous and single-buffered: `render` returns once
//! the bus has accepted the frame. Failures are handed back to the caller
//! untouched; retrying is up to the bus or the caller's scheduler.

use lumen_hal::RegisterBus;

use crate::drawable::DrawableError;
use crate::framebuffer::Framebuffer;
use crate::raster;
use crate::registry::{Registry, DEFAULT_CAPACITY};

/// Control byte: the rest of the transfer is a command stream
pub const CONTROL_COMMAND_STREAM: u8 = 0x00;

/// Control byte: the rest of the transfer is display RAM data
pub const CONTROL_DATA_STREAM: u8 = 0x40;

/// Engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Registry operation failed
    Drawable(DrawableError),
    /// Bus rejected the transfer
    Transport(E),
    /// Engine already borrowed further up the call stack
    Busy,
}

impl<E> From<DrawableError> for Error<E> {
    fn from(err: DrawableError) -> Self {
        Error::Drawable(err)
    }
}

/// Drawable registry, framebuffer and bus for one display
///
/// `W` x `P` is the framebuffer geometry in columns and pages, `N` the
/// number of drawable slots.
pub struct Engine<
    'a,
    B,
    const W: usize = 128,
    const P: usize = 8,
    const N: usize = DEFAULT_CAPACITY,
> {
    bus: B,
    registry: Registry<'a, N>,
    framebuffer: Framebuffer<W, P>,
    frames: u32,
}

impl<'a, B, const W: usize, const P: usize, const N: usize> Engine<'a, B, W, P, N>
where
    B: RegisterBus,
{
    /// Create an engine with an empty registry and a blank framebuffer
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            registry: Registry::new(W, P * 8),
            framebuffer: Framebuffer::new(),
            frames: 0,
        }
    }

    /// Configure the controller and push the first frame
    ///
    /// `commands` goes out as a single command-stream transfer.
    pub fn init(&mut self, commands: &[u8]) -> Result<(), Error<B::Error>> {
        self.send_commands(commands)?;
        self.render()
    }

    /// Send a raw command stream to the controller
    pub fn send_commands(&mut self, commands: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus
            .write_block(CONTROL_COMMAND_STREAM, commands)
            .map_err(Error::Transport)
    }

    /// Clear the framebuffer and paint every used drawable, without sending
    pub fn rasterize(&mut self) {
        self.framebuffer.clear();
        for (_, drawable) in self.registry.iter() {
            raster::paint(drawable, &mut self.framebuffer);
        }
    }

    /// Run one render cycle: rasterize, then transmit the whole buffer
    pub fn render(&mut self) -> Result<(), Error<B::Error>> {
        self.rasterize();
        if let Err(err) = self
            .bus
            .write_block(CONTROL_DATA_STREAM, self.framebuffer.raw())
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("frame {} transfer failed", self.frames);
            return Err(Error::Transport(err));
        }
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }

    /// Drawables
    pub fn registry(&self) -> &Registry<'a, N> {
        &self.registry
    }

    /// Drawables, for creating and updating objects
    pub fn registry_mut(&mut self) -> &mut Registry<'a, N> {
        &mut self.registry
    }

    /// Last rasterized frame
    pub fn framebuffer(&self) -> &Framebuffer<W, P> {
        &self.framebuffer
    }

    /// Underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Frames successfully transmitted
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::drawable::Color;
    use heapless::Vec;

    /// Bus that records every block and can be told to fail
    #[derive(Default)]
    pub(crate) struct MockBus {
        pub writes: Vec<(u8, Vec<u8, 1024>), 4>,
        pub attempts: usize,
        pub fail: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct BusFault;

    impl RegisterBus for MockBus {
        type Error = BusFault;

        fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), BusFault> {
            self.attempts += 1;
            if self.fail {
                return Err(BusFault);
            }
            let mut bytes = Vec::new();
            bytes.extend_from_slice(data).map_err(|_| BusFault)?;
            if self.writes.is_full() {
                self.writes.remove(0);
            }
            self.writes.push((register, bytes)).map_err(|_| BusFault)?;
            Ok(())
        }
    }

    type TestEngine<'a> = Engine<'a, MockBus, 128, 8, 8>;

    #[test]
    fn test_render_empty_registry_sends_blank_frame() {
        let mut engine = TestEngine::new(MockBus::default());
        engine.render().unwrap();

        let bus = engine.release();
        assert_eq!(bus.writes.len(), 1);
        let (control, data) = &bus.writes[0];
        assert_eq!(*control, CONTROL_DATA_STREAM);
        assert_eq!(data.len(), 128 * 8);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_init_sends_commands_then_frame() {
        let mut engine = TestEngine::new(MockBus::default());
        engine.init(&[0xAE, 0x20, 0x00]).unwrap();

        assert_eq!(engine.frames(), 1);
        let bus = engine.release();
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[0].0, CONTROL_COMMAND_STREAM);
        assert_eq!(bus.writes[0].1.as_slice(), &[0xAE, 0x20, 0x00]);
        assert_eq!(bus.writes[1].0, CONTROL_DATA_STREAM);
    }

    #[test]
    fn test_render_transmits_rasterized_drawables() {
        let mut engine = TestEngine::new(MockBus::default());
        engine.registry_mut().create_text(0, 0, "A", 1, false).unwrap();
        engine.registry_mut().create_line(0, 9, 3, 9).unwrap();
        engine.render().unwrap();

        let mut sent: Vec<u8, 1024> = Vec::new();
        sent.extend_from_slice(engine.framebuffer().raw()).unwrap();
        assert_eq!(sent[0], 0x7E);
        assert_eq!(&sent[128..132], &[0x02; 4]);
        assert_eq!(engine.release().writes[0].1, sent);
    }

    #[test]
    fn test_render_starts_from_blank_frame() {
        let mut engine = TestEngine::new(MockBus::default());
        let id = engine.registry_mut().create_rectangle(0, 0, 3, 8).unwrap();
        engine.render().unwrap();
        assert_eq!(engine.framebuffer().byte(0, 0), 0xFF);

        engine.registry_mut().move_to(id, 50, 16).unwrap();
        engine.render().unwrap();
        assert_eq!(engine.framebuffer().byte(0, 0), 0);
        assert_eq!(engine.framebuffer().byte(2, 50), 0xFF);
    }

    #[test]
    fn test_slot_order_decides_overlap() {
        let mut engine = TestEngine::new(MockBus::default());
        let reg = engine.registry_mut();
        reg.create_rectangle(0, 0, 7, 8).unwrap();
        let eraser = reg.create_rectangle(2, 0, 1, 8).unwrap();
        reg.set_rectangle_color(eraser, Color::Black).unwrap();
        engine.rasterize();

        let page = engine.framebuffer().page(0).unwrap();
        assert_eq!(&page[0..8], &[0xFF, 0xFF, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_transport_failure_is_reported_once() {
        let mut bus = MockBus::default();
        bus.fail = true;
        let mut engine = TestEngine::new(bus);

        assert_eq!(engine.render(), Err(Error::Transport(BusFault)));
        assert_eq!(engine.frames(), 0);
        assert_eq!(engine.bus_mut().attempts, 1);

        assert_eq!(engine.init(&[0xAE]), Err(Error::Transport(BusFault)));
        assert_eq!(engine.bus_mut().attempts, 2);
    }

    #[test]
    fn test_drawable_error_converts() {
        let err: Error<BusFault> = DrawableError::AllocationFailed.into();
        assert_eq!(err, Error::Drawable(DrawableError::AllocationFailed));
    }
}
