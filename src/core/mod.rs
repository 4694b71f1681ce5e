pub mod clock;
pub mod driver;
pub mod input_adapter;
pub mod timer;

pub use clock::Clock;
pub use driver::{drive, FrameInput};
pub use input_adapter::WinitController;
pub use timer::FixedHz;
