pub mod clock;
pub mod debounce;
pub mod fps;
pub mod gpu_context;
pub mod viewport;

pub use clock::Clock;
pub use debounce::{debounce, Debounced};
pub use fps::{FpsCounter, FPS_UPDATE_INTERVAL};
pub use gpu_context::GpuContext;
pub use viewport::Viewport;
