mod clock;
mod frame_decoder;
mod frame_source;
mod route_resolver;

pub use clock::Clock;
pub use frame_decoder::FrameDecoder;
pub use frame_source::{CaptureOpener, FrameSource};
pub use route_resolver::RouteResolver;
