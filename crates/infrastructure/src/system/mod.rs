pub mod clock;
pub mod route_resolver;

pub use clock::SystemClock;
pub use route_resolver::{match_interface, UdpProbeRouteResolver};
