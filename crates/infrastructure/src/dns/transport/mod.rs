pub mod resolver;
pub mod udp;

pub use resolver::resolve_upstream;
pub use udp::{UdpTransport, DEFAULT_TIMEOUT};

/// Receive buffer for upstream replies. Larger than the classic 512-byte
/// limit so EDNS-sized replies are not cut short.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;
