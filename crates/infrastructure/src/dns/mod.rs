pub mod server;
pub mod transport;

pub use server::DnsServerHandler;
pub use transport::{resolve_upstream, UdpTransport};
