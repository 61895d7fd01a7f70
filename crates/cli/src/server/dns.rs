use relay53_domain::config::ServerConfig;
use relay53_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{info, warn};

pub async fn start_dns_server(config: &ServerConfig, handler: DnsServerHandler) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = config.listen_addr().parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(
        bind_address = %socket.local_addr()?,
        concurrent = config.concurrent,
        max_datagram_size = config.max_datagram_size,
        "DNS server ready"
    );

    run_udp_listener(
        socket,
        Arc::new(handler),
        config.max_datagram_size,
        config.concurrent,
    )
    .await;

    Ok(())
}

/// Receives datagrams until the task is cancelled. Errors on one datagram
/// are logged and the loop moves on to the next.
async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    max_datagram_size: usize,
    concurrent: bool,
) {
    let mut recv_buf = vec![0u8; max_datagram_size];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        if concurrent {
            let handler = Arc::clone(&handler);
            let socket = Arc::clone(&socket);
            let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
            tokio::spawn(async move {
                serve_datagram(&socket, &handler, &owned_buf, from).await;
            });
        } else {
            serve_datagram(&socket, &handler, &recv_buf[..n], from).await;
        }
    }
}

async fn serve_datagram(
    socket: &UdpSocket,
    handler: &DnsServerHandler,
    datagram: &[u8],
    client: SocketAddr,
) {
    if let Some(response) = handler.handle_raw_udp(datagram, client).await {
        if let Err(e) = socket.send_to(&response, client).await {
            warn!(client = %client, error = %e, "Failed to send response");
        }
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
