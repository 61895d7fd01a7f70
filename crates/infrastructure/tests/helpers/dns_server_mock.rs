#![allow(dead_code)]
use relay53_domain::{HeaderFlags, Message, Question};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;
pub const MOCK_RDATA: [u8; 4] = [93, 184, 216, 34];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Answers every question with `MOCK_RDATA`.
    Answer,
    /// Reads queries and never replies.
    Silent,
    /// Replies with the query ID flipped.
    WrongId,
}

/// Upstream resolver on 127.0.0.1 that answers through the crate's own
/// codec.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&received);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_mock_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        let message = Message::parse(query).ok()?;
        let mut reply = message.respond(60, &MOCK_RDATA);
        reply.header.flags.ra = true;

        match behavior {
            MockBehavior::Answer => Some(reply.serialize()),
            MockBehavior::Silent => None,
            MockBehavior::WrongId => {
                reply.header.id = !reply.header.id;
                Some(reply.serialize())
            }
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn query(id: u16, domains: &[&str]) -> Message {
    let mut message = Message::default();
    message.header.id = id;
    message.header.flags = HeaderFlags {
        rd: true,
        ..Default::default()
    };
    message.questions = domains
        .iter()
        .map(|d| Question::new(d.parse().unwrap(), TYPE_A, CLASS_IN))
        .collect();
    message.header.qdcount = message.questions.len() as u16;
    message
}
