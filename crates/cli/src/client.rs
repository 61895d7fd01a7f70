//! `relay53 query`: sends one multi-question query and prints the reply.

use clap::Args;
use relay53_application::ports::UpstreamExchange;
use relay53_domain::{Answer, DomainError, HeaderFlags, Message, Name, Question, UpstreamAddr};
use relay53_infrastructure::dns::UdpTransport;
use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

const TYPE_A: u16 = 1;
const TYPE_AAAA: u16 = 28;
const CLASS_IN: u16 = 1;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Server to query (HOST:PORT)
    #[arg(short, long, value_name = "HOST:PORT")]
    pub server: String,

    /// Names to ask for; all of them go into a single message
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Question type (1 = A, 28 = AAAA, ...)
    #[arg(short = 't', long, default_value_t = TYPE_A)]
    pub qtype: u16,

    /// Message ID; random when omitted
    #[arg(long)]
    pub id: Option<u16>,

    /// Reply timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,
}

pub async fn run_query(args: QueryArgs) -> anyhow::Result<()> {
    let query = build_query(
        args.id.unwrap_or_else(|| fastrand::u16(..)),
        &args.names,
        args.qtype,
    )?;

    let upstream: UpstreamAddr =
        args.server
            .parse()
            .map_err(|reason| DomainError::AddressResolution {
                address: args.server.clone(),
                reason,
            })?;
    let transport =
        UdpTransport::for_upstream(&upstream, Duration::from_millis(args.timeout_ms)).await?;

    let reply = transport.exchange(&query.serialize()).await?;
    let response = Message::parse(&reply)?;

    print!("{}", render(&response));
    Ok(())
}

pub(crate) fn build_query(id: u16, names: &[String], qtype: u16) -> Result<Message, DomainError> {
    let questions = names
        .iter()
        .map(|n| {
            n.parse::<Name>()
                .map(|name| Question::new(name, qtype, CLASS_IN))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut message = Message {
        questions,
        ..Default::default()
    };
    message.header.id = id;
    message.header.flags = HeaderFlags {
        rd: true,
        ..Default::default()
    };
    message.header.qdcount = u16::try_from(message.questions.len())
        .map_err(|_| DomainError::malformed("too many questions for one message"))?;

    Ok(message)
}

pub(crate) fn render(response: &Message) -> String {
    let header = &response.header;
    let mut out = String::new();

    let _ = writeln!(
        out,
        ";; id {}, flags 0x{:04X}, rcode {}, {} question(s), {} answer(s)",
        header.id,
        header.flags.to_bits(),
        header.flags.rcode,
        response.questions.len(),
        response.answers.len()
    );

    let _ = writeln!(out, ";; QUESTION");
    for q in &response.questions {
        let _ = writeln!(out, "{}\tclass {}\ttype {}", q.name, q.qclass, q.qtype);
    }

    let _ = writeln!(out, ";; ANSWER");
    for a in &response.answers {
        let _ = writeln!(
            out,
            "{}\t{}\tclass {}\ttype {}\t{}",
            a.name,
            a.ttl,
            a.rclass,
            a.rtype,
            format_rdata(a)
        );
    }

    out
}

fn format_rdata(answer: &Answer) -> String {
    match (answer.rtype, answer.rdata.len()) {
        (TYPE_A, 4) => {
            let b = &answer.rdata;
            Ipv4Addr::new(b[0], b[1], b[2], b[3]).to_string()
        }
        (TYPE_AAAA, 16) => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&answer.rdata);
            Ipv6Addr::from(octets).to_string()
        }
        _ => answer
            .rdata
            .iter()
            .fold(String::from("\\# "), |mut s, b| {
                let _ = write!(s, "{:02x}", b);
                s
            }),
    }
}
