#![allow(dead_code)]
use relay53_domain::{Answer, Header, HeaderFlags, Message, Name, Question};

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

pub fn name(s: &str) -> Name {
    s.parse().unwrap()
}

pub struct MessageBuilder {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl MessageBuilder {
    pub fn query(id: u16) -> Self {
        Self {
            header: Header {
                id,
                flags: HeaderFlags {
                    rd: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn response(id: u16) -> Self {
        let mut builder = Self::query(id);
        builder.header.flags.qr = true;
        builder.header.flags.ra = true;
        builder
    }

    pub fn flags(mut self, flags: HeaderFlags) -> Self {
        self.header.flags = flags;
        self
    }

    pub fn question(mut self, domain: &str) -> Self {
        self.questions
            .push(Question::new(name(domain), TYPE_A, CLASS_IN));
        self
    }

    pub fn question_typed(mut self, domain: &str, qtype: u16, qclass: u16) -> Self {
        self.questions.push(Question::new(name(domain), qtype, qclass));
        self
    }

    pub fn answer(mut self, domain: &str, ttl: u32, rdata: &[u8]) -> Self {
        self.answers.push(Answer::new(
            name(domain),
            TYPE_A,
            CLASS_IN,
            ttl,
            rdata.to_vec(),
        ));
        self
    }

    /// Builds with QDCOUNT/ANCOUNT matching the sections.
    pub fn build(self) -> Message {
        let mut header = self.header;
        header.qdcount = self.questions.len() as u16;
        header.ancount = self.answers.len() as u16;
        Message {
            header,
            questions: self.questions,
            answers: self.answers,
        }
    }
}

/// Wire bytes of "google.com" TYPE=A CLASS=IN, uncompressed.
pub fn google_question_bytes() -> Vec<u8> {
    vec![
        0x06, b'g', b'o', b'o', b'g', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, 0x00, 0x01, 0x00,
        0x01,
    ]
}
