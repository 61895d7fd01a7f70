use super::{read_u16, Answer, Name};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: Name, qtype: u16, qclass: u16) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    /// Decodes one question at `offset` of the whole message `buf`.
    pub fn parse(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = Name::parse(buf, offset)?;
        let qtype = read_u16(buf, pos, "question TYPE")?;
        let qclass = read_u16(buf, pos + 2, "question CLASS")?;

        Ok((Self::new(name, qtype, qclass), pos + 4))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.wire_len() + 4);
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        self.name.write_to(out);
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
    }

    /// An answer for this question's name, type and class.
    pub fn answer(&self, ttl: u32, rdata: &[u8]) -> Answer {
        Answer::new(self.name.clone(), self.qtype, self.qclass, ttl, rdata.to_vec())
    }
}
