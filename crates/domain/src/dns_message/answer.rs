use super::{read_u16, read_u32, Name};
use crate::DomainError;

/// A resource record from the answer section. RDATA is kept opaque;
/// RDLENGTH is always its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: Name,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl Answer {
    pub fn new(name: Name, rtype: u16, rclass: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// RDATA is at most `u16::MAX` bytes for any decoded record; longer
    /// hand-built payloads are truncated on the wire.
    pub fn rdlength(&self) -> u16 {
        u16::try_from(self.rdata.len()).unwrap_or(u16::MAX)
    }

    /// Decodes one resource record at `offset` of the whole message `buf`.
    pub fn parse(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = Name::parse(buf, offset)?;
        let rtype = read_u16(buf, pos, "answer TYPE")?;
        let rclass = read_u16(buf, pos + 2, "answer CLASS")?;
        let ttl = read_u32(buf, pos + 4, "answer TTL")?;
        let rdlength = usize::from(read_u16(buf, pos + 8, "answer RDLENGTH")?);

        let start = pos + 10;
        let rdata = buf.get(start..start + rdlength).ok_or_else(|| {
            DomainError::malformed(format!(
                "RDATA of {} bytes at offset {} runs past end of buffer",
                rdlength, start
            ))
        })?;

        Ok((
            Self::new(name, rtype, rclass, ttl, rdata.to_vec()),
            start + rdlength,
        ))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.wire_len() + 10 + self.rdata.len());
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        let rdlength = self.rdlength();
        self.name.write_to(out);
        out.extend_from_slice(&self.rtype.to_be_bytes());
        out.extend_from_slice(&self.rclass.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&rdlength.to_be_bytes());
        out.extend_from_slice(&self.rdata[..usize::from(rdlength)]);
    }
}
