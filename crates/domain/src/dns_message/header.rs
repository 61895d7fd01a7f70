use crate::DomainError;

pub const HEADER_LEN: usize = 12;

/// The bit-packed second word of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderFlags {
    pub qr: bool,
    /// 4 bits.
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    /// 3 bits, reserved.
    pub z: u8,
    /// 4 bits.
    pub rcode: u8,
}

impl HeaderFlags {
    pub fn from_bits(bits: u16) -> Self {
        Self {
            qr: bits >> 15 == 1,
            opcode: ((bits >> 11) & 0x0F) as u8,
            aa: (bits >> 10) & 0x01 == 1,
            tc: (bits >> 9) & 0x01 == 1,
            rd: (bits >> 8) & 0x01 == 1,
            ra: (bits >> 7) & 0x01 == 1,
            z: ((bits >> 4) & 0x07) as u8,
            rcode: (bits & 0x0F) as u8,
        }
    }

    /// Packs the flags; out-of-range opcode/z/rcode values are masked.
    pub fn to_bits(&self) -> u16 {
        let mut bits = 0u16;
        bits |= u16::from(self.qr) << 15;
        bits |= (u16::from(self.opcode) & 0x0F) << 11;
        bits |= u16::from(self.aa) << 10;
        bits |= u16::from(self.tc) << 9;
        bits |= u16::from(self.rd) << 8;
        bits |= u16::from(self.ra) << 7;
        bits |= (u16::from(self.z) & 0x07) << 4;
        bits |= u16::from(self.rcode) & 0x0F;
        bits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: HeaderFlags,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::malformed(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                buf.len()
            )));
        }

        let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);

        Ok(Self {
            id: word(0),
            flags: HeaderFlags::from_bits(word(2)),
            qdcount: word(4),
            ancount: word(6),
            nscount: word(8),
            arcount: word(10),
        })
    }

    pub fn serialize(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&self.id.to_be_bytes());
        out[2..4].copy_from_slice(&self.flags.to_bits().to_be_bytes());
        out[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        out[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        out[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        out[10..12].copy_from_slice(&self.arcount.to_be_bytes());
        out
    }
}
