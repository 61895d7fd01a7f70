//! Domain names in wire format, with compression-pointer decoding
//! (RFC 1035 §4.1.4).

use crate::DomainError;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
/// Upper bound on a name's uncompressed wire length, terminator included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0xC0;
const MAX_POINTER_HOPS: usize = 64;

/// One non-empty label of at most 63 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Vec<u8>);

impl Label {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::malformed("empty label"));
        }
        if bytes.len() > MAX_LABEL_LEN {
            return Err(DomainError::malformed(format!(
                "label of {} bytes exceeds {}",
                bytes.len(),
                MAX_LABEL_LEN
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            match b {
                b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                0x21..=0x7E => write!(f, "{}", b as char)?,
                _ => write!(f, "\\{:03}", b)?,
            }
        }
        Ok(())
    }
}

/// An ordered sequence of labels. The root name has no labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name {
    labels: Vec<Label>,
}

impl Name {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: Vec<Label>) -> Result<Self, DomainError> {
        let name = Self { labels };
        if name.wire_len() > MAX_NAME_LEN {
            return Err(DomainError::malformed(format!(
                "name of {} bytes exceeds {}",
                name.wire_len(),
                MAX_NAME_LEN
            )));
        }
        Ok(name)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uncompressed encoded length, including the terminating zero byte.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Decodes the name that starts at `start` within the whole message
    /// `buf`, following compression pointers.
    ///
    /// Returns the name and the offset just past its encoded occurrence at
    /// `start`: two bytes after the first pointer, or one byte after the
    /// inline terminator. Pointers must point strictly backwards; at most
    /// 64 hops are followed.
    pub fn parse(buf: &[u8], start: usize) -> Result<(Self, usize), DomainError> {
        let mut labels = Vec::new();
        let mut wire_len = 1;
        let mut pos = start;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0;

        loop {
            let len_byte = *buf.get(pos).ok_or_else(|| {
                DomainError::malformed(format!(
                    "name at offset {} has no terminator before end of buffer",
                    start
                ))
            })?;

            if len_byte & POINTER_TAG == POINTER_TAG {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::malformed(format!(
                        "compression pointer at offset {} is truncated",
                        pos
                    ))
                })?;
                let target = (usize::from(len_byte & !POINTER_TAG) << 8) | usize::from(low);

                if target >= pos {
                    return Err(DomainError::malformed(format!(
                        "compression pointer at offset {} targets offset {}, not an earlier one",
                        pos, target
                    )));
                }

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(DomainError::malformed(format!(
                        "name at offset {} follows more than {} compression pointers",
                        start, MAX_POINTER_HOPS
                    )));
                }

                resume_at.get_or_insert(pos + 2);
                pos = target;
                continue;
            }

            if len_byte & POINTER_TAG != 0 {
                return Err(DomainError::malformed(format!(
                    "unsupported label type 0x{:02X} at offset {}",
                    len_byte, pos
                )));
            }

            let len = usize::from(len_byte);
            if len == 0 {
                return Ok((Self { labels }, resume_at.unwrap_or(pos + 1)));
            }

            let end = pos + 1 + len;
            if end > buf.len() {
                return Err(DomainError::malformed(format!(
                    "label at offset {} declares {} bytes past end of buffer",
                    pos, len
                )));
            }

            wire_len += len + 1;
            if wire_len > MAX_NAME_LEN {
                return Err(DomainError::malformed(format!(
                    "name at offset {} exceeds {} bytes",
                    start, MAX_NAME_LEN
                )));
            }

            labels.push(Label(buf[pos + 1..end].to_vec()));
            pos = end;
        }
    }

    /// Full label sequence plus the zero terminator; never compressed.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);
    }
}

impl FromStr for Name {
    type Err = DomainError;

    /// Parses dotted presentation form: `google.com`, `google.com.` or `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let labels = trimmed
            .split('.')
            .map(|part| Label::new(part.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::malformed(format!("invalid name '{}': {}", s, e)))?;

        Self::from_labels(labels)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}
