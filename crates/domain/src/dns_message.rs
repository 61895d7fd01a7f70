//! DNS message codec (RFC 1035 §4.1).
//!
//! Decoding copies every retained byte range out of the input buffer, so a
//! parsed [`Message`] never borrows the datagram it came from. Names are
//! decoded against the whole message to resolve compression pointers; the
//! encoder always writes names uncompressed.

mod answer;
mod header;
mod name;
mod question;
mod split;

pub use answer::Answer;
pub use header::{Header, HeaderFlags, HEADER_LEN};
pub use name::{Label, Name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::Question;

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Message {
    /// Decodes a datagram: the header, then exactly QDCOUNT questions, then
    /// exactly ANCOUNT answers. Authority and additional records are not
    /// decoded; their header counts are kept as declared.
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        let header = Header::parse(buf)?;

        let mut offset = HEADER_LEN;
        let mut questions = Vec::new();
        for _ in 0..header.qdcount {
            let (question, next) = Question::parse(buf, offset)?;
            questions.push(question);
            offset = next;
        }

        let mut answers = Vec::new();
        for _ in 0..header.ancount {
            let (answer, next) = Answer::parse(buf, offset)?;
            answers.push(answer);
            offset = next;
        }

        Ok(Self {
            header,
            questions,
            answers,
        })
    }

    /// Header bytes followed by every question and every answer, in order.
    /// Counts are written from the header as it stands.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&self.header.serialize());
        for question in &self.questions {
            question.write_to(&mut out);
        }
        for answer in &self.answers {
            answer.write_to(&mut out);
        }
        out
    }

    /// Builds a response carrying one answer per question, all with the
    /// given `ttl` and `rdata`. The request flags are kept, QR is set.
    pub fn respond(&self, ttl: u32, rdata: &[u8]) -> Message {
        let answers: Vec<Answer> = self
            .questions
            .iter()
            .map(|question| question.answer(ttl, rdata))
            .collect();

        let mut header = self.header;
        header.flags.qr = true;
        header.qdcount = section_count(self.questions.len());
        header.ancount = section_count(answers.len());
        header.nscount = 0;
        header.arcount = 0;

        Message {
            header,
            questions: self.questions.clone(),
            answers,
        }
    }

    pub fn is_response(&self) -> bool {
        self.header.flags.qr
    }
}

/// Section length as a header count, saturating at `u16::MAX`.
pub(crate) fn section_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

pub(crate) fn read_u16(buf: &[u8], offset: usize, field: &str) -> Result<u16, DomainError> {
    buf.get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| past_end(field, offset))
}

pub(crate) fn read_u32(buf: &[u8], offset: usize, field: &str) -> Result<u32, DomainError> {
    buf.get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| past_end(field, offset))
}

pub(crate) fn past_end(field: &str, offset: usize) -> DomainError {
    DomainError::malformed(format!("{} at offset {} runs past end of buffer", field, offset))
}
