//! Splitting multi-question queries into single-question sub-queries and
//! merging the replies back.
//!
//! Correlation is positional: the i-th reply passed to [`Message::merge`]
//! must answer the i-th sub-query produced by [`Message::split`].

use super::{section_count, Message};

impl Message {
    /// One message per question, each with QDCOUNT = 1, the other counts 0,
    /// and the original ID and flags.
    pub fn split(&self) -> Vec<Message> {
        self.questions
            .iter()
            .map(|question| {
                let mut header = self.header;
                header.qdcount = 1;
                header.ancount = 0;
                header.nscount = 0;
                header.arcount = 0;

                Message {
                    header,
                    questions: vec![question.clone()],
                    answers: Vec::new(),
                }
            })
            .collect()
    }

    /// Concatenates questions and answers of `parts` in order under the
    /// header of the first part. QDCOUNT and ANCOUNT are the totals;
    /// NSCOUNT and ARCOUNT are zero since those sections are never carried.
    ///
    /// Returns `None` for an empty sequence.
    pub fn merge(parts: impl IntoIterator<Item = Message>) -> Option<Message> {
        let mut parts = parts.into_iter();
        let mut merged = parts.next()?;

        for part in parts {
            merged.questions.extend(part.questions);
            merged.answers.extend(part.answers);
        }

        merged.header.qdcount = section_count(merged.questions.len());
        merged.header.ancount = section_count(merged.answers.len());
        merged.header.nscount = 0;
        merged.header.arcount = 0;

        Some(merged)
    }
}
