mod answer_locally;
mod forward_query;
mod handle_datagram;

pub use answer_locally::AnswerLocallyUseCase;
pub use forward_query::ForwardQueryUseCase;
pub use handle_datagram::HandleDatagramUseCase;
