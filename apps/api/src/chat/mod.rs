// Chat API: plain chat, direct ask, and retrieval-augmented chat.
// Handlers stay thin; retrieval logic lives in retrieval::QuestionAnswerAdvisor.

pub mod handlers;
