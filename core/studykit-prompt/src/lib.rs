//! Chat prompt templates for studykit.
//!
//! A [`ChatPromptTemplate`] is an ordered list of [`MessageTemplate`]s. Text
//! templates reference `{variables}`; placeholders splice in a whole list of
//! [`Message`]s, typically prior conversation loaded with
//! [`load_chat_history`].
//!
//! ```
//! use studykit_prompt::{ChatPromptTemplate, Message, MessageTemplate, PromptValues};
//!
//! let template = ChatPromptTemplate::new(vec![
//!     MessageTemplate::system("You are a helpful customer support agent"),
//!     MessageTemplate::placeholder("chat_history"),
//!     MessageTemplate::human("{query}"),
//! ])
//! .unwrap();
//!
//! let prompt = template
//!     .invoke(
//!         &PromptValues::new()
//!             .messages("chat_history", vec![Message::human("I want a refund")])
//!             .text("query", "Where is my refund"),
//!     )
//!     .unwrap();
//! assert_eq!(prompt.len(), 3);
//! ```

mod error;
mod history;
mod message;
mod template;

pub use error::{PromptError, PromptResult};
pub use history::{load_chat_history, parse_chat_history};
pub use message::{ChatPrompt, Message, Role};
pub use template::{ChatPromptTemplate, MessageTemplate, PromptValue, PromptValues};
