pub mod parser;
pub(crate) mod schema;

pub use self::parser::{OpenAiParser, UNKNOWN_MODEL};
