mod args;
mod call;

pub use args::ToolArguments;
pub use call::{ToolCallData, ToolResultData};
