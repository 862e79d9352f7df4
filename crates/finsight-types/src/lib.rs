pub mod analysis;
pub mod block;
pub mod provider;
pub mod reasoning;
pub mod response;
pub mod tool;

pub use analysis::*;
pub use block::*;
pub use provider::*;
pub use reasoning::*;
pub use response::*;
pub use tool::*;
