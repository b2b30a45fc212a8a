// HTTP routes
pub mod analysis;
pub mod chat;
pub mod health;
pub mod timeline;

pub use analysis::*;
pub use chat::*;
pub use health::*;
pub use timeline::*;
