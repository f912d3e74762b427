pub mod content;
pub mod definition;
pub mod node;

pub use content::*;
pub use definition::*;
pub use node::*;
