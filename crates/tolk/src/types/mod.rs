mod key;
mod node;
pub mod options;
mod value;

pub use key::Key;
pub use node::{Node, PLURAL_CATEGORIES, is_plural_tag};
pub use options::Options;
pub use value::Value;
