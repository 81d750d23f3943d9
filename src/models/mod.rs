pub mod gallery_item;
pub mod item_store;
pub mod source;

pub use gallery_item::*;
pub use item_store::*;
pub use source::*;
