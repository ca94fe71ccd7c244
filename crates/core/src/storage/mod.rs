mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::ItemStore;
pub use types::{item_key, Item, KEY_ATTRIBUTE};
