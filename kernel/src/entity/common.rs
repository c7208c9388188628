mod document;
mod slug;
mod text;

pub use self::{document::*, slug::*};
pub(crate) use self::text::*;
