//! Well-known link relation names
//!
//! See the IANA link relations registry for their meaning. Any string is a
//! valid rel; these exist so common ones are not misspelled.

pub const SELF: &str = "self";
pub const NEXT: &str = "next";
pub const PREV: &str = "prev";
pub const FIRST: &str = "first";
pub const LAST: &str = "last";
pub const UP: &str = "up";
pub const COLLECTION: &str = "collection";
pub const ITEM: &str = "item";
pub const EDIT: &str = "edit";
pub const RELATED: &str = "related";
pub const ALTERNATE: &str = "alternate";
