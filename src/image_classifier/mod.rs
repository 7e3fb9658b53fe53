pub mod impl_fake;
pub mod impl_tract;
pub mod interface;
pub mod labels;
pub mod models;
pub mod tract;
