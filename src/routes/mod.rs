//! Action handlers reached through `handle_action`.

pub mod card;
pub mod util;
