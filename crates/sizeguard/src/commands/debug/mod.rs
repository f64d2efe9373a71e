pub mod events;
pub mod inspect;
pub mod list;
