pub mod events;
pub mod request;
