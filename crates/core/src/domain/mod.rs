pub mod booking;
pub mod draft;
pub mod room;
pub mod stay;
