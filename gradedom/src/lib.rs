pub mod element;
pub mod event;

pub use element::{find_element, Element};
pub use event::{Event, EventControl, Key, Modifiers};
