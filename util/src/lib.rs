mod coalescing_receiver;
pub mod message_filter;

pub use coalescing_receiver::*;
