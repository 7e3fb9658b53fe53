pub mod latest_slot;
pub mod logger;
