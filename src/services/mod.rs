pub mod recalculation;
pub mod recording;
pub mod server;
