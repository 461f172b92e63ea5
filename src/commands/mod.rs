pub mod add;
pub mod day;
pub mod remove;
pub mod toggle;
pub mod watch;
pub mod week;
