pub mod calendar;
pub mod day;
pub mod event;
pub mod month;
pub mod week;
