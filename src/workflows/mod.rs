pub mod approval;
pub mod booking;
