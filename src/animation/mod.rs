pub mod ease;
pub mod interval;
pub mod spring;
