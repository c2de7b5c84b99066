pub mod attendance;
pub mod dashboard;
pub mod directory;
pub mod general;
pub mod payroll;
pub mod revenue;
