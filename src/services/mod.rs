pub mod aggregate;
pub mod attendance;
pub mod compare;
pub mod directory;
pub mod hr_api;
pub mod numeric;
pub mod payroll;
pub mod period;
pub mod revenue;
pub mod salary;
