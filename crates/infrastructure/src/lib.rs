pub mod capture;
pub mod system;
