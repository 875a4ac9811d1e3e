pub mod controls;
pub mod viewport;
