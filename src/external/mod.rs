pub mod email;
pub mod feedback;
