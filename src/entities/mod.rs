pub mod prelude;

pub mod feedback;
pub mod generations;
pub mod signups;
