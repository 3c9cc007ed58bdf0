pub use super::feedback::Entity as Feedback;
pub use super::generations::Entity as Generations;
pub use super::signups::Entity as Signups;
