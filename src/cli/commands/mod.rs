mod feedback;
mod generate;
mod init;
mod pages;
mod signups;

pub use feedback::cmd_feedback;
pub use generate::cmd_generate;
pub use init::cmd_init;
pub use pages::cmd_pages;
pub use signups::cmd_signups;
