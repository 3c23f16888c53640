pub mod bot_filter;
pub mod clock;
pub mod intake;
pub mod submission;
pub mod template;
