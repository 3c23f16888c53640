pub mod email_controller;
pub mod resend;
