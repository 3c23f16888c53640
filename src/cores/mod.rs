pub mod form;
pub mod mailer;
pub mod referrals;
