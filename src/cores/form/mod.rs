pub mod controller;
pub mod definition;
pub mod fields;
pub mod phone;
pub mod referral_form;
pub mod state;
pub mod transport;
