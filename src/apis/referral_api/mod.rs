pub mod function;
pub mod reply;
pub mod submit;
