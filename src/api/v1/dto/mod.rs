pub mod login;
pub mod rules;
pub mod users;
