pub mod health;
pub mod login_throttle;
