pub mod configured;
pub mod log;
pub mod smtp;

pub use configured::ConfiguredEmailSender;
pub use log::LogEmailSender;
pub use smtp::SmtpEmailSender;
