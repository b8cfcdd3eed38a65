pub mod amount_input;
pub mod confirmation_dialog;
pub mod otp_input;
pub mod styled;
