pub mod otp_dto;

pub use otp_dto::{SendOtpRequest, VerifyOtpRequest};
