//! Domain entities.

pub mod identity;
pub mod otp_record;

pub use identity::{ClientInfo, Identity, IdentityLookup, RealmRef};
pub use otp_record::{
    OtpRecord, ATTR_OTP_CODE, ATTR_OTP_EXPIRY, CODE_LENGTH, DEFAULT_TTL_MINUTES,
};
