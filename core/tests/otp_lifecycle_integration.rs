//! Integration tests for the OTP lifecycle driven through the public API

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use otp_core::domain::{
        Identity, RealmRef, VerifyOutcome, VerifyRejection, ATTR_OTP_CODE, ATTR_OTP_EXPIRY,
    };
    use otp_core::errors::{DeliveryError, DomainError};
    use otp_core::repositories::AttributeStore;
    use otp_core::services::{Clock, EmailServiceTrait, ManualClock, OtpService};
    use otp_shared::config::OtpConfig;

    // In-memory attribute store
    #[derive(Default)]
    struct MemoryStore {
        attributes: Mutex<HashMap<(String, String), String>>,
        verified: Mutex<HashMap<String, bool>>,
    }

    impl MemoryStore {
        fn get(&self, id: &str, key: &str) -> Option<String> {
            self.attributes
                .lock()
                .unwrap()
                .get(&(id.to_string(), key.to_string()))
                .cloned()
        }
    }

    #[async_trait]
    impl AttributeStore for MemoryStore {
        async fn get_attribute(&self, id: &str, key: &str) -> Result<Option<String>, DomainError> {
            Ok(self.get(id, key))
        }

        async fn set_attribute(&self, id: &str, key: &str, value: &str) -> Result<(), DomainError> {
            self.attributes
                .lock()
                .unwrap()
                .insert((id.to_string(), key.to_string()), value.to_string());
            Ok(())
        }

        async fn remove_attribute(&self, id: &str, key: &str) -> Result<(), DomainError> {
            self.attributes
                .lock()
                .unwrap()
                .remove(&(id.to_string(), key.to_string()));
            Ok(())
        }

        async fn set_email_verified(&self, id: &str, verified: bool) -> Result<(), DomainError> {
            self.verified.lock().unwrap().insert(id.to_string(), verified);
            Ok(())
        }
    }

    // Email service that remembers the last code per identity
    #[derive(Default)]
    struct CapturingEmail {
        codes: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl EmailServiceTrait for CapturingEmail {
        async fn send_otp_email(
            &self,
            identity: &Identity,
            code: &str,
            _expiry_minutes: i64,
        ) -> Result<(), DeliveryError> {
            self.codes
                .lock()
                .unwrap()
                .insert(identity.id.clone(), code.to_string());
            Ok(())
        }
    }

    fn setup() -> (
        OtpService<MemoryStore, CapturingEmail>,
        Arc<MemoryStore>,
        Arc<CapturingEmail>,
        Arc<ManualClock>,
    ) {
        let store = Arc::new(MemoryStore::default());
        let email = Arc::new(CapturingEmail::default());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap(),
        ));
        let service =
            OtpService::with_clock(store.clone(), email.clone(), OtpConfig::default(), clock.clone());
        (service, store, email, clock)
    }

    fn identity() -> Identity {
        Identity::new("f3a1c2", RealmRef::new("acme"), "alice").with_email("alice@example.com")
    }

    #[tokio::test]
    async fn test_issue_mismatch_verify_then_consumed() {
        let (service, store, _email, clock) = setup();
        let alice = identity();

        // t = 0: issue, then pin the stored code to a known value
        service.issue_code(&alice).await.unwrap();
        store
            .set_attribute(&alice.id, ATTR_OTP_CODE, "483920")
            .await
            .unwrap();

        // t = 5 min: wrong code is rejected and the record survives
        clock.advance(Duration::minutes(5));
        let outcome = service.verify_code(&alice, "000000").await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Rejected(VerifyRejection::Mismatch));
        assert_eq!(store.get(&alice.id, ATTR_OTP_CODE).as_deref(), Some("483920"));

        // t = 9 min: right code verifies
        clock.advance(Duration::minutes(4));
        let outcome = service.verify_code(&alice, "483920").await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified);
        assert_eq!(store.verified.lock().unwrap().get(&alice.id), Some(&true));

        // t = 9.5 min: the code was consumed
        clock.advance(Duration::seconds(30));
        let outcome = service.verify_code(&alice, "483920").await.unwrap();
        assert_eq!(
            outcome,
            VerifyOutcome::Rejected(VerifyRejection::NoActiveCode)
        );
    }

    #[tokio::test]
    async fn test_expired_code_is_purged() {
        let (service, store, email, clock) = setup();
        let alice = identity();

        service.issue_code(&alice).await.unwrap();
        let code = email.codes.lock().unwrap().get(&alice.id).cloned().unwrap();
        assert_eq!(
            store.get(&alice.id, ATTR_OTP_EXPIRY),
            Some((clock.now() + Duration::minutes(10)).timestamp_millis().to_string())
        );

        clock.advance(Duration::minutes(11));
        let outcome = service.verify_code(&alice, &code).await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Rejected(VerifyRejection::Expired));
        assert!(store.get(&alice.id, ATTR_OTP_CODE).is_none());
        assert!(store.get(&alice.id, ATTR_OTP_EXPIRY).is_none());
    }
}
