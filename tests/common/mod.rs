//! Shared fixtures for integration tests.
#![allow(dead_code)] // each test binary uses a subset of these fixtures

use sabbpe_gateway::domain::envelope::{CryptoEnvelope, MerchantCredentials};

/// Installs a test subscriber so handler traces surface under
/// `RUST_LOG=debug`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Published UAT credentials.
pub fn uat_credentials() -> MerchantCredentials {
    MerchantCredentials {
        merch_id: "446442".to_string(),
        password: "Test@123".to_string(),
        req_enc_key: "A4476C2062FFA58980DC8F79EB6A799E".to_string(),
        req_salt: "A4476C2062FFA58980DC8F79EB6A799E".to_string(),
        req_hash_key: "KEY123657234".to_string(),
        res_enc_key: "75AEF0FA1B94B3C10D4F5B268F757F11".to_string(),
        res_salt: "75AEF0FA1B94B3C10D4F5B268F757F11".to_string(),
        res_hash_key: "KEYRESP123657234".to_string(),
    }
}

/// Credentials with both directions on the request key pair, so one
/// envelope can decrypt its own output.
pub fn symmetric_credentials() -> MerchantCredentials {
    let mut credentials = uat_credentials();
    credentials.res_enc_key = credentials.req_enc_key.clone();
    credentials.res_salt = credentials.req_salt.clone();
    credentials
}

/// The processor's view of the UAT credentials: encrypts what the merchant
/// side decrypts.
pub fn processor_side_envelope() -> CryptoEnvelope {
    let mut credentials = uat_credentials();
    credentials.req_enc_key = credentials.res_enc_key.clone();
    credentials.req_salt = credentials.res_salt.clone();
    CryptoEnvelope::new(credentials).expect("processor-side envelope")
}
