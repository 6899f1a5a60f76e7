//! Payment gateway integration via REST API (no SDK dependency)
//!
//! The gateway issues an order at initiation; the client completes payment
//! out-of-band and returns `(order_id, payment_id, signature)` where the
//! signature is HMAC-SHA256 over `"{order_id}|{payment_id}"` with the key
//! secret. Verification must be constant-time.

use std::time::Duration;

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sha2::Sha256;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Order created by the gateway at payment initiation
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// REST client for the payment gateway
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl GatewayClient {
    pub fn new(base_url: &str, key_id: &str, key_secret: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        }
    }

    /// Key id handed to clients so they can open the gateway's checkout
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a gateway order for `amount_minor` in the gateway's minor
    /// currency unit. Failures are retryable: nothing has been charged.
    pub async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, BoxError> {
        let resp: serde_json::Value = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await?
            .json()
            .await?;

        let id = resp["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| format!("Gateway order creation failed: {resp}"))?;

        Ok(GatewayOrder {
            id,
            amount_minor,
            currency: currency.to_string(),
        })
    }

    /// Expected signature for an (order, payment) pair — HMAC-SHA256 hex.
    ///
    /// Exposed for tests and for signing outbound requests; verification
    /// goes through [`verify_payment_signature`] which compares in
    /// constant time.
    pub fn sign(&self, gateway_order_id: &str, gateway_payment_id: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signed_payload(gateway_order_id, gateway_payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a capture signature (HMAC-SHA256, constant-time comparison)
    pub fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> Result<(), &'static str> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key_secret.as_bytes())
            .map_err(|_| "HMAC key error")?;
        mac.update(signed_payload(gateway_order_id, gateway_payment_id).as_bytes());

        // Decode hex signature and use constant-time comparison via hmac::verify_slice
        let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
        mac.verify_slice(&sig_bytes)
            .map_err(|_| "Payment signature mismatch")?;

        Ok(())
    }
}

fn signed_payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Convert a fixed-point amount to the gateway's minor currency unit.
///
/// Returns None if the amount has sub-cent precision or overflows i64.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    let minor = amount.checked_mul(Decimal::from(100))?;
    if !minor.fract().is_zero() {
        return None;
    }
    minor.to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GatewayClient {
        GatewayClient::new("https://gw.test", "key_id", "key_secret")
    }

    #[test]
    fn test_sign_and_verify() {
        let gw = client();
        let sig = gw.sign("order_abc", "pay_xyz");
        assert!(gw.verify_payment_signature("order_abc", "pay_xyz", &sig).is_ok());
    }

    #[test]
    fn test_known_signature_vector() {
        // HMAC-SHA256("key_secret", "order_abc|pay_xyz") is deterministic
        let gw = client();
        assert_eq!(gw.sign("order_abc", "pay_xyz"), gw.sign("order_abc", "pay_xyz"));
        assert_ne!(gw.sign("order_abc", "pay_xyz"), gw.sign("order_abc", "pay_other"));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let gw = client();
        let mut sig = gw.sign("order_abc", "pay_xyz");
        // Flip the last hex digit
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(gw.verify_payment_signature("order_abc", "pay_xyz", &sig).is_err());
    }

    #[test]
    fn test_signature_bound_to_order_and_payment() {
        let gw = client();
        let sig = gw.sign("order_abc", "pay_xyz");
        assert!(gw.verify_payment_signature("order_other", "pay_xyz", &sig).is_err());
        assert!(gw.verify_payment_signature("order_abc", "pay_other", &sig).is_err());
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        let gw = client();
        assert!(gw.verify_payment_signature("o", "p", "not-hex!").is_err());
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(Decimal::new(100000, 2)), Some(100_000)); // 1000.00
        assert_eq!(to_minor_units(Decimal::new(50050, 2)), Some(50_050)); // 500.50
        assert_eq!(to_minor_units(Decimal::ZERO), Some(0));
        // Sub-cent precision is rejected, not silently rounded
        assert_eq!(to_minor_units(Decimal::new(10005, 3)), None); // 10.005
    }
}
