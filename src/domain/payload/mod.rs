//! The NDPS `payInstrument` document family.
//!
//! Every message exchanged with the processor is a JSON document keyed by
//! `payInstrument`, built from a small set of shared sub-records. The shape
//! varies per operation (AUTH, status enquiry, refund initiation, callback),
//! so the family is modeled as distinct request/response types sharing the
//! sub-records rather than one rigid schema.
//!
//! Field names follow the processor's camelCase wire format; identifier
//! fields use [`FlexId`] because the processor mixes JSON strings and
//! numbers across channels.

mod flex;
pub mod status_code;

pub use flex::FlexId;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Amount;

/// Currency for all transactions in this integration.
pub const TXN_CURRENCY_INR: &str = "INR";

/// Operation names recognized by the processor.
pub const API_AUTH: &str = "AUTH";
pub const API_STATUS: &str = "TXNVERIFICATION";
pub const API_REFUND: &str = "REFUNDINIT";

/// Outer wrapper shared by every NDPS document: `{"payInstrument": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "payInstrument")]
    pub pay_instrument: T,
}

impl<T> Document<T> {
    pub fn new(pay_instrument: T) -> Self {
        Self { pay_instrument }
    }
}

/// API metadata header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadDetails {
    pub api: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
}

impl HeadDetails {
    /// Header for payment initiation: `AUTH` over checkout protocol v1.1.
    pub fn auth() -> Self {
        Self {
            api: API_AUTH.to_string(),
            version: Some("OTSv1.1".to_string()),
            platform: Some("FLASH".to_string()),
            source: None,
        }
    }

    /// Header for the OTS back-office operations (status enquiry, refunds).
    pub fn ots(api: &str) -> Self {
        Self {
            api: api.to_string(),
            version: None,
            platform: None,
            source: Some("OTS".to_string()),
        }
    }
}

/// Merchant identity section, shared by requests and callbacks.
///
/// `password` is only ever serialized on outbound documents; callbacks do
/// not echo it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchDetails {
    pub merch_id: FlexId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
    pub merch_txn_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merch_txn_date: Option<String>,
}

/// Payment details for an AUTH request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayDetails {
    pub amount: Amount,
    pub product: String,
    pub txn_currency: String,
}

/// Payment details for a signed status enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayDetails {
    pub amount: Amount,
    pub txn_currency: String,
    pub signature: String,
}

/// Payment details for a signed refund initiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPayDetails {
    pub signature: String,
    pub atom_txn_id: FlexId,
    pub total_refund_amount: Amount,
    pub txn_currency: String,
    pub prod_details: Vec<ProdDetail>,
}

/// A refund line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdDetail {
    pub prod_name: String,
    pub prod_refund_amount: Amount,
    pub prod_refund_id: String,
}

/// Customer contact section of an AUTH request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustDetails {
    pub cust_email: String,
    pub cust_mobile: String,
}

/// The payment sub-channel (card, net banking, UPI, ...).
///
/// Outbound AUTH documents carry a single string; callbacks carry a list
/// whose first element identifies the instrument actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubChannel {
    One(String),
    Many(Vec<String>),
}

impl SubChannel {
    pub fn first(&self) -> Option<&str> {
        match self {
            SubChannel::One(s) => Some(s.as_str()),
            SubChannel::Many(v) => v.first().map(String::as_str),
        }
    }
}

/// Bank-side settlement details reported in callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ots_bank_id: Option<FlexId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ots_bank_name: Option<String>,
    pub bank_txn_id: FlexId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card_mask_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card_type: Option<String>,
}

/// Payment-mode restriction on an outbound AUTH request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayModeSpecificData {
    pub sub_channel: SubChannel,
}

/// Payment-mode data reported back in callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayMode {
    pub sub_channel: SubChannel,
    pub bank_details: BankDetails,
}

/// Outcome section of back-office responses and callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetails {
    pub status_code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Outcome section of AUTH responses (a different field spelling than the
/// back-office operations use).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDetails {
    pub txn_status_code: String,
    #[serde(default)]
    pub txn_message: Option<String>,
    #[serde(default)]
    pub txn_description: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies (serialized, encrypted, sent)
// ---------------------------------------------------------------------------

/// Body of a payment-initiation (AUTH) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequestBody {
    pub head_details: HeadDetails,
    pub merch_details: MerchDetails,
    pub pay_details: AuthPayDetails,
    pub cust_details: CustDetails,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pay_mode_specific_data: Option<PayModeSpecificData>,
}

/// Body of a signed status enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQueryBody {
    pub head_details: HeadDetails,
    pub merch_details: MerchDetails,
    pub pay_details: StatusPayDetails,
}

/// Body of a signed refund initiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequestBody {
    pub head_details: HeadDetails,
    pub merch_details: MerchDetails,
    pub pay_details: RefundPayDetails,
}

// ---------------------------------------------------------------------------
// Response documents (received, decrypted, deserialized)
// ---------------------------------------------------------------------------

/// Decrypted AUTH response. Unlike the other documents this one is not
/// wrapped in `payInstrument`; `atomTokenId` and the outcome sit at the top
/// level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub response_details: Option<AuthResponseDetails>,
    #[serde(default)]
    pub atom_token_id: Option<FlexId>,
}

/// Decrypted status-enquiry response; `payInstrument` holds an array of
/// matching transactions (empty or absent when nothing matched).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "payInstrument", default)]
    pub pay_instrument: Option<Vec<StatusTransaction>>,
}

/// One transaction entry in a status-enquiry response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransaction {
    #[serde(default)]
    pub merch_details: Option<StatusMerchDetails>,
    #[serde(default)]
    pub pay_details: Option<StatusRespPayDetails>,
    #[serde(default)]
    pub response_details: Option<ResponseDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMerchDetails {
    #[serde(default)]
    pub merch_id: Option<FlexId>,
    #[serde(default)]
    pub merch_txn_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRespPayDetails {
    #[serde(default)]
    pub atom_txn_id: Option<FlexId>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub total_amount: Option<Amount>,
}

/// Decrypted refund-initiation response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefundResponse {
    #[serde(rename = "payInstrument", default)]
    pub pay_instrument: Option<RefundResponseBody>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponseBody {
    #[serde(default)]
    pub response_details: Option<ResponseDetails>,
    #[serde(default)]
    pub pay_details: Option<RefundRespPayDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRespPayDetails {
    #[serde(default)]
    pub atom_txn_id: Option<FlexId>,
    #[serde(default)]
    pub total_refund_amount: Option<Amount>,
    #[serde(default)]
    pub txn_currency: Option<String>,
    #[serde(default)]
    pub prod_details: Option<Vec<ProdDetail>>,
}

// ---------------------------------------------------------------------------
// Callback document
// ---------------------------------------------------------------------------

/// Decrypted callback body. Every field referenced by signature
/// verification is mandatory; a callback missing one of them fails
/// deserialization and is rejected before any trust decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackBody {
    pub merch_details: MerchDetails,
    pub pay_details: CallbackPayDetails,
    pub response_details: ResponseDetails,
    pub pay_mode_specific_data: CallbackPayMode,
}

/// Payment details section of a callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayDetails {
    pub atom_txn_id: FlexId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub surcharge_amount: Option<Amount>,
    pub total_amount: Amount,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub txn_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub txn_init_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub txn_complete_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_request_serializes_with_camel_case_wire_names() {
        let body = AuthRequestBody {
            head_details: HeadDetails::auth(),
            merch_details: MerchDetails {
                merch_id: FlexId::from("446442"),
                password: Some("Test@123".to_string()),
                merch_txn_id: "TXN_1_abc".to_string(),
                merch_txn_date: Some("2026-01-30 09:05:07".to_string()),
            },
            pay_details: AuthPayDetails {
                amount: Amount::new(100.0),
                product: "NSE".to_string(),
                txn_currency: TXN_CURRENCY_INR.to_string(),
            },
            cust_details: CustDetails {
                cust_email: "customer@example.com".to_string(),
                cust_mobile: "9876543210".to_string(),
            },
            pay_mode_specific_data: None,
        };

        let json = serde_json::to_value(Document::new(body)).unwrap();
        let instrument = &json["payInstrument"];

        assert_eq!(instrument["headDetails"]["api"], "AUTH");
        assert_eq!(instrument["headDetails"]["version"], "OTSv1.1");
        assert_eq!(instrument["headDetails"]["platform"], "FLASH");
        assert_eq!(instrument["merchDetails"]["merchId"], "446442");
        assert_eq!(instrument["merchDetails"]["merchTxnId"], "TXN_1_abc");
        assert_eq!(instrument["payDetails"]["txnCurrency"], "INR");
        assert_eq!(instrument["custDetails"]["custMobile"], "9876543210");
        // Absent optional sections are omitted, not null
        assert!(instrument.get("payModeSpecificData").is_none());
        assert!(instrument["headDetails"].get("source").is_none());
    }

    #[test]
    fn ots_header_carries_source_but_no_version() {
        let head = HeadDetails::ots(API_REFUND);
        let json = serde_json::to_value(&head).unwrap();

        assert_eq!(json["api"], "REFUNDINIT");
        assert_eq!(json["source"], "OTS");
        assert!(json.get("version").is_none());
        assert!(json.get("platform").is_none());
    }

    #[test]
    fn sub_channel_restriction_serializes_as_plain_string() {
        let data = PayModeSpecificData {
            sub_channel: SubChannel::One("UPI".to_string()),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["subChannel"], "UPI");
    }

    #[test]
    fn callback_deserializes_from_processor_shape() {
        let raw = serde_json::json!({
            "payInstrument": {
                "merchDetails": {
                    "merchId": 446442,
                    "merchTxnId": "TXN_1738216820431_ab12cd34e",
                    "merchTxnDate": "2026-01-30 09:05:07"
                },
                "payDetails": {
                    "atomTxnId": 11000000123u64,
                    "amount": 490.0,
                    "surchargeAmount": 10.0,
                    "totalAmount": 500.0,
                    "signature": "abcdef",
                    "txnCurrency": "INR",
                    "txnInitDate": "2026-01-30 09:05:07",
                    "txnCompleteDate": "2026-01-30 09:06:01"
                },
                "responseDetails": {
                    "statusCode": "OTS0000",
                    "message": "SUCCESS",
                    "description": "Transaction successful"
                },
                "payModeSpecificData": {
                    "subChannel": ["NB"],
                    "bankDetails": {
                        "otsBankName": "HDFC Bank",
                        "bankTxnId": "BANK123456789",
                        "cardMaskNumber": "411111XXXXXX1111",
                        "cardType": "VISA"
                    }
                }
            }
        });

        let doc: Document<CallbackBody> = serde_json::from_value(raw).unwrap();
        let body = doc.pay_instrument;

        assert_eq!(body.merch_details.merch_id, FlexId::Num(446442));
        assert_eq!(body.pay_details.atom_txn_id, FlexId::Num(11000000123));
        assert_eq!(body.pay_details.total_amount, Amount::new(500.0));
        assert_eq!(body.response_details.status_code, "OTS0000");
        assert_eq!(body.pay_mode_specific_data.sub_channel.first(), Some("NB"));
        assert_eq!(
            body.pay_mode_specific_data.bank_details.bank_txn_id,
            FlexId::from("BANK123456789")
        );
    }

    #[test]
    fn callback_without_bank_details_fails_deserialization() {
        let raw = serde_json::json!({
            "payInstrument": {
                "merchDetails": { "merchId": 1, "merchTxnId": "TXN_1" },
                "payDetails": { "atomTxnId": 2, "totalAmount": 1.0, "signature": "s" },
                "responseDetails": { "statusCode": "OTS0000" },
                "payModeSpecificData": { "subChannel": ["NB"] }
            }
        });

        let result: Result<Document<CallbackBody>, _> = serde_json::from_value(raw);
        assert!(result.is_err());
    }

    #[test]
    fn status_response_parses_transaction_array() {
        let raw = serde_json::json!({
            "payInstrument": [{
                "merchDetails": { "merchId": 446442, "merchTxnId": "TXN_1" },
                "payDetails": { "atomTxnId": 9, "amount": 100.0, "totalAmount": 102.0 },
                "responseDetails": { "statusCode": "OTS0002", "message": "Confirmed" }
            }]
        });

        let response: StatusResponse = serde_json::from_value(raw).unwrap();
        let transactions = response.pay_instrument.unwrap();
        assert_eq!(transactions.len(), 1);

        let details = transactions[0].response_details.as_ref().unwrap();
        assert_eq!(details.status_code, "OTS0002");
    }

    #[test]
    fn status_response_tolerates_missing_instrument() {
        let response: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(response.pay_instrument.is_none());
    }

    #[test]
    fn auth_response_reads_token_and_status() {
        let raw = serde_json::json!({
            "atomTokenId": 150000012345u64,
            "responseDetails": { "txnStatusCode": "OTS0000", "txnMessage": "OK" }
        });

        let response: AuthResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.atom_token_id, Some(FlexId::Num(150000012345)));
        assert_eq!(
            response.response_details.unwrap().txn_status_code,
            "OTS0000"
        );
    }

    #[test]
    fn sub_channel_first_handles_both_shapes() {
        assert_eq!(SubChannel::One("CC".to_string()).first(), Some("CC"));
        assert_eq!(
            SubChannel::Many(vec!["UPI".to_string(), "NB".to_string()]).first(),
            Some("UPI")
        );
        assert_eq!(SubChannel::Many(vec![]).first(), None);
    }

    #[test]
    fn callback_round_trips_through_json() {
        let body = CallbackBody {
            merch_details: MerchDetails {
                merch_id: FlexId::Num(446442),
                password: None,
                merch_txn_id: "TXN_1".to_string(),
                merch_txn_date: None,
            },
            pay_details: CallbackPayDetails {
                atom_txn_id: FlexId::Num(11000000123),
                amount: Some(Amount::new(500.0)),
                surcharge_amount: None,
                total_amount: Amount::new(500.0),
                signature: "sig".to_string(),
                txn_currency: Some("INR".to_string()),
                txn_init_date: None,
                txn_complete_date: None,
            },
            response_details: ResponseDetails {
                status_code: "OTS0000".to_string(),
                message: None,
                description: None,
            },
            pay_mode_specific_data: CallbackPayMode {
                sub_channel: SubChannel::Many(vec!["NB".to_string()]),
                bank_details: BankDetails {
                    ots_bank_id: None,
                    ots_bank_name: None,
                    bank_txn_id: FlexId::from("BANK1"),
                    card_mask_number: None,
                    card_type: None,
                },
            },
        };

        let json = serde_json::to_string(&body).unwrap();
        let back: CallbackBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
