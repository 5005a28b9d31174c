//! Resource models and domain constants for the accounts endpoints.

use serde::{Deserialize, Serialize};

pub const COUNTRY_GB: &str = "GB";
pub const COUNTRY_BE: &str = "BE";
pub const COUNTRY_FR: &str = "FR";
pub const COUNTRY_DE: &str = "DE";
pub const COUNTRY_GR: &str = "GR";
pub const COUNTRY_IT: &str = "IT";
pub const COUNTRY_PL: &str = "PL";
pub const COUNTRY_PT: &str = "PT";
pub const COUNTRY_ES: &str = "ES";
pub const COUNTRY_CH: &str = "CH";

pub const BANK_ID_CODE_SWIFT: &str = "SWBIC";
pub const BANK_ID_CODE_GB: &str = "GBDSC";
pub const BANK_ID_CODE_BE: &str = "BE";
pub const BANK_ID_CODE_FR: &str = "FR";
pub const BANK_ID_CODE_DE: &str = "DEBLZ";
pub const BANK_ID_CODE_GR: &str = "GRBIC";
pub const BANK_ID_CODE_IT: &str = "ITNCC";
pub const BANK_ID_CODE_PL: &str = "PLKNR";
pub const BANK_ID_CODE_PT: &str = "PTNCC";
pub const BANK_ID_CODE_ES: &str = "ESNCC";
pub const BANK_ID_CODE_CH: &str = "CHBCC";

pub const CURRENCY_GBP: &str = "GBP";
pub const CURRENCY_EUR: &str = "EUR";
pub const CURRENCY_USD: &str = "USD";

/// A bank account resource as carried inside the `{"data": ...}` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organisation_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
}

/// Attributes of a bank account resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
}
