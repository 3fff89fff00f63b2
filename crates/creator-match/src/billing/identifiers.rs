//! Format checks for Indian tax and payment identifiers.

use std::sync::OnceLock;

use regex::Regex;

fn pan() -> &'static Regex {
    static PAN: OnceLock<Regex> = OnceLock::new();
    PAN.get_or_init(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN regex"))
}

fn gstin() -> &'static Regex {
    static GSTIN: OnceLock<Regex> = OnceLock::new();
    GSTIN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("valid GSTIN regex")
    })
}

fn ifsc() -> &'static Regex {
    static IFSC: OnceLock<Regex> = OnceLock::new();
    IFSC.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"))
}

fn upi() -> &'static Regex {
    static UPI: OnceLock<Regex> = OnceLock::new();
    UPI.get_or_init(|| Regex::new(r"^[\w.\-]{2,256}@[a-zA-Z]{2,64}$").expect("valid UPI regex"))
}

fn email() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Permanent Account Number, e.g. `ABCDE1234F`.
pub fn is_valid_pan(value: &str) -> bool {
    pan().is_match(value)
}

/// GST registration number: state code, embedded PAN, entity digit, `Z`, checksum.
pub fn is_valid_gstin(value: &str) -> bool {
    gstin().is_match(value)
}

/// Bank branch code; the fifth character is always `0`.
pub fn is_valid_ifsc(value: &str) -> bool {
    ifsc().is_match(value)
}

pub fn is_valid_upi(value: &str) -> bool {
    upi().is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    email().is_match(value)
}
