//! Non-secret summaries derived from a PAN before it is encrypted.

use std::fmt;

/// Card brand detected from the leading digits of a PAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardBrand {
    /// Detect the brand from the first one or two characters of `pan`.
    ///
    /// This is a prefix heuristic, not a BIN table lookup. PANs shorter than
    /// two characters are always [`CardBrand::Unknown`].
    pub fn detect(pan: &str) -> Self {
        let mut chars = pan.chars();
        match (chars.next(), chars.next()) {
            (Some('4'), Some(_)) => CardBrand::Visa,
            (Some('5'), Some(_)) => CardBrand::Mastercard,
            (Some('3'), Some('7')) => CardBrand::Amex,
            (Some('6'), Some(_)) => CardBrand::Discover,
            _ => CardBrand::Unknown,
        }
    }

    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Discover => "discover",
            CardBrand::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final four characters of `pan`, or all of it when shorter.
pub fn last4(pan: &str) -> String {
    match pan.char_indices().rev().nth(3) {
        Some((start, _)) => pan[start..].to_owned(),
        None => pan.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_table() {
        assert_eq!(CardBrand::detect("4111111111111111"), CardBrand::Visa);
        assert_eq!(CardBrand::detect("5500000000000004"), CardBrand::Mastercard);
        assert_eq!(CardBrand::detect("371449635398431"), CardBrand::Amex);
        assert_eq!(CardBrand::detect("6011000000000004"), CardBrand::Discover);
        assert_eq!(CardBrand::detect("1234"), CardBrand::Unknown);
    }

    #[test]
    fn three_without_seven_is_unknown() {
        assert_eq!(CardBrand::detect("30569309025904"), CardBrand::Unknown);
        assert_eq!(CardBrand::detect("3"), CardBrand::Unknown);
    }

    #[test]
    fn short_pans_are_unknown() {
        assert_eq!(CardBrand::detect(""), CardBrand::Unknown);
        assert_eq!(CardBrand::detect("4"), CardBrand::Unknown);
        assert_eq!(CardBrand::detect("41"), CardBrand::Visa);
    }

    #[test]
    fn brand_wire_names() {
        assert_eq!(CardBrand::Mastercard.to_string(), "mastercard");
        assert_eq!(CardBrand::Unknown.as_str(), "unknown");
    }

    #[test]
    fn last4_of_full_pan() {
        assert_eq!(last4("4111111111111111"), "1111");
        assert_eq!(last4("371449635398431"), "8431");
    }

    #[test]
    fn last4_of_short_pan_is_whole_pan() {
        assert_eq!(last4("123"), "123");
        assert_eq!(last4("1234"), "1234");
        assert_eq!(last4(""), "");
    }

    #[test]
    fn last4_counts_characters_not_bytes() {
        assert_eq!(last4("ab€€€€"), "€€€€");
    }
}
