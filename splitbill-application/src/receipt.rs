use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_json::{Value, error::Category};
use splitbill_domain::{Item, Money, Receipt};

use crate::{
    error::{ReceiptAnalysisError, ReceiptIngestError, ReceiptParseError},
    ports::ReceiptAnalyzer,
};

pub struct ReceiptImage<'a> {
    pub bytes: &'a [u8],
    pub content_type: Option<&'a str>,
}

/// Raw analyzer response: a JSON object of item names to prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPayload {
    pub json: String,
}

impl ReceiptPayload {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

/// Photographs a receipt through the analyzer and turns the answer into a
/// [`Receipt`].
pub fn ingest_receipt(
    analyzer: &dyn ReceiptAnalyzer,
    image: &ReceiptImage<'_>,
) -> Result<Receipt, ReceiptIngestError> {
    if image.bytes.is_empty() {
        return Err(ReceiptAnalysisError::EmptyImage.into());
    }

    let payload = analyzer.analyze(image).inspect_err(|err| {
        tracing::warn!(
            error = %err,
            image_size = image.bytes.len(),
            content_type = image.content_type,
            "Receipt analysis failed"
        );
    })?;

    let receipt = parse_receipt_payload(&payload.json)?;
    tracing::info!(item_count = receipt.len(), "Receipt ingested");
    Ok(receipt)
}

/// Parses `{"Rice": 5.60, "Prata": "4.30"}` into a receipt, keeping the
/// payload's item order. A name listed twice is a duplicate item.
pub fn parse_receipt_payload(json: &str) -> Result<Receipt, ReceiptParseError> {
    let lines: ReceiptLines = serde_json::from_str(json).map_err(|err| match err.classify() {
        Category::Data => ReceiptParseError::NotAnObject,
        Category::Io | Category::Syntax | Category::Eof => ReceiptParseError::Malformed {
            detail: err.to_string(),
        },
    })?;
    lines.into_receipt()
}

/// Name and raw price pairs of a receipt object, in source order.
///
/// Unlike a JSON map this keeps every entry, so a repeated name is still seen
/// when the receipt is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptLines(Vec<(String, Value)>);

impl ReceiptLines {
    pub fn into_receipt(self) -> Result<Receipt, ReceiptParseError> {
        let mut receipt = Receipt::new();
        for (name, price) in self.0 {
            let price = parse_price(&price).ok_or_else(|| ReceiptParseError::InvalidPrice {
                item: name.clone(),
                value: price.to_string(),
            })?;
            receipt.push(Item::new(name.trim(), Money::from_decimal(price)))?;
        }
        Ok(receipt)
    }
}

impl<'de> Deserialize<'de> for ReceiptLines {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ReceiptLinesVisitor)
    }
}

struct ReceiptLinesVisitor;

impl<'de> Visitor<'de> for ReceiptLinesVisitor {
    type Value = ReceiptLines;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of item names to prices")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut lines = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(line) = map.next_entry::<String, Value>()? {
            lines.push(line);
        }
        Ok(ReceiptLines(lines))
    }
}

fn parse_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(&normalize_price_text(text)),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// OCR output tends to carry full-width digits, a currency marker and
/// thousands separators.
fn normalize_price_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            '０'..='９' => char::from_u32((c as u32) - ('０' as u32) + ('0' as u32)),
            '．' => Some('.'),
            '－' => Some('-'),
            '$' | '＄' | ',' | '，' | ' ' => None,
            _ => Some(c),
        })
        .collect::<String>()
        .trim_start_matches(['S', 's'])
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitbill_domain::ReceiptBuildError;

    struct FixedAnalyzer(Result<&'static str, ()>);

    impl ReceiptAnalyzer for FixedAnalyzer {
        fn analyze(
            &self,
            _image: &ReceiptImage<'_>,
        ) -> Result<ReceiptPayload, ReceiptAnalysisError> {
            self.0
                .map(ReceiptPayload::new)
                .map_err(|()| ReceiptAnalysisError::Unavailable)
        }
    }

    fn image() -> ReceiptImage<'static> {
        ReceiptImage {
            bytes: b"jpeg",
            content_type: Some("image/jpeg"),
        }
    }

    #[test]
    fn payload_keeps_item_order_and_exact_prices() {
        let receipt =
            parse_receipt_payload(r#"{"Rice": 5.60, "Prata": 4.30, "Teh": "1.80"}"#)
                .expect("valid payload");

        assert_eq!(
            receipt.iter().collect::<Vec<_>>(),
            vec![
                ("Rice", Money::from_cents(560)),
                ("Prata", Money::from_cents(430)),
                ("Teh", Money::from_cents(180)),
            ]
        );
    }

    #[rstest]
    #[case::plain("4.30", "4.30")]
    #[case::dollar("$4.30", "4.30")]
    #[case::singapore_dollar("S$1,204.30", "1204.30")]
    #[case::fullwidth("４．３０", "4.30")]
    fn price_text_is_normalized(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            parse_decimal(&normalize_price_text(input)),
            Decimal::from_str(expected).ok()
        );
    }

    #[rstest]
    #[case::not_json("Rice 5.60", |err: &ReceiptParseError| matches!(err, ReceiptParseError::Malformed { .. }))]
    #[case::array("[5.60]", |err: &ReceiptParseError| *err == ReceiptParseError::NotAnObject)]
    #[case::text_price(r#"{"Rice": "five"}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::InvalidPrice { item, .. } if item == "Rice"))]
    #[case::null_price(r#"{"Rice": null}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::InvalidPrice { .. }))]
    #[case::negative(r#"{"Refund": -2}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::Receipt(ReceiptBuildError::NegativePrice { .. })))]
    #[case::repeated_name(r#"{"Rice": 5.60, "Teh": 1.80, "Rice": 2}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::Receipt(ReceiptBuildError::DuplicateItem { name }) if name == "Rice"))]
    #[case::repeated_after_trim(r#"{"Rice": 5.60, " Rice ": 2}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::Receipt(ReceiptBuildError::DuplicateItem { .. })))]
    #[case::price_above_cap(r#"{"Yacht": 1000000000000.01}"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::Receipt(ReceiptBuildError::PriceTooLarge { .. })))]
    #[case::truncated(r#"{"Rice": 5.60"#, |err: &ReceiptParseError| matches!(err, ReceiptParseError::Malformed { .. }))]
    fn invalid_payloads_are_rejected(
        #[case] json: &str,
        #[case] check: fn(&ReceiptParseError) -> bool,
    ) {
        let err = parse_receipt_payload(json).expect_err("payload should be rejected");
        assert!(check(&err), "unexpected error: {err:?}");
    }

    #[test]
    fn ingest_parses_analyzer_response() {
        let analyzer = FixedAnalyzer(Ok(r#"{"Rice": 5.6}"#));
        let receipt = ingest_receipt(&analyzer, &image()).expect("ingest should succeed");
        assert_eq!(receipt.price_of("Rice"), Some(Money::from_cents(560)));
    }

    #[test]
    fn ingest_surfaces_analyzer_failure() {
        let analyzer = FixedAnalyzer(Err(()));
        let err = ingest_receipt(&analyzer, &image()).expect_err("analyzer failure");
        assert!(matches!(
            err,
            ReceiptIngestError::Analysis(ReceiptAnalysisError::Unavailable)
        ));
    }

    #[test]
    fn ingest_rejects_empty_image() {
        let analyzer = FixedAnalyzer(Ok("{}"));
        let empty = ReceiptImage {
            bytes: &[],
            content_type: None,
        };
        let err = ingest_receipt(&analyzer, &empty).expect_err("empty image");
        assert!(matches!(
            err,
            ReceiptIngestError::Analysis(ReceiptAnalysisError::EmptyImage)
        ));
    }
}
