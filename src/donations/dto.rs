use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub amount_cents: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_amount_and_optional_message() {
        let req: CreateDonationRequest =
            serde_json::from_str(r#"{"amountCents":2500,"message":"For the scholarship fund"}"#)
                .unwrap();
        assert_eq!(req.amount_cents, 2500);
        assert!(req.message.is_some());

        let bare: CreateDonationRequest = serde_json::from_str(r#"{"amountCents":100}"#).unwrap();
        assert!(bare.message.is_none());
    }
}
