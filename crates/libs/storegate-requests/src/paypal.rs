//! PayPal payment initiation.
//!
//! The API creates the PayPal order and answers with an approval URL; the
//! caller is expected to send the browser there with a full-page redirect.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ApiClient;
use crate::prelude::*;

pub const PAYPAL_PAYMENT_ENDPOINT: &str = "api/v1/order/paypal/payment";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalPaymentRequest {
    pub order_id: String,
    /// Decimal amount as a string, e.g. "19.99".
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalPaymentResponse {
    #[serde(default)]
    pub success: bool,
    pub approval_url: Option<String>,
    pub message: Option<String>,
}

/// An approved payment awaiting the buyer on PayPal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaypalApproval {
    pub approval_url: String,
}

impl TryFrom<PaypalPaymentResponse> for PaypalApproval {
    type Error = Error;

    fn try_from(value: PaypalPaymentResponse) -> Result<Self> {
        match value.approval_url {
            Some(approval_url) if value.success && !approval_url.is_empty() => {
                Ok(Self { approval_url })
            }
            _ => Err(Error::PaymentRejected(
                value
                    .message
                    .unwrap_or_else(|| String::from("no approval url returned")),
            )),
        }
    }
}

impl ApiClient {
    pub async fn paypal_payment(&self, payment: &PaypalPaymentRequest) -> Result<PaypalApproval> {
        info!("Initiating PayPal payment for order {}", payment.order_id);
        let request = self
            .client
            .post(self.path(PAYPAL_PAYMENT_ENDPOINT))
            .json(payment);
        let response: PaypalPaymentResponse = self.send(request).await?;
        PaypalApproval::try_from(response).inspect_err(|err| warn!("{err}"))
    }
}
