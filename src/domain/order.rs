use {
    super::error::StoreError,
    super::id::MerchantRef,
    super::money::Amount,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Expired,
    Failed,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Expired => "expired",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Lifecycle rank — higher means further along. Used to prevent
    /// out-of-order callbacks from regressing status.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Paid | Self::Expired | Self::Failed => 1,
            Self::Refunded => 2,
        }
    }

    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Expired)
                | (OrderStatus::Pending, OrderStatus::Failed)
                | (OrderStatus::Paid, OrderStatus::Refunded)
        )
    }

    /// Tripay reports status in its own vocabulary. UNPAID is what we call
    /// pending; REFUND has no terminal D.
    pub fn from_wire(s: &str) -> Result<Self, StoreError> {
        match s {
            "UNPAID" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "EXPIRED" => Ok(Self::Expired),
            "FAILED" => Ok(Self::Failed),
            "REFUND" => Ok(Self::Refunded),
            other => Err(StoreError::Validation(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = StoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "expired" => Ok(Self::Expired),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(StoreError::Validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// What the pipeline decided to do with an incoming status notification.
#[derive(Debug)]
pub enum ProcessResult {
    /// Status advanced through a valid transition.
    Updated(Uuid),
    /// Same status we already hold — duplicate delivery, nothing changed.
    Stale(Uuid),
    /// Transition is not valid per the state machine — logged, not applied.
    Anomaly(Uuid),
}

/// Per-order decision for one incoming status.
#[derive(Debug)]
pub enum CallbackAction {
    SameStatus,
    Advance { old_status: OrderStatus },
    Anomaly { current: OrderStatus },
}

pub struct NewOrderParams {
    pub merchant_ref: MerchantRef,
    pub package_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub phone_number: Option<String>,
    pub amount: Amount,
    pub gateway_reference: String,
    pub checkout_url: String,
    pub qr_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: Uuid,
    merchant_ref: MerchantRef,
    package_id: String,
    customer_email: String,
    customer_name: String,
    phone_number: Option<String>,
    amount: Amount,
    status: OrderStatus,
    gateway_reference: String,
    checkout_url: String,
    qr_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(params: NewOrderParams) -> Self {
        Self {
            id: Uuid::now_v7(),
            merchant_ref: params.merchant_ref,
            package_id: params.package_id,
            customer_email: params.customer_email,
            customer_name: params.customer_name,
            phone_number: params.phone_number,
            amount: params.amount,
            status: OrderStatus::Pending,
            gateway_reference: params.gateway_reference,
            checkout_url: params.checkout_url,
            qr_url: params.qr_url,
            created_at: params.created_at,
            updated_at: params.created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn merchant_ref(&self) -> &MerchantRef {
        &self.merchant_ref
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn gateway_reference(&self) -> &str {
        &self.gateway_reference
    }

    pub fn checkout_url(&self) -> &str {
        &self.checkout_url
    }

    pub fn qr_url(&self) -> Option<&str> {
        self.qr_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn decide(&self, incoming: OrderStatus) -> CallbackAction {
        if self.status == incoming {
            CallbackAction::SameStatus
        } else if self.status.can_transition_to(&incoming) {
            CallbackAction::Advance {
                old_status: self.status,
            }
        } else {
            CallbackAction::Anomaly {
                current: self.status,
            }
        }
    }

    /// Unconditional apply — callers go through `decide` first.
    pub fn apply(&mut self, new_status: OrderStatus, now: DateTime<Utc>) {
        self.status = new_status;
        self.updated_at = now;
    }
}
