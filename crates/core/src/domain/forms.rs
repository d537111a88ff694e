use crate::domain::order::{OrderRecord, OrderStatus};
use crate::domain::user::{Role, UserRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("amount must not be negative")]
    NegativeAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let email = self.email.trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }

        Ok(Self {
            name,
            email,
            role: self.role,
        })
    }

    pub fn into_record(self, id: i64, last_login: NaiveDate) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            last_login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_number: String,
    pub customer: String,
    pub amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
}

impl NewOrder {
    pub fn validate(self) -> Result<Self, ValidationError> {
        let order_number = self.order_number.trim().to_string();
        if order_number.is_empty() {
            return Err(ValidationError::MissingField("orderNumber"));
        }

        let customer = self.customer.trim().to_string();
        if customer.is_empty() {
            return Err(ValidationError::MissingField("customer"));
        }

        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ValidationError::NegativeAmount);
        }

        Ok(Self {
            order_number,
            customer,
            amount: self.amount,
            status: self.status,
            order_date: self.order_date,
        })
    }

    /// `today` fills in a missing order date.
    pub fn into_record(self, id: i64, today: NaiveDate) -> OrderRecord {
        OrderRecord {
            id,
            order_number: self.order_number,
            customer: self.customer,
            amount: self.amount,
            status: self.status,
            order_date: self.order_date.unwrap_or(today),
        }
    }
}
