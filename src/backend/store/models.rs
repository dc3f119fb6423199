/**
 * Store Models
 *
 * Row types for users, businesses and products, plus the insert payloads
 * handed to `Store` implementations.
 */

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Username (unique, 1-20 chars)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Hashed password (bcrypt); never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Set once the email link has been followed
    pub is_verified: bool,
    /// Registration timestamp
    pub join_date: DateTime<Utc>,
}

/// The business owned by a user, created together with the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Business {
    pub id: i64,
    /// Display name, defaults to the owner's username
    pub business_name: String,
    pub city: String,
    pub region: String,
    pub business_description: Option<String>,
    /// Generated filename under `static/images`
    pub logo: Option<String>,
    pub owner_id: i64,
}

/// A product listed by a business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub original_price: Decimal,
    pub new_price: Decimal,
    pub percentage_discount: i32,
    pub offer_expiration_date: NaiveDate,
    /// Generated filename under `static/images`
    pub product_image: Option<String>,
    pub date_published: DateTime<Utc>,
    pub business_id: i64,
}

/// Default city and region for a freshly provisioned business
pub const UNSPECIFIED: &str = "Unspecified";

/// Insert payload for a user
///
/// The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insert payload for a product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub original_price: Decimal,
    pub new_price: Decimal,
    pub offer_expiration_date: NaiveDate,
}

impl NewProduct {
    /// Discount of `new_price` against `original_price`, as a whole percent
    ///
    /// Rounded half away from zero. A zero original price yields 0.
    pub fn percentage_discount(&self) -> i32 {
        if self.original_price.is_zero() {
            return 0;
        }
        let ratio = (self.original_price - self.new_price) / self.original_price;
        (ratio * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .unwrap_or_default()
    }
}
