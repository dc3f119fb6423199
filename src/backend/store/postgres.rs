/**
 * PostgreSQL Store
 *
 * sqlx-backed implementation of `Store`. Queries are checked at runtime
 * (`query_as` + `FromRow`), so the crate builds without a live database.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{Business, NewProduct, NewUser, Product, User, UNSPECIFIED};
use super::{Store, StoreError};

const USER_COLUMNS: &str = "id, username, email, password_hash, is_verified, join_date";
const BUSINESS_COLUMNS: &str =
    "id, business_name, city, region, business_description, logo, owner_id";
const PRODUCT_COLUMNS: &str = "id, name, category, original_price, new_price, percentage_discount, \
     offer_expiration_date, product_image, date_published, business_id";

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Turn unique violations into `StoreError::Conflict`
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            let field = if constraint.contains("email") {
                "email"
            } else if constraint.contains("username") {
                "username"
            } else if constraint.contains("business_name") {
                "business_name"
            } else {
                constraint
            };
            return StoreError::Conflict {
                field: field.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user_with_business(
        &self,
        new_user: NewUser,
    ) -> Result<(User, Business), StoreError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, is_verified, join_date)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        let business = sqlx::query_as::<_, Business>(&format!(
            r#"
            INSERT INTO businesses (business_name, city, region, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(UNSPECIFIED)
        .bind(UNSPECIFIED)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit().await?;

        tracing::debug!(user_id = user.id, business_id = business.id, "Provisioned business for new user");
        Ok((user, business))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn mark_user_verified(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_verified = TRUE
            WHERE id = $1 AND NOT is_verified
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_business_by_owner(&self, owner_id: i64) -> Result<Option<Business>, StoreError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE owner_id = $1"
        ))
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn get_business_by_id(&self, id: i64) -> Result<Option<Business>, StoreError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn set_business_logo(
        &self,
        business_id: i64,
        logo: &str,
    ) -> Result<Business, StoreError> {
        sqlx::query_as::<_, Business>(&format!(
            r#"
            UPDATE businesses
            SET logo = $1
            WHERE id = $2
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(logo)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "business",
            id: business_id,
        })
    }

    async fn create_product(
        &self,
        business_id: i64,
        new_product: NewProduct,
    ) -> Result<Product, StoreError> {
        let discount = new_product.percentage_discount();

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, category, original_price, new_price, percentage_discount,
                                  offer_expiration_date, date_published, business_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new_product.name)
        .bind(&new_product.category)
        .bind(new_product.original_price)
        .bind(new_product.new_price)
        .bind(discount)
        .bind(new_product.offer_expiration_date)
        .bind(Utc::now())
        .bind(business_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(product)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn set_product_image(
        &self,
        product_id: i64,
        image: &str,
    ) -> Result<Product, StoreError> {
        sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET product_image = $1
            WHERE id = $2
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(image)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "product",
            id: product_id,
        })
    }
}
