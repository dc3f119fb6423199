/**
 * In-Memory Store
 *
 * Process-local implementation of `Store`. Uniqueness rules match the
 * PostgreSQL schema so handlers behave the same against either backend.
 * Data is lost on restart.
 */

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{Business, NewProduct, NewUser, Product, User, UNSPECIFIED};
use super::{Store, StoreError};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    businesses: BTreeMap<i64, Business>,
    products: BTreeMap<i64, Product>,
    next_user_id: i64,
    next_business_id: i64,
    next_product_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// Store holding every table behind a single lock
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user_with_business(
        &self,
        new_user: NewUser,
    ) -> Result<(User, Business), StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Conflict {
                field: "username".to_string(),
            });
        }
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict {
                field: "email".to_string(),
            });
        }
        if tables
            .businesses
            .values()
            .any(|b| b.business_name == new_user.username)
        {
            return Err(StoreError::Conflict {
                field: "business_name".to_string(),
            });
        }

        let user = User {
            id: Tables::next_id(&mut tables.next_user_id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_verified: false,
            join_date: Utc::now(),
        };
        let business = Business {
            id: Tables::next_id(&mut tables.next_business_id),
            business_name: user.username.clone(),
            city: UNSPECIFIED.to_string(),
            region: UNSPECIFIED.to_string(),
            business_description: None,
            logo: None,
            owner_id: user.id,
        };

        tables.users.insert(user.id, user.clone());
        tables.businesses.insert(business.id, business.clone());

        Ok((user, business))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn mark_user_verified(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user_id) {
            Some(user) if !user.is_verified => {
                user.is_verified = true;
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn get_business_by_owner(&self, owner_id: i64) -> Result<Option<Business>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .businesses
            .values()
            .find(|b| b.owner_id == owner_id)
            .cloned())
    }

    async fn get_business_by_id(&self, id: i64) -> Result<Option<Business>, StoreError> {
        Ok(self.tables.read().await.businesses.get(&id).cloned())
    }

    async fn set_business_logo(
        &self,
        business_id: i64,
        logo: &str,
    ) -> Result<Business, StoreError> {
        let mut tables = self.tables.write().await;
        let business = tables
            .businesses
            .get_mut(&business_id)
            .ok_or(StoreError::NotFound {
                entity: "business",
                id: business_id,
            })?;
        business.logo = Some(logo.to_string());
        Ok(business.clone())
    }

    async fn create_product(
        &self,
        business_id: i64,
        new_product: NewProduct,
    ) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.businesses.contains_key(&business_id) {
            return Err(StoreError::NotFound {
                entity: "business",
                id: business_id,
            });
        }

        let product = Product {
            id: Tables::next_id(&mut tables.next_product_id),
            percentage_discount: new_product.percentage_discount(),
            name: new_product.name,
            category: new_product.category,
            original_price: new_product.original_price,
            new_price: new_product.new_price,
            offer_expiration_date: new_product.offer_expiration_date,
            product_image: None,
            date_published: Utc::now(),
            business_id,
        };
        tables.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn set_product_image(
        &self,
        product_id: i64,
        image: &str,
    ) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .get_mut(&product_id)
            .ok_or(StoreError::NotFound {
                entity: "product",
                id: product_id,
            })?;
        product.product_image = Some(image.to_string());
        Ok(product.clone())
    }
}
