use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Caller-supplied product fields. Only `name` and `price` are checked, and only on create.
pub type ProductFields = Map<String, Value>;

/// A product document: a store-assigned id plus whatever fields the caller sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ProductFields,
}

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub doc: Json<ProductFields>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: r.id,
            fields: r.doc.0,
        }
    }
}
