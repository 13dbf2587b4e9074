//! Document store abstraction trait

use async_trait::async_trait;
use autolot_core::AppError;
use serde_json::Value;

/// One stored document: the store-assigned id plus its JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Field-equality filter for queries.
///
/// Owner-scoped listing queries are the only filter shape the client needs,
/// so this stays deliberately small.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether a document payload matches this filter.
    pub fn matches(&self, data: &Value) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// Remote document store operations.
///
/// Deleting an absent id is success, never an error; repeated lifecycle
/// deletes depend on this.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new record; the store assigns and returns its id.
    async fn create(&self, collection: &str, record: Value) -> Result<String, AppError>;

    /// Fetch one record by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    /// All records matching `filter`, in store order.
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, AppError>;

    /// Delete one record. Absent ids are Ok.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_matches_field_value() {
        let filter = Filter::field_eq("owner_id", "owner-1");
        assert!(filter.matches(&json!({"owner_id": "owner-1", "name": "GOL"})));
        assert!(!filter.matches(&json!({"owner_id": "owner-2"})));
        assert!(!filter.matches(&json!({"name": "GOL"})));
    }
}
