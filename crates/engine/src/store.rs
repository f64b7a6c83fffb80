//! Document collections backed by sea-orm tables.
//!
//! Every collection exposes the same three operations: insert a record,
//! search with a predicate, remove with a predicate. Ordering of search
//! results is not guaranteed; callers sort.

use std::marker::PhantomData;

use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
};

use crate::ResultEngine;

pub struct Collection<E> {
    database: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E> Collection<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
{
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            entity: PhantomData,
        }
    }

    /// Append a record and hand it back unchanged.
    pub async fn insert(&self, model: E::Model) -> ResultEngine<E::Model> {
        E::insert(model.clone().into_active_model())
            .exec_without_returning(&self.database)
            .await?;
        Ok(model)
    }

    pub async fn search(&self, predicate: Condition) -> ResultEngine<Vec<E::Model>> {
        Ok(E::find().filter(predicate).all(&self.database).await?)
    }

    /// Remove every matching record. Matching nothing is not an error.
    pub async fn remove(&self, predicate: Condition) -> ResultEngine<u64> {
        let result = E::delete_many()
            .filter(predicate)
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }
}
