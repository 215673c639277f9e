use std::sync::Arc;
use tracing::{debug, info, instrument};

use models::ship::{self, ShipFields};

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::ship::{ShipFilter, ShipInput, ShipOrder, ShipRepository};

/// Application service encapsulating ship business rules: required fields,
/// range validation, default filling and rating derivation.
pub struct ShipService<R: ShipRepository> {
    repo: Arc<R>,
}

impl<R: ShipRepository> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ShipFilter, order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        let page = page.validate()?;
        let clauses = filter.clauses()?;
        let rows = self.repo.list(&clauses, order, page).await?;
        debug!(clauses = clauses.len(), count = rows.len(), "listed ships");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        let clauses = filter.clauses()?;
        self.repo.count(&clauses).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: ShipInput) -> Result<ship::Model, ServiceError> {
        let fields = input.into_fields()?;
        let created = self.repo.insert(fields).await?;
        info!(id = created.id, rating = created.rating, "ship_created");
        Ok(created)
    }

    /// Partial update.
    ///
    /// Supplied fields are range-checked before the id is looked up, so an
    /// unknown id with invalid input reports the validation failure.
    #[instrument(skip(self))]
    pub async fn edit(&self, id: i64, patch: ShipInput) -> Result<ship::Model, ServiceError> {
        patch.validate_present()?;
        let current = self.get(id).await?;
        let merged = patch.apply(&ShipFields::from(current))?;
        let updated = self.repo.update(id, merged).await?;
        info!(id, rating = updated.rating, empty_patch = patch.is_empty(), "ship_updated");
        Ok(updated)
    }

    pub async fn get(&self, id: i64) -> Result<ship::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("ship"))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.repo.get(id).await?.is_some())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("ship"));
        }
        info!(id, "ship_deleted");
        Ok(())
    }
}
