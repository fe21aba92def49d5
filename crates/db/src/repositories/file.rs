//! File metadata repository for database operations.
//!
//! Implements file record CRUD operations using `SeaORM`.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::files;
use fileshelf_core::file::{
    CreateFileInput, FileError, FileRecord, FileRepository as FileRepoTrait,
};

/// File repository implementation.
#[derive(Debug, Clone)]
pub struct FileRepository {
    db: DatabaseConnection,
}

impl FileRepository {
    /// Create a new file repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl FileRepoTrait for FileRepository {
    async fn create(&self, input: CreateFileInput) -> Result<FileRecord, FileError> {
        let active_model = files::ActiveModel {
            original_name: Set(input.original_name),
            stored_name: Set(input.stored_name),
            content_type: Set(input.content_type),
            size: Set(input.size),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FileRecord>, FileError> {
        let model = files::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn delete(&self, id: i32) -> Result<bool, FileError> {
        let result = files::Entity::delete_many()
            .filter(files::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| FileError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert database model to domain model.
fn to_domain(model: files::Model) -> FileRecord {
    FileRecord {
        id: model.id,
        original_name: model.original_name,
        stored_name: model.stored_name,
        content_type: model.content_type,
        size: model.size,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}
