use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::model::author::{Author, AuthorUpdateRequest};
use crate::domain::model::id::AuthorId;
use crate::domain::repository::AuthorRepository;

use super::error::AppError;

/// 著者に対するユースケース。
/// find → merge → save のパターンで操作する。
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 著者を新規登録する。IDはストアが採番するため、持っていれば拒否する。
    pub fn create(&self, author: Author) -> Result<Author, AppError> {
        if let Some(id) = author.id() {
            return Err(DomainError::AuthorIdAssigned(id).into());
        }
        let saved = self.repo.save(author).map_err(AppError::storage)?;
        info!(author_id = ?saved.id(), "author created");
        Ok(saved)
    }

    /// 全著者。順序はストア依存。
    pub fn list(&self) -> Result<Vec<Author>, AppError> {
        debug!("author list");
        self.repo.find_all().map_err(AppError::storage)
    }

    pub fn get(&self, id: AuthorId) -> Result<Option<Author>, AppError> {
        debug!(%id, "author lookup");
        self.repo.find_by_id(id).map_err(AppError::storage)
    }

    /// 全置換。`id` はパスの値で上書きする（本文のIDは無視）。
    pub fn full_update(&self, id: AuthorId, author: Author) -> Result<Author, AppError> {
        if !self.repo.exists_by_id(id).map_err(AppError::storage)? {
            return Err(DomainError::AuthorNotFound(id).into());
        }
        let saved = self
            .repo
            .save(author.with_id(id))
            .map_err(AppError::storage)?;
        info!(%id, "author replaced");
        Ok(saved)
    }

    /// 部分更新。パッチに値があるフィールドだけ置き換える。
    pub fn partial_update(
        &self,
        id: AuthorId,
        patch: AuthorUpdateRequest,
    ) -> Result<Author, AppError> {
        let existing = self
            .repo
            .find_by_id(id)
            .map_err(AppError::storage)?
            .ok_or(DomainError::AuthorNotFound(id))?;
        let saved = self
            .repo
            .save(existing.apply_update(patch))
            .map_err(AppError::storage)?;
        info!(%id, "author patched");
        Ok(saved)
    }

    /// 冪等な削除。存在しないIDでも成功する。
    /// ストアの契約により、この著者を参照する書籍もすべて削除される。
    pub fn delete(&self, id: AuthorId) -> Result<(), AppError> {
        self.repo.delete_by_id(id).map_err(AppError::storage)?;
        info!(%id, "author deleted");
        Ok(())
    }
}
