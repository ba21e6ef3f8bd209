//! Pass-through application service.
//!
//! `TemporalService<R>` delegates straight to the storage gateway with no
//! validation or business rules. It exists as the seam between the HTTP
//! boundary and storage, so either side can be swapped independently.

use chrono::NaiveDate;
use log::debug;

use crate::error::RepositoryError;
use crate::repository::Repository;
use crate::temporal::Temporal;

pub struct TemporalService<R> {
    repo: R,
}

impl<R: Repository> TemporalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_temporal(&self, id: i64) -> Result<Option<Temporal>, RepositoryError> {
        debug!("get temporal {}", id);
        self.repo.get(id)
    }

    pub fn get_temporals(&self) -> Result<Vec<Temporal>, RepositoryError> {
        debug!("get all temporals");
        self.repo.get_all()
    }

    pub fn save(&self, temporal: &Temporal) -> Result<Temporal, RepositoryError> {
        self.repo.save(temporal)
    }

    pub fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.repo.delete(id)
    }

    pub fn find_by_local_date(&self, date: NaiveDate) -> Result<Vec<Temporal>, RepositoryError> {
        self.repo.find_by_local_date(date)
    }

    /// Direct access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}
