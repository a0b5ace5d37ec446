//! Local implementation of ShiftRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};

use portal_core::entities::Shift;
use portal_core::error::DomainError;
use portal_core::traits::{RepoResult, ShiftRepository};
use portal_core::value_objects::RecordId;

use crate::collection::JsonCollection;
use crate::keys::SHIFTS_KEY;
use crate::store::KeyValueStore;

use super::error::map_store_error;

/// Shifts kept as a JSON array under `arcade_shifts`, in insertion order
pub struct LocalShiftRepository<S: ?Sized = dyn KeyValueStore> {
    shifts: JsonCollection<Shift, S>,
}

impl<S: KeyValueStore + ?Sized> LocalShiftRepository<S> {
    pub fn open(store: Arc<S>) -> RepoResult<Self> {
        Ok(Self {
            shifts: JsonCollection::open(store, SHIFTS_KEY).map_err(map_store_error)?,
        })
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> ShiftRepository for LocalShiftRepository<S> {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Shift>> {
        Ok(self
            .shifts
            .read(|shifts| shifts.iter().find(|s| &s.id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Shift>> {
        Ok(self.shifts.read(|shifts| {
            shifts.iter().filter(|s| s.date == date).cloned().collect()
        }))
    }

    #[instrument(skip(self))]
    async fn find_for_user_on(&self, user_name: &str, date: NaiveDate) -> RepoResult<Vec<Shift>> {
        Ok(self.shifts.read(|shifts| {
            shifts
                .iter()
                .filter(|s| s.date == date && s.user_name == user_name)
                .cloned()
                .collect()
        }))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Shift>> {
        Ok(self.shifts.snapshot())
    }

    #[instrument(skip(self, shift), fields(shift_id = %shift.id, user = %shift.user_name, date = %shift.date))]
    async fn create(&self, shift: &Shift) -> RepoResult<()> {
        Shift::validate_range(shift.start_time, shift.end_time)?;

        self.shifts.mutate(|shifts| {
            if shifts.iter().any(|existing| existing.conflicts_with(shift)) {
                return Err(DomainError::Overlap {
                    user_name: shift.user_name.clone(),
                    date: shift.date,
                });
            }
            shifts.push(shift.clone());
            Ok(())
        })?;

        info!("Shift stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        if self.shifts.read(|shifts| !shifts.iter().any(|s| &s.id == id)) {
            return Ok(false);
        }

        self.shifts.mutate(|shifts| {
            shifts.retain(|s| &s.id != id);
            Ok(())
        })?;

        info!("Shift deleted");
        Ok(true)
    }
}
