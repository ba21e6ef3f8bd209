//! The storage gateway seam.

use chrono::NaiveDate;

use crate::error::RepositoryError;
use crate::temporal::Temporal;

/// Persists and retrieves `Temporal` records.
///
/// Implementations apply the converters on every field read and write;
/// callers never see storage primitives. Not-found is `Ok(None)` or an
/// empty vec, never an error.
pub trait Repository {
    /// Fetch by identifier.
    fn get(&self, id: i64) -> Result<Option<Temporal>, RepositoryError>;

    /// Fetch every record, in the storage engine's default order.
    fn get_all(&self) -> Result<Vec<Temporal>, RepositoryError>;

    /// Insert when `id` is absent, full upsert when present. Returns the
    /// persisted record including any assigned identifier.
    fn save(&self, temporal: &Temporal) -> Result<Temporal, RepositoryError>;

    /// Remove by identifier. Silent success when the id does not exist.
    fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Equality lookup on the calendar-date column only; the time, instant,
    /// and zone fields play no part in the match.
    fn find_by_local_date(&self, date: NaiveDate) -> Result<Vec<Temporal>, RepositoryError>;
}
