pub mod rental_store;
pub mod toestel_catalog;

// パブリックに型を再エクスポート
pub use rental_store::RentalStore as PostgresRentalStore;
pub use toestel_catalog::ToestelCatalog as PostgresToestelCatalog;

use crate::domain::value_objects::DateRange;
use chrono::NaiveDate;

/// DATE列の組をDateRangeに変換する
///
/// テーブルのCHECK制約で start <= end は保証されているが、
/// 違反した行は InvalidData として扱う。
pub(crate) fn date_range_from_columns(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DateRange, Box<dyn std::error::Error + Send + Sync>> {
    DateRange::new(start, end).map_err(|e| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        )) as Box<dyn std::error::Error + Send + Sync>
    })
}
