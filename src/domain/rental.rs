use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    CancelRentalError, DateRange, RentToestelError, RentalCancelled, RentalCreated, RentalId,
    ToestelId, UserId, availability, toestel::Toestel,
};

/// Rental集約 - 1つの toestel に対する1件の確定済み予約
///
/// キャンセル時はレコードごと削除されるため、状態は持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub rental_id: RentalId,
    pub toestel_id: ToestelId,
    pub renter_id: UserId,
    pub period: DateRange,
    pub created_at: DateTime<Utc>,
}

/// 予約一覧から予約期間のみを取り出す
pub fn booked_periods(rentals: &[Rental]) -> Vec<DateRange> {
    rentals.iter().map(|rental| rental.period).collect()
}

/// 純粋関数：予約する
///
/// ビジネスルール：
/// - 出品者は自分の toestel を借りられない
/// - 期間全体が貸出可能期間内であること
/// - 既存予約と1日も重ならないこと
///
/// `existing`は呼び出し側が取得したスナップショット。鮮度は保証しない
/// （永続化時の再検証はアダプター側で行う）。
pub fn rent_toestel(
    toestel: &Toestel,
    renter_id: UserId,
    period: DateRange,
    existing: &[Rental],
    now: DateTime<Utc>,
) -> Result<(Rental, RentalCreated), RentToestelError> {
    if toestel.owner_id == renter_id {
        return Err(RentToestelError::OwnToestel);
    }

    check_period(&period, &toestel.availability, &booked_periods(existing))?;

    let rental = Rental {
        rental_id: RentalId::new(),
        toestel_id: toestel.toestel_id,
        renter_id,
        period,
        created_at: now,
    };

    let event = RentalCreated {
        rental_id: rental.rental_id,
        toestel_id: rental.toestel_id,
        renter_id,
        period,
        created_at: now,
    };

    Ok((rental, event))
}

/// 期間が貸出可能期間内かつ既存予約と重ならないかを検証する
///
/// 予約作成時と永続化直前の再検証の両方で使われる。
pub fn check_period(
    period: &DateRange,
    window: &DateRange,
    bookings: &[DateRange],
) -> Result<(), RentToestelError> {
    if !window.contains_range(period) {
        return Err(RentToestelError::OutsideAvailabilityWindow { window: *window });
    }
    if !availability::is_period_available(period, window, bookings) {
        return Err(RentToestelError::AlreadyBooked {
            conflicts: availability::find_conflicts(period, bookings),
        });
    }
    Ok(())
}

/// 純粋関数：予約をキャンセルする
///
/// 借り手・出品者のどちらからでもキャンセルできる。
pub fn cancel_rental(
    rental: &Rental,
    owner_id: UserId,
    cancelled_by: UserId,
    now: DateTime<Utc>,
) -> Result<RentalCancelled, CancelRentalError> {
    if cancelled_by != rental.renter_id && cancelled_by != owner_id {
        return Err(CancelRentalError::NotPermitted);
    }

    Ok(RentalCancelled {
        rental_id: rental.rental_id,
        toestel_id: rental.toestel_id,
        period: rental.period,
        cancelled_by,
        cancelled_at: now,
    })
}
