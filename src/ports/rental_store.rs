use crate::domain::{
    rental::Rental,
    value_objects::{DateRange, RentalId, ToestelId, UserId},
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 条件付き挿入の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// 保存された
    Inserted,
    /// 保存時点の貸出可能期間外だった
    OutsideAvailabilityWindow { window: DateRange },
    /// 保存時点で既存予約と重なっていた
    Conflict(Vec<DateRange>),
    /// 保存時点で toestel が存在しなかった
    ToestelMissing,
}

/// 予約ストアポート
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// toestel の全予約を開始日順に取得する
    async fn find_by_toestel(&self, toestel_id: ToestelId) -> Result<Vec<Rental>>;

    /// 借り手の全予約を開始日順に取得する
    async fn find_by_renter(&self, renter_id: UserId) -> Result<Vec<Rental>>;

    /// IDで予約を取得する
    async fn get_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>>;

    /// 期間が空いている場合のみ予約を保存する
    ///
    /// toestel の現在の貸出可能期間の読み込み、既存予約との照合、挿入を
    /// 不可分に行う。同じ toestel への同時予約や貸出可能期間の変更と
    /// 交錯しても、確認時点と異なる状態に対して保存されることはない。
    async fn insert_if_available(&self, rental: Rental) -> Result<InsertOutcome>;

    /// 予約を削除する
    ///
    /// 削除した場合は true、存在しなかった場合は false を返す。
    async fn delete(&self, rental_id: RentalId) -> Result<bool>;
}
