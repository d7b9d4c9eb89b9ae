use crate::domain::{
    toestel::{ListingFilter, Toestel},
    value_objects::{ToestelId, UserId},
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 出品カタログポート
///
/// toestel の永続化と検索を抽象化する。
#[async_trait]
pub trait ToestelCatalog: Send + Sync {
    /// toestel の現在状態を保存する（upsert）
    async fn save(&self, toestel: Toestel) -> Result<()>;

    /// IDで toestel を取得する
    async fn get_by_id(&self, toestel_id: ToestelId) -> Result<Option<Toestel>>;

    /// 条件に一致する toestel を新しい順に返す
    ///
    /// 一致判定は`ListingFilter::matches`と同じ意味を持つこと。
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Toestel>>;

    /// 出品者の toestel を新しい順に返す
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Toestel>>;

    /// toestel とその予約を削除する
    ///
    /// 削除した場合は true、存在しなかった場合は false を返す。
    async fn delete(&self, toestel_id: ToestelId) -> Result<bool>;
}
