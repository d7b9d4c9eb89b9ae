use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AvailabilityError;

/// 貸出品ID - 出品された toestel の集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToestelId(Uuid);

impl ToestelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ToestelId {
    fn default() -> Self {
        Self::new()
    }
}

/// 予約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalId(Uuid);

impl RentalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for RentalId {
    fn default() -> Self {
        Self::new()
    }
}

/// ユーザーID - 認証サービスへの参照
///
/// 出品者（owner）と借り手（renter）の両方を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 日付範囲（両端を含む）
///
/// 不変条件：start <= end
/// 貸出可能期間と予約期間の両方に使用する。
/// 逆順の範囲は構築できないため、以降の判定ロジックはこの前提に依存してよい。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AvailabilityError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// 新規作成
    ///
    /// # エラー
    /// end < start の場合は`AvailabilityError::InvalidRangeOrder`を返す
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityError> {
        if end < start {
            return Err(AvailabilityError::InvalidRangeOrder { start, end });
        }
        Ok(Self { start, end })
    }

    /// 1日だけの範囲
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// 2つの日付を含む最小の範囲（引数の順序を問わない）
    pub fn spanning(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 日付が範囲内か（両端を含む）
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 範囲全体がこの範囲に収まるか
    pub fn contains_range(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// 1日でも重なるか
    ///
    /// 隣接する範囲（一方の終了日の翌日が他方の開始日）は重ならない。
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// 両方の範囲に含まれる日の範囲
    ///
    /// 重ならない場合は`None`。
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// 日数（両端を含むので最小は1）
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// 範囲内の日付を昇順に列挙する
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// カテゴリ
///
/// 出品時に選択する固定リスト。表示名がそのまま保存値になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Keukenapparatuur")]
    Keukenapparatuur,
    #[serde(rename = "Tuingereedschap")]
    Tuingereedschap,
    #[serde(rename = "Schoonmaakapparatuur")]
    Schoonmaakapparatuur,
    #[serde(rename = "Gereedschap")]
    Gereedschap,
    #[serde(rename = "Electronica")]
    Electronica,
    #[serde(rename = "Sport & Spel")]
    SportEnSpel,
    #[serde(rename = "Feest & Events")]
    FeestEnEvents,
    #[serde(rename = "Overige")]
    Overige,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Keukenapparatuur,
        Category::Tuingereedschap,
        Category::Schoonmaakapparatuur,
        Category::Gereedschap,
        Category::Electronica,
        Category::SportEnSpel,
        Category::FeestEnEvents,
        Category::Overige,
    ];

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Keukenapparatuur => "Keukenapparatuur",
            Category::Tuingereedschap => "Tuingereedschap",
            Category::Schoonmaakapparatuur => "Schoonmaakapparatuur",
            Category::Gereedschap => "Gereedschap",
            Category::Electronica => "Electronica",
            Category::SportEnSpel => "Sport & Spel",
            Category::FeestEnEvents => "Feest & Events",
            Category::Overige => "Overige",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}
