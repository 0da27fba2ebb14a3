//! # 時刻の供給
//!
//! アカウント作成日時はユースケースが [`Clock`] から受け取る。
//! テストでは [`FixedClock`] を渡して作成日時を固定する。

use chrono::{DateTime, Utc};

/// 現在時刻の供給元
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実行環境の時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返す
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
   pub fn new(at: DateTime<Utc>) -> Self {
      Self(at)
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.0
   }
}
