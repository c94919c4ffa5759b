use chrono::{Datelike, NaiveDate};

const DATE_FORMAT: &str = "%Y%m%d";

/// 报表账期: 上一个完整自然月
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    /// 上月1日
    pub start: NaiveDate,
    /// 本月1日
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// 以执行日为基准推导账期
    pub fn last_full_month(today: NaiveDate) -> Self {
        let (year, month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("day 1 exists in every month");
        let end = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .expect("day 1 exists in every month");
        Self { start, end }
    }

    /// 形如 20240201-20240301 的日期区间
    pub fn date_range(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
