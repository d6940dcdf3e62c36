// ==========================================
// 咖啡馆周排班系统 - 班次日槽与时间窗
// ==========================================
// 职责: 定义周内营业日槽 (Shift) 与派生时间窗 (TimeWindow)
// 红线: TimeWindow 为派生值对象,区间按 [start, end) 半开处理
// ==========================================

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Shift - 营业日槽
// ==========================================
// 引擎不凭空创建班次,只向既有日槽内的时间窗填人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: u32,
    pub date: NaiveDate,
    /// ISO 周标识,如 "2025-W36"
    pub week_id: String,
}

// ==========================================
// TimeWindow - 时间窗
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// 构造时间窗(调用方保证 start < end,配置校验兜底)
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// 时长(小时),用于周工时累计
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// 半开区间 [start, end) 相交判定
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// 判定本窗是否完全落在营业时间窗 `envelope` 内
    pub fn within(&self, envelope: &TimeWindow) -> bool {
        self.start >= envelope.start && self.end <= envelope.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
