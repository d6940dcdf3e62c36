// ==========================================
// 咖啡馆周排班系统 - 排班条目与周排班结果
// ==========================================
// 职责: 引擎产出物(Assignment / CoverageGap / WeekSchedule)
// 红线: WeekSchedule 产出后不可变,修正需重新运行
// ==========================================

use crate::domain::types::{DayType, Role};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// Assignment - 排班条目
// ==========================================
// 角色记在条目上(FOH 共享池: 员工主角色可能与条目角色不同)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub shift_id: u32,
    pub employee_id: u32,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub role: Role,
    /// 班型标签,如 WEEKDAY / WEEKEND_SLOT1 / EARLY_PREP
    pub shift_type: String,
    pub day_type: DayType,
}

impl Assignment {
    /// 条目时长(小时)
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_minutes() as f64 / 60.0
    }
}

// ==========================================
// CoverageGap - 覆盖缺口
// ==========================================
// 非致命: 回退扫描后仍无合格候选人时记录,随排班结果一并返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub date: NaiveDate,
    pub role: Role,
    pub slot_index: usize,
    pub reason: String,
}

// ==========================================
// WeekSchedule - 周排班结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week_id: String,
    /// 本次运行的方案版本ID
    pub version_id: String,
    pub assignments: Vec<Assignment>,
    pub gaps: Vec<CoverageGap>,
}

impl WeekSchedule {
    /// 某员工在本周的总工时
    pub fn hours_for_employee(&self, employee_id: u32) -> f64 {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .map(|a| a.duration_hours())
            .sum()
    }

    /// 某日某角色的条目数(覆盖统计)
    pub fn coverage(&self, date: NaiveDate, role: Role) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.date == date && a.role == role)
            .count()
    }
}
