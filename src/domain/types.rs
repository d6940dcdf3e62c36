// ==========================================
// 咖啡馆周排班系统 - 领域类型定义
// ==========================================
// 职责: 定义角色、日类型与硬约束拒绝原因
// 红线: 角色集固定为四种,共享池规则集中在 Role 上表达
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 角色 (Role)
// ==========================================
// BARISTA/WAITER 构成前厅 (FOH) 共享池: 角色记在排班条目上,
// 不绑定到员工本人
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Barista,
    Waiter,
    Sandwich,
}

impl Role {
    /// 已知角色全集(固定顺序,用于角色顺序校验)
    pub const ALL: [Role; 4] = [Role::Manager, Role::Barista, Role::Waiter, Role::Sandwich];

    /// 默认调度顺序: MANAGER → SANDWICH → BARISTA → WAITER
    pub const DEFAULT_ORDER: [Role; 4] =
        [Role::Manager, Role::Sandwich, Role::Barista, Role::Waiter];

    /// 判断主角色为 `primary` 的员工是否允许承接本角色的排班
    ///
    /// 规则: MANAGER/SANDWICH 仅限本角色; BARISTA 与 WAITER 互通(共享池)
    pub fn allows_primary(&self, primary: Role) -> bool {
        match self {
            Role::Manager => primary == Role::Manager,
            Role::Sandwich => primary == Role::Sandwich,
            Role::Barista | Role::Waiter => {
                matches!(primary, Role::Barista | Role::Waiter)
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manager => write!(f, "MANAGER"),
            Role::Barista => write!(f, "BARISTA"),
            Role::Waiter => write!(f, "WAITER"),
            Role::Sandwich => write!(f, "SANDWICH"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MANAGER" => Ok(Role::Manager),
            "BARISTA" => Ok(Role::Barista),
            "WAITER" => Ok(Role::Waiter),
            "SANDWICH" => Ok(Role::Sandwich),
            other => Err(format!("未知角色: {}", other)),
        }
    }
}

// ==========================================
// 日类型 (Day Type)
// ==========================================
// 驱动 TimePlanResolver 的不同规则(平日单班 / 周末错峰)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// 根据日期判定日类型(周六/周日为 WEEKEND)
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        match date.weekday() {
            chrono::Weekday::Sat | chrono::Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Weekday => write!(f, "WEEKDAY"),
            DayType::Weekend => write!(f, "WEEKEND"),
        }
    }
}

// ==========================================
// 硬约束拒绝原因 (Ineligible Reason)
// ==========================================
// 红线: 所有硬约束判定必须输出 reason,供回退扫描与日志解释
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind")]
pub enum IneligibleReason {
    /// 角色不匹配: 员工主角色不在本角色允许集内
    RoleMismatch { primary_role: Role },
    /// 当日时间窗重叠(跨角色累计窗口)
    Overlap { date: chrono::NaiveDate },
    /// 周工时硬上限超限
    HoursCapExceeded { projected_hours: f64, cap_hours: f64 },
    /// 超出该角色营业时间窗
    OutsideOperatingHours { role: Role },
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::RoleMismatch { primary_role } => {
                write!(f, "ROLE_MISMATCH: primary_role={}", primary_role)
            }
            IneligibleReason::Overlap { date } => {
                write!(f, "OVERLAP: date={}", date)
            }
            IneligibleReason::HoursCapExceeded {
                projected_hours,
                cap_hours,
            } => {
                write!(
                    f,
                    "HOURS_CAP_EXCEEDED: projected={:.1}h cap={:.1}h",
                    projected_hours, cap_hours
                )
            }
            IneligibleReason::OutsideOperatingHours { role } => {
                write!(f, "OUTSIDE_OPERATING_HOURS: role={}", role)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_role_parse_roundtrip() {
        for role in Role::ALL {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("CHEF".parse::<Role>().is_err());
    }

    #[test]
    fn test_foh_shared_pool() {
        // BARISTA/WAITER 互通
        assert!(Role::Barista.allows_primary(Role::Waiter));
        assert!(Role::Waiter.allows_primary(Role::Barista));
        // MANAGER/SANDWICH 排他
        assert!(!Role::Manager.allows_primary(Role::Barista));
        assert!(!Role::Sandwich.allows_primary(Role::Waiter));
        assert!(Role::Sandwich.allows_primary(Role::Sandwich));
    }

    #[test]
    fn test_day_type_from_date() {
        // 2025-09-06 是周六
        let sat = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
        let mon = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(DayType::from_date(sat), DayType::Weekend);
        assert_eq!(DayType::from_date(mon), DayType::Weekday);
    }
}
