// ==========================================
// 咖啡馆周排班系统 - 时间计划解析引擎
// ==========================================
// 职责: 由声明式规则推导各角色/各日的具体时间窗与人数需求
// 解析顺序: 日期覆盖 → 角色+日类型规则 → 角色默认 → 全局默认
// 红线: 无副作用,相同输入必须得到相同输出
//       (约束检查器与终局校验会独立重算时间窗,二者必须一致)
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::types::{DayType, Role};
use crate::domain::TimeWindow;
use chrono::NaiveDate;

// ==========================================
// TimePlanResolver - 时间计划解析引擎
// ==========================================
pub struct TimePlanResolver {
    // 无状态引擎,不需要注入依赖
}

impl TimePlanResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 解析某角色在某日需要填充的时间窗列表(一个或多个)
    ///
    /// 解析顺序:
    /// 1) 日期覆盖 (overrides[date].windows[role])
    /// 2) 角色+日类型规则 (role_time_windows[role].{weekday|weekend})
    /// 3) 角色默认 (role_time_windows[role].weekday)
    /// 4) 全局默认班次 (default_shift)
    ///
    /// # 参数
    /// - `role`: 角色
    /// - `date`: 班次日期
    /// - `cfg`: 排班配置
    ///
    /// # 返回
    /// 有序时间窗列表,至少一个
    pub fn windows_for(
        &self,
        role: Role,
        date: NaiveDate,
        cfg: &SchedulerConfig,
    ) -> Vec<TimeWindow> {
        // 1) 日期覆盖
        if let Some(day_override) = cfg.overrides.get(&date) {
            if let Some(rules) = day_override.windows.get(&role) {
                if !rules.is_empty() {
                    return rules.iter().map(|r| r.as_window()).collect();
                }
            }
        }

        let day_type = DayType::from_date(date);
        if let Some(role_windows) = cfg.role_time_windows.get(&role) {
            // 2) 角色+日类型规则
            let by_day_type = match day_type {
                DayType::Weekday => &role_windows.weekday,
                DayType::Weekend => &role_windows.weekend,
            };
            if !by_day_type.is_empty() {
                return by_day_type.iter().map(|r| r.as_window()).collect();
            }
            // 3) 角色默认(平日规则兜底周末)
            if !role_windows.weekday.is_empty() {
                return role_windows.weekday.iter().map(|r| r.as_window()).collect();
            }
        }

        // 4) 全局默认班次
        vec![cfg.default_window()]
    }

    /// 解析单个槽位的时间窗
    ///
    /// 槽位数可能超过该日配置的时间窗数(如清晨窗单窗但需求2人),
    /// 超出部分沿用最后一个已配置时间窗
    /// (角色窗可能整体早于全局默认班次,不可跨角色回落)
    pub fn window_for_slot(
        &self,
        role: Role,
        date: NaiveDate,
        slot_index: usize,
        cfg: &SchedulerConfig,
    ) -> TimeWindow {
        let windows = self.windows_for(role, date, cfg);
        windows
            .get(slot_index)
            .or_else(|| windows.last())
            .copied()
            .unwrap_or_else(|| cfg.default_window())
    }

    /// 解析某角色在某日的人数需求
    ///
    /// 解析顺序: 日期覆盖 → 周末需求 → 默认需求 → 0
    pub fn required_headcount(&self, role: Role, date: NaiveDate, cfg: &SchedulerConfig) -> u32 {
        if let Some(day_override) = cfg.overrides.get(&date) {
            if let Some(count) = day_override.requirements.get(&role) {
                return *count;
            }
        }
        if DayType::from_date(date) == DayType::Weekend {
            if let Some(count) = cfg.weekend_requirements.get(&role) {
                return *count;
            }
        }
        cfg.default_requirements.get(&role).copied().unwrap_or(0)
    }
}

impl Default for TimePlanResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DayOverride, WindowRule};
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        // 2025-09-01 (周一) 起始的一周
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_manager_falls_back_to_default_shift() {
        let resolver = TimePlanResolver::new();
        let cfg = SchedulerConfig::default();
        let windows = resolver.windows_for(Role::Manager, d(1), &cfg);
        assert_eq!(windows, vec![TimeWindow::new(t(7, 0), t(15, 0))]);
    }

    #[test]
    fn test_sandwich_weekday_and_weekend_windows() {
        let resolver = TimePlanResolver::new();
        let cfg = SchedulerConfig::default();
        // 周一: 05:00-12:00
        let weekday = resolver.windows_for(Role::Sandwich, d(1), &cfg);
        assert_eq!(weekday, vec![TimeWindow::new(t(5, 0), t(12, 0))]);
        // 周六: 05:00-13:30
        let weekend = resolver.windows_for(Role::Sandwich, d(6), &cfg);
        assert_eq!(weekend, vec![TimeWindow::new(t(5, 0), t(13, 30))]);
    }

    #[test]
    fn test_cohort_weekend_staggered_windows() {
        let resolver = TimePlanResolver::new();
        let cfg = SchedulerConfig::default();
        let windows = resolver.windows_for(Role::Barista, d(6), &cfg);
        assert_eq!(
            windows,
            vec![
                TimeWindow::new(t(7, 0), t(12, 0)),
                TimeWindow::new(t(11, 0), t(15, 0)),
            ]
        );
        // 槽位越界沿用最后一个已配置窗口
        assert_eq!(
            resolver.window_for_slot(Role::Barista, d(6), 5, &cfg),
            TimeWindow::new(t(11, 0), t(15, 0))
        );
    }

    #[test]
    fn test_extra_slots_reuse_last_role_window() {
        let resolver = TimePlanResolver::new();
        let cfg = SchedulerConfig::default();
        // SANDWICH 单窗配置下,第二槽位必须仍落在清晨窗
        // (全局默认班次 07:00-15:00 会超出 05:00-13:30 营业窗)
        assert_eq!(
            resolver.window_for_slot(Role::Sandwich, d(1), 1, &cfg),
            TimeWindow::new(t(5, 0), t(12, 0))
        );
        assert_eq!(
            resolver.window_for_slot(Role::Sandwich, d(6), 1, &cfg),
            TimeWindow::new(t(5, 0), t(13, 30))
        );
    }

    #[test]
    fn test_date_override_takes_precedence() {
        let resolver = TimePlanResolver::new();
        let mut cfg = SchedulerConfig::default();
        let mut day_override = DayOverride::default();
        day_override
            .windows
            .insert(Role::Sandwich, vec![WindowRule::new(t(6, 0), t(11, 0))]);
        cfg.overrides.insert(d(3), day_override);

        let windows = resolver.windows_for(Role::Sandwich, d(3), &cfg);
        assert_eq!(windows, vec![TimeWindow::new(t(6, 0), t(11, 0))]);
        // 其他日期不受影响
        let other = resolver.windows_for(Role::Sandwich, d(4), &cfg);
        assert_eq!(other, vec![TimeWindow::new(t(5, 0), t(12, 0))]);
    }

    #[test]
    fn test_headcount_ladder() {
        let resolver = TimePlanResolver::new();
        let mut cfg = SchedulerConfig::default();
        // 平日 1 名经理,周末 2 名
        assert_eq!(resolver.required_headcount(Role::Manager, d(1), &cfg), 1);
        assert_eq!(resolver.required_headcount(Role::Manager, d(6), &cfg), 2);
        assert_eq!(resolver.required_headcount(Role::Manager, d(7), &cfg), 2);

        // 日期覆盖最高优先
        let mut day_override = DayOverride::default();
        day_override.requirements.insert(Role::Manager, 3);
        cfg.overrides.insert(d(6), day_override);
        assert_eq!(resolver.required_headcount(Role::Manager, d(6), &cfg), 3);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = TimePlanResolver::new();
        let cfg = SchedulerConfig::default();
        for _ in 0..3 {
            assert_eq!(
                resolver.windows_for(Role::Waiter, d(7), &cfg),
                resolver.windows_for(Role::Waiter, d(7), &cfg)
            );
        }
    }
}
