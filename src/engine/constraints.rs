// ==========================================
// 咖啡馆周排班系统 - 硬约束检查引擎
// ==========================================
// 职责: 纯谓词判定(员工, 候选时间窗, 当前部分排班) → 硬约束满足性
// 硬规则: 角色匹配 / 无重叠 / 周工时上限 / 营业时间窗
// 红线: 每条拒绝必须输出 IneligibleReason,供回退扫描与日志解释
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::types::{IneligibleReason, Role};
use crate::domain::{Assignment, Employee, TimeWindow};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 浮点工时比较容差
const HOURS_EPS: f64 = 1e-6;

// ==========================================
// RunningLoad - 运行期负载状态
// ==========================================
// 员工 → 本周已提交时间窗与累计工时;由编排器独占持有,
// 单次 build_schedule 结束后丢弃
// BTreeMap 保证确定性迭代顺序
#[derive(Debug, Clone, Default)]
pub struct RunningLoad {
    committed: BTreeMap<u32, Vec<(NaiveDate, TimeWindow)>>,
    hours: BTreeMap<u32, f64>,
    role_hours: BTreeMap<(u32, Role), f64>,
}

impl RunningLoad {
    pub fn new() -> Self {
        Self::default()
    }

    /// 员工本周累计工时(跨角色)
    pub fn hours(&self, employee_id: u32) -> f64 {
        self.hours.get(&employee_id).copied().unwrap_or(0.0)
    }

    /// 员工本周某角色累计工时
    pub fn role_hours(&self, employee_id: u32, role: Role) -> f64 {
        self.role_hours
            .get(&(employee_id, role))
            .copied()
            .unwrap_or(0.0)
    }

    /// 员工本周已有排班的不同日期数(回退扫描排序键)
    pub fn distinct_days(&self, employee_id: u32) -> usize {
        let mut dates: Vec<NaiveDate> = self
            .committed
            .get(&employee_id)
            .map(|windows| windows.iter().map(|(date, _)| *date).collect())
            .unwrap_or_default();
        dates.sort();
        dates.dedup();
        dates.len()
    }

    /// 候选窗是否与该员工当日已提交窗口重叠(跨角色累计)
    pub fn has_overlap(&self, employee_id: u32, date: NaiveDate, window: &TimeWindow) -> bool {
        self.committed
            .get(&employee_id)
            .map(|windows| {
                windows
                    .iter()
                    .any(|(d, w)| *d == date && w.overlaps(window))
            })
            .unwrap_or(false)
    }

    /// 提交一个时间窗
    pub fn commit(&mut self, employee_id: u32, role: Role, date: NaiveDate, window: TimeWindow) {
        let hours = window.duration_hours();
        self.committed
            .entry(employee_id)
            .or_default()
            .push((date, window));
        *self.hours.entry(employee_id).or_insert(0.0) += hours;
        *self.role_hours.entry((employee_id, role)).or_insert(0.0) += hours;
    }

    /// 批量并入一组排班条目(编排器在每个角色调度器结束后调用)
    pub fn merge_assignments(&mut self, assignments: &[Assignment]) {
        for a in assignments {
            let window = TimeWindow::new(a.start_time.time(), a.end_time.time());
            self.commit(a.employee_id, a.role, a.date, window);
        }
    }
}

// ==========================================
// ConstraintChecker - 硬约束检查引擎
// ==========================================
pub struct ConstraintChecker {
    // 无状态引擎,不需要注入依赖
}

impl ConstraintChecker {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 判定员工能否承接候选时间窗
    ///
    /// 硬规则(全部满足才合格):
    /// 1) 角色匹配: 员工允许角色集包含被调度角色
    /// 2) 无重叠: 候选窗不与该员工本周已提交窗口相交(跨角色)
    /// 3) 工时上限: 累计工时 + 候选窗时长 ≤ 角色硬上限 且 ≤ 全局硬上限
    /// 4) 营业时间窗: 候选窗完全落在该角色的营业时间窗内
    ///
    /// # 返回
    /// - Ok(()): 合格
    /// - Err(IneligibleReason): 不合格及原因
    pub fn check(
        &self,
        employee: &Employee,
        role: Role,
        date: NaiveDate,
        window: &TimeWindow,
        load: &RunningLoad,
        cfg: &SchedulerConfig,
    ) -> Result<(), IneligibleReason> {
        // 1) 角色匹配
        if !employee.can_work_as(role) {
            return Err(IneligibleReason::RoleMismatch {
                primary_role: employee.primary_role,
            });
        }

        // 2) 无重叠
        if load.has_overlap(employee.employee_id, date, window) {
            return Err(IneligibleReason::Overlap { date });
        }

        // 3) 工时上限(角色上限与全局上限)
        let projected = load.hours(employee.employee_id) + window.duration_hours();
        let role_cap = cfg.hours_policy_for(role).hard_cap;
        if projected > role_cap + HOURS_EPS {
            return Err(IneligibleReason::HoursCapExceeded {
                projected_hours: projected,
                cap_hours: role_cap,
            });
        }
        if projected > cfg.global_hard_cap + HOURS_EPS {
            return Err(IneligibleReason::HoursCapExceeded {
                projected_hours: projected,
                cap_hours: cfg.global_hard_cap,
            });
        }

        // 4) 营业时间窗
        let envelope = cfg.operating_hours_for(role);
        if !window.within(&envelope) {
            return Err(IneligibleReason::OutsideOperatingHours { role });
        }

        Ok(())
    }
}

impl Default for ConstraintChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn employee(id: u32, role: Role) -> Employee {
        Employee {
            employee_id: id,
            first_name: format!("E{}", id),
            last_name: "Test".to_string(),
            primary_role: role,
            skill_coffee: 5.0,
            skill_sandwich: 5.0,
            customer_service_rating: 5.0,
            skill_speed: 5.0,
        }
    }

    #[test]
    fn test_role_mismatch_rejected() {
        let checker = ConstraintChecker::new();
        let cfg = SchedulerConfig::default();
        let load = RunningLoad::new();
        let barista = employee(1, Role::Barista);
        let window = TimeWindow::new(t(7, 0), t(15, 0));

        let err = checker
            .check(&barista, Role::Manager, d(1), &window, &load, &cfg)
            .unwrap_err();
        assert_eq!(
            err,
            IneligibleReason::RoleMismatch {
                primary_role: Role::Barista
            }
        );
        // FOH 共享池: BARISTA 可承接 WAITER
        assert!(checker
            .check(&barista, Role::Waiter, d(1), &window, &load, &cfg)
            .is_ok());
    }

    #[test]
    fn test_overlap_rejected_across_roles() {
        let checker = ConstraintChecker::new();
        let cfg = SchedulerConfig::default();
        let mut load = RunningLoad::new();
        let emp = employee(1, Role::Barista);

        load.commit(1, Role::Barista, d(6), TimeWindow::new(t(7, 0), t(12, 0)));

        // 错峰窗口 11:00-15:00 与 07:00-12:00 相交 → 拒绝
        let stagger = TimeWindow::new(t(11, 0), t(15, 0));
        let err = checker
            .check(&emp, Role::Waiter, d(6), &stagger, &load, &cfg)
            .unwrap_err();
        assert_eq!(err, IneligibleReason::Overlap { date: d(6) });

        // 不同日期不冲突
        assert!(checker
            .check(&emp, Role::Waiter, d(7), &stagger, &load, &cfg)
            .is_ok());
    }

    #[test]
    fn test_hours_cap_rejected() {
        let checker = ConstraintChecker::new();
        let cfg = SchedulerConfig::default();
        let mut load = RunningLoad::new();
        let mgr = employee(1, Role::Manager);
        let window = TimeWindow::new(t(7, 0), t(15, 0));

        // 已排 4 天 × 8h = 32h,第 5 天 40h 恰好到上限
        for day in 1..=4 {
            load.commit(1, Role::Manager, d(day), window);
        }
        assert!(checker
            .check(&mgr, Role::Manager, d(5), &window, &load, &cfg)
            .is_ok());

        // 第 6 天 48h 超过 MANAGER 40h 硬上限
        load.commit(1, Role::Manager, d(5), window);
        let err = checker
            .check(&mgr, Role::Manager, d(6), &window, &load, &cfg)
            .unwrap_err();
        assert!(matches!(
            err,
            IneligibleReason::HoursCapExceeded { cap_hours, .. } if cap_hours == 40.0
        ));
    }

    #[test]
    fn test_operating_hours_envelope() {
        let checker = ConstraintChecker::new();
        let cfg = SchedulerConfig::default();
        let load = RunningLoad::new();

        // SANDWICH 可在 05:00 开工
        let prep = employee(1, Role::Sandwich);
        let early = TimeWindow::new(t(5, 0), t(12, 0));
        assert!(checker
            .check(&prep, Role::Sandwich, d(1), &early, &load, &cfg)
            .is_ok());

        // BARISTA 不可早于 07:00
        let barista = employee(2, Role::Barista);
        let err = checker
            .check(&barista, Role::Barista, d(1), &early, &load, &cfg)
            .unwrap_err();
        assert_eq!(
            err,
            IneligibleReason::OutsideOperatingHours {
                role: Role::Barista
            }
        );
    }

    #[test]
    fn test_distinct_days_counting() {
        let mut load = RunningLoad::new();
        assert_eq!(load.distinct_days(1), 0);
        load.commit(1, Role::Barista, d(6), TimeWindow::new(t(7, 0), t(12, 0)));
        load.commit(1, Role::Waiter, d(6), TimeWindow::new(t(12, 0), t(15, 0)));
        load.commit(1, Role::Barista, d(7), TimeWindow::new(t(7, 0), t(12, 0)));
        assert_eq!(load.distinct_days(1), 2);
        assert_eq!(load.hours(1), 13.0);
        assert_eq!(load.role_hours(1, Role::Waiter), 3.0);
    }
}
