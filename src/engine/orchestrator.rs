// ==========================================
// 咖啡馆周排班系统 - 排班编排器
// ==========================================
// 职责: 按配置顺序串行运行各角色调度器,跨角色传递运行期负载,
//       合并结果并做终局全局校验
// 红线: 负载状态由编排器独占持有;在每个角色调度器结束后合并,
//       不在单条排班后合并(保持单角色批次内部一致)
// ==========================================

use crate::config::{validate_role_order, SchedulerConfig};
use crate::domain::types::Role;
use crate::domain::{Assignment, CoverageGap, Employee, TimeWindow, WeekSchedule};
use crate::engine::cohort::CohortScheduler;
use crate::engine::constraints::RunningLoad;
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::engine::manager::ManagerScheduler;
use crate::engine::repositories::RosterRepository;
use crate::engine::sandwich::SandwichScheduler;
use crate::engine::scheduler::RoleScheduler;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// 浮点工时比较容差
const HOURS_EPS: f64 = 1e-6;

// ==========================================
// RosterOrchestrator - 排班编排器
// ==========================================
pub struct RosterOrchestrator {
    role_order: Vec<Role>,
}

impl RosterOrchestrator {
    /// 按调用方指定的角色顺序构造编排器
    ///
    /// 顺序决定哪些角色优先挑选高适配员工(候选池重叠时)
    ///
    /// # 错误
    /// 角色顺序未恰好覆盖已知角色集时返回配置错误
    pub fn new(role_order: Vec<Role>) -> ScheduleResult<Self> {
        validate_role_order(&role_order)?;
        Ok(Self { role_order })
    }

    /// 默认顺序: MANAGER → SANDWICH → BARISTA → WAITER
    pub fn with_default_order() -> Self {
        Self {
            role_order: Role::DEFAULT_ORDER.to_vec(),
        }
    }

    /// 为目标周构建完整排班
    ///
    /// 流程:
    /// 1) 配置与输入完整性检查
    /// 2) 按角色顺序串行运行调度器,每个角色结束后合并负载
    /// 3) 终局全局校验(以最终合并态重查四条硬规则)
    ///
    /// # 返回
    /// WeekSchedule(含覆盖缺口列表,部分覆盖不视为错误)
    #[instrument(skip(self, repo, cfg), fields(week_id = %week_id))]
    pub fn build_schedule(
        &self,
        repo: &dyn RosterRepository,
        week_id: &str,
        cfg: &SchedulerConfig,
    ) -> ScheduleResult<WeekSchedule> {
        info!(role_order = ?self.role_order, "开始构建周排班");
        cfg.validate()?;

        // 输入完整性: 目标周必须有班次、员工名册不可为空
        let shifts = repo.shifts_for_week(week_id);
        if shifts.is_empty() {
            return Err(ScheduleError::InputIntegrity {
                week_id: week_id.to_string(),
                reason: "目标周没有任何班次".to_string(),
            });
        }
        if repo.all_employees().is_empty() {
            return Err(ScheduleError::InputIntegrity {
                week_id: week_id.to_string(),
                reason: "员工名册为空".to_string(),
            });
        }

        // 按顺序运行各角色调度器,跨角色传递负载
        let mut load = RunningLoad::new();
        let mut assignments: Vec<Assignment> = Vec::new();
        let mut gaps: Vec<CoverageGap> = Vec::new();

        for role in &self.role_order {
            let scheduler: Box<dyn RoleScheduler> = match role {
                Role::Manager => Box::new(ManagerScheduler::new()),
                Role::Sandwich => Box::new(SandwichScheduler::new()),
                Role::Barista | Role::Waiter => Box::new(CohortScheduler::new(*role)),
            };
            let output = scheduler.make_schedule(repo, week_id, cfg, &load)?;
            if !output.gaps.is_empty() {
                warn!(
                    role = %role,
                    gaps = output.gaps.len(),
                    "角色存在未填充槽位"
                );
            }
            // 单角色批次结束后一次性合并,后续角色即可看到这些承诺
            load.merge_assignments(&output.assignments);
            assignments.extend(output.assignments);
            gaps.extend(output.gaps);
        }

        // 终局全局校验: 防御顺序相关的陈旧状态
        validate_final(&assignments, &repo.all_employees(), cfg)?;

        info!(
            assignments = assignments.len(),
            gaps = gaps.len(),
            "周排班构建完成"
        );
        Ok(WeekSchedule {
            week_id: week_id.to_string(),
            version_id: uuid::Uuid::new_v4().to_string(),
            assignments,
            gaps,
        })
    }
}

// ==========================================
// 终局全局校验
// ==========================================

/// 以最终合并态重查全部硬规则
///
/// 逐条校验器已在提交前阻止违规,此处发现任何违规都视为引擎缺陷
/// (InvariantViolation),不是可恢复的业务错误
fn validate_final(
    assignments: &[Assignment],
    employees: &[&Employee],
    cfg: &SchedulerConfig,
) -> ScheduleResult<()> {
    let by_id: BTreeMap<u32, &Employee> = employees.iter().map(|e| (e.employee_id, *e)).collect();

    // 1) 角色匹配 + 引用完整性
    for a in assignments {
        let employee = by_id.get(&a.employee_id).ok_or_else(|| {
            ScheduleError::InvariantViolation {
                reason: format!("排班引用未知员工: employee_id={}", a.employee_id),
            }
        })?;
        if !employee.can_work_as(a.role) {
            return Err(ScheduleError::InvariantViolation {
                reason: format!(
                    "角色不匹配: employee_id={} primary_role={} 排班角色={}",
                    a.employee_id, employee.primary_role, a.role
                ),
            });
        }
    }

    // 2) 同员工同日无重叠
    let mut per_employee_day: BTreeMap<(u32, chrono::NaiveDate), Vec<&Assignment>> =
        BTreeMap::new();
    for a in assignments {
        per_employee_day
            .entry((a.employee_id, a.date))
            .or_default()
            .push(a);
    }
    for ((employee_id, date), day_assignments) in &per_employee_day {
        for (i, a) in day_assignments.iter().enumerate() {
            for b in &day_assignments[i + 1..] {
                let wa = TimeWindow::new(a.start_time.time(), a.end_time.time());
                let wb = TimeWindow::new(b.start_time.time(), b.end_time.time());
                if wa.overlaps(&wb) {
                    return Err(ScheduleError::InvariantViolation {
                        reason: format!(
                            "时间窗重叠: employee_id={} date={} {} 与 {}",
                            employee_id, date, wa, wb
                        ),
                    });
                }
            }
        }
    }

    // 3) 工时上限: 按(员工, 角色)累计 vs 角色硬上限;按员工累计 vs 全局上限
    let mut role_hours: BTreeMap<(u32, Role), f64> = BTreeMap::new();
    let mut total_hours: BTreeMap<u32, f64> = BTreeMap::new();
    for a in assignments {
        *role_hours.entry((a.employee_id, a.role)).or_insert(0.0) += a.duration_hours();
        *total_hours.entry(a.employee_id).or_insert(0.0) += a.duration_hours();
    }
    for ((employee_id, role), hours) in &role_hours {
        let cap = cfg.hours_policy_for(*role).hard_cap;
        if *hours > cap + HOURS_EPS {
            return Err(ScheduleError::InvariantViolation {
                reason: format!(
                    "角色工时超限: employee_id={} role={} {:.1}h > {:.1}h",
                    employee_id, role, hours, cap
                ),
            });
        }
    }
    for (employee_id, hours) in &total_hours {
        if *hours > cfg.global_hard_cap + HOURS_EPS {
            return Err(ScheduleError::InvariantViolation {
                reason: format!(
                    "全局工时超限: employee_id={} {:.1}h > {:.1}h",
                    employee_id, hours, cfg.global_hard_cap
                ),
            });
        }
    }

    // 4) 营业时间窗
    for a in assignments {
        let window = TimeWindow::new(a.start_time.time(), a.end_time.time());
        let envelope = cfg.operating_hours_for(a.role);
        if !window.within(&envelope) {
            return Err(ScheduleError::InvariantViolation {
                reason: format!(
                    "超出营业时间窗: employee_id={} role={} window={} envelope={}",
                    a.employee_id, a.role, window, envelope
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayType;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
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

    fn assignment(employee_id: u32, role: Role, day: u32, start: NaiveTime, end: NaiveTime) -> Assignment {
        let date = NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
        Assignment {
            shift_id: day,
            employee_id,
            date,
            start_time: date.and_time(start),
            end_time: date.and_time(end),
            role,
            shift_type: "WEEKDAY".to_string(),
            day_type: DayType::from_date(date),
        }
    }

    #[test]
    fn test_validate_final_detects_overlap() {
        let cfg = SchedulerConfig::default();
        let emp = employee(1, Role::Barista);
        let employees = vec![&emp];
        let assignments = vec![
            assignment(1, Role::Barista, 6, t(7, 0), t(12, 0)),
            assignment(1, Role::Waiter, 6, t(11, 0), t(15, 0)),
        ];
        let err = validate_final(&assignments, &employees, &cfg).unwrap_err();
        assert!(matches!(err, ScheduleError::InvariantViolation { .. }));
    }

    #[test]
    fn test_validate_final_detects_role_mismatch() {
        let cfg = SchedulerConfig::default();
        let emp = employee(1, Role::Sandwich);
        let employees = vec![&emp];
        let assignments = vec![assignment(1, Role::Manager, 1, t(7, 0), t(15, 0))];
        assert!(validate_final(&assignments, &employees, &cfg).is_err());
    }

    #[test]
    fn test_validate_final_accepts_adjacent_windows() {
        let cfg = SchedulerConfig::default();
        let emp = employee(1, Role::Barista);
        let employees = vec![&emp];
        // 首尾相接 [07:00,12:00) + [12:00,15:00) 合法
        let assignments = vec![
            assignment(1, Role::Barista, 6, t(7, 0), t(12, 0)),
            assignment(1, Role::Waiter, 6, t(12, 0), t(15, 0)),
        ];
        assert!(validate_final(&assignments, &employees, &cfg).is_ok());
    }

    #[test]
    fn test_role_order_must_cover_role_set() {
        assert!(RosterOrchestrator::new(Role::DEFAULT_ORDER.to_vec()).is_ok());
        assert!(RosterOrchestrator::new(vec![Role::Manager]).is_err());
        assert!(RosterOrchestrator::new(vec![
            Role::Waiter,
            Role::Waiter,
            Role::Manager,
            Role::Sandwich
        ])
        .is_err());
    }
}
