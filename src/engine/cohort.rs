// ==========================================
// 咖啡馆周排班系统 - 前厅共享池调度器
// ==========================================
// 职责: BARISTA / WAITER 角色覆盖(参数化,同一逻辑)
// 策略: 平日单个 8h 班;周末两个错峰班(07:00-12:00 / 11:00-15:00),
//       每个槽位独立评分填充
// 共享池: 候选人取 BARISTA∪WAITER,角色记在条目上
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::types::{DayType, Role};
use crate::engine::constraints::{ConstraintChecker, RunningLoad};
use crate::engine::error::ScheduleResult;
use crate::engine::repositories::RosterRepository;
use crate::engine::scheduler::{fill_slot, RoleScheduleOutput, RoleScheduler, SlotSpec};
use crate::engine::scoring::FitnessScorer;
use crate::engine::timeplan::TimePlanResolver;
use tracing::{info, instrument};

// ==========================================
// CohortScheduler - 前厅共享池调度器
// ==========================================
pub struct CohortScheduler {
    role: Role,
    resolver: TimePlanResolver,
    checker: ConstraintChecker,
    scorer: FitnessScorer,
}

impl CohortScheduler {
    /// 构造指定前厅角色的调度器
    ///
    /// # Panics
    /// 角色不是 BARISTA/WAITER 时 panic(编排器保证不会发生)
    pub fn new(role: Role) -> Self {
        assert!(
            matches!(role, Role::Barista | Role::Waiter),
            "CohortScheduler 仅支持 BARISTA/WAITER"
        );
        Self {
            role,
            resolver: TimePlanResolver::new(),
            checker: ConstraintChecker::new(),
            scorer: FitnessScorer::new(),
        }
    }
}

impl RoleScheduler for CohortScheduler {
    fn role(&self) -> Role {
        self.role
    }

    #[instrument(skip(self, repo, cfg, base_load), fields(role = %self.role, week_id = %week_id))]
    fn make_schedule(
        &self,
        repo: &dyn RosterRepository,
        week_id: &str,
        cfg: &SchedulerConfig,
        base_load: &RunningLoad,
    ) -> ScheduleResult<RoleScheduleOutput> {
        // 共享池: BARISTA 与 WAITER 互为候选
        let pool = repo.employees_for_role(self.role);
        let mut shifts = repo.shifts_for_week(week_id);
        shifts.sort_by_key(|s| s.date);

        let mut load = base_load.clone();
        let mut output = RoleScheduleOutput::default();

        for shift in shifts {
            let needed = self.resolver.required_headcount(self.role, shift.date, cfg);
            let day_type = DayType::from_date(shift.date);

            for slot_index in 0..needed as usize {
                // 周末错峰: 槽位 0/1 对应不同时间窗
                let window = self
                    .resolver
                    .window_for_slot(self.role, shift.date, slot_index, cfg);
                let shift_type = match day_type {
                    DayType::Weekday => "WEEKDAY".to_string(),
                    DayType::Weekend => format!("WEEKEND_SLOT{}", slot_index + 1),
                };
                let spec = SlotSpec {
                    shift,
                    role: self.role,
                    slot_index,
                    window,
                    shift_type,
                };
                match fill_slot(&pool, &spec, &load, cfg, &self.checker, &self.scorer) {
                    Ok(assignment) => {
                        load.commit(assignment.employee_id, self.role, shift.date, window);
                        output.assignments.push(assignment);
                    }
                    Err(gap) => output.gaps.push(gap),
                }
            }
        }

        info!(
            role = %self.role,
            assignments = output.assignments.len(),
            gaps = output.gaps.len(),
            "CohortScheduler 完成"
        );
        Ok(output)
    }
}
