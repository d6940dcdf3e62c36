// ==========================================
// 咖啡馆周排班系统 - 经理调度器
// ==========================================
// 职责: MANAGER 角色覆盖(平日 1 人 / 周末 2 人)
// 策略: 周末优先排(为忙日预留经理工时),默认班次 07:00-15:00
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
// ManagerScheduler - 经理调度器
// ==========================================
pub struct ManagerScheduler {
    resolver: TimePlanResolver,
    checker: ConstraintChecker,
    scorer: FitnessScorer,
}

impl ManagerScheduler {
    pub fn new() -> Self {
        Self {
            resolver: TimePlanResolver::new(),
            checker: ConstraintChecker::new(),
            scorer: FitnessScorer::new(),
        }
    }
}

impl Default for ManagerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleScheduler for ManagerScheduler {
    fn role(&self) -> Role {
        Role::Manager
    }

    #[instrument(skip(self, repo, cfg, base_load), fields(week_id = %week_id))]
    fn make_schedule(
        &self,
        repo: &dyn RosterRepository,
        week_id: &str,
        cfg: &SchedulerConfig,
        base_load: &RunningLoad,
    ) -> ScheduleResult<RoleScheduleOutput> {
        let managers = repo.employees_for_role(Role::Manager);
        let mut shifts = repo.shifts_for_week(week_id);

        // 周末优先: 先排忙日,确保经理为周末双人覆盖预留工时
        shifts.sort_by_key(|s| {
            let weekend_first = match DayType::from_date(s.date) {
                DayType::Weekend => 0,
                DayType::Weekday => 1,
            };
            (weekend_first, s.date)
        });

        let mut load = base_load.clone();
        let mut output = RoleScheduleOutput::default();

        for shift in shifts {
            let needed = self.resolver.required_headcount(Role::Manager, shift.date, cfg);
            let day_type = DayType::from_date(shift.date);

            for slot_index in 0..needed as usize {
                // 日期覆盖可为多槽位日配置错峰窗,逐槽解析
                let window = self
                    .resolver
                    .window_for_slot(Role::Manager, shift.date, slot_index, cfg);
                let spec = SlotSpec {
                    shift,
                    role: Role::Manager,
                    slot_index,
                    window,
                    shift_type: day_type.to_string(),
                };
                match fill_slot(&managers, &spec, &load, cfg, &self.checker, &self.scorer) {
                    Ok(assignment) => {
                        load.commit(assignment.employee_id, Role::Manager, shift.date, window);
                        output.assignments.push(assignment);
                    }
                    Err(gap) => output.gaps.push(gap),
                }
            }
        }

        info!(
            assignments = output.assignments.len(),
            gaps = output.gaps.len(),
            "ManagerScheduler 完成"
        );
        Ok(output)
    }
}
