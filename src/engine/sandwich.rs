// ==========================================
// 咖啡馆周排班系统 - 三明治备餐调度器
// ==========================================
// 职责: SANDWICH 角色覆盖(开店前备餐)
// 策略: 清晨班 05:00-12:00,周末延长至 13:30;默认每日 1 人
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
// SandwichScheduler - 三明治备餐调度器
// ==========================================
pub struct SandwichScheduler {
    resolver: TimePlanResolver,
    checker: ConstraintChecker,
    scorer: FitnessScorer,
}

impl SandwichScheduler {
    pub fn new() -> Self {
        Self {
            resolver: TimePlanResolver::new(),
            checker: ConstraintChecker::new(),
            scorer: FitnessScorer::new(),
        }
    }
}

impl Default for SandwichScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleScheduler for SandwichScheduler {
    fn role(&self) -> Role {
        Role::Sandwich
    }

    #[instrument(skip(self, repo, cfg, base_load), fields(week_id = %week_id))]
    fn make_schedule(
        &self,
        repo: &dyn RosterRepository,
        week_id: &str,
        cfg: &SchedulerConfig,
        base_load: &RunningLoad,
    ) -> ScheduleResult<RoleScheduleOutput> {
        let staff = repo.employees_for_role(Role::Sandwich);
        let mut shifts = repo.shifts_for_week(week_id);
        shifts.sort_by_key(|s| s.date);

        let mut load = base_load.clone();
        let mut output = RoleScheduleOutput::default();

        for shift in shifts {
            let needed = self
                .resolver
                .required_headcount(Role::Sandwich, shift.date, cfg);
            let shift_type = match DayType::from_date(shift.date) {
                DayType::Weekday => "EARLY_PREP",
                DayType::Weekend => "WEEKEND_PREP",
            };

            for slot_index in 0..needed as usize {
                let window =
                    self.resolver
                        .window_for_slot(Role::Sandwich, shift.date, slot_index, cfg);
                let spec = SlotSpec {
                    shift,
                    role: Role::Sandwich,
                    slot_index,
                    window,
                    shift_type: shift_type.to_string(),
                };
                match fill_slot(&staff, &spec, &load, cfg, &self.checker, &self.scorer) {
                    Ok(assignment) => {
                        load.commit(assignment.employee_id, Role::Sandwich, shift.date, window);
                        output.assignments.push(assignment);
                    }
                    Err(gap) => output.gaps.push(gap),
                }
            }
        }

        info!(
            assignments = output.assignments.len(),
            gaps = output.gaps.len(),
            "SandwichScheduler 完成"
        );
        Ok(output)
    }
}
