// ==========================================
// 咖啡馆周排班系统 - 角色调度器契约与共享填充核心
// ==========================================
// 职责: RoleScheduler trait + 贪心/有界回退的槽位填充逻辑
// 算法: 两阶段候选扫描(主池评分选优 → 放宽公平性排序的回退池),
//       硬约束永不放宽;仍无人可用则记录覆盖缺口,不中止整周
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::types::{DayType, Role};
use crate::domain::{Assignment, CoverageGap, Employee, Shift, TimeWindow};
use crate::engine::constraints::{ConstraintChecker, RunningLoad};
use crate::engine::error::ScheduleResult;
use crate::engine::repositories::RosterRepository;
use crate::engine::scoring::FitnessScorer;
use std::cmp::Ordering;
use tracing::debug;

/// 软性目标带比较容差
const HOURS_EPS: f64 = 1e-6;

// ==========================================
// RoleScheduler Trait
// ==========================================
// 每个实现封装一种角色的覆盖规则;编排器按配置顺序依次调用,
// 并通过 base_load 传入之前角色已提交的窗口
pub trait RoleScheduler {
    /// 本调度器负责的角色
    fn role(&self) -> Role;

    /// 为目标周生成本角色的排班条目
    ///
    /// # 参数
    /// - `repo`: 只读数据访问
    /// - `week_id`: ISO 周标识
    /// - `cfg`: 排班配置
    /// - `base_load`: 之前角色已提交的运行期负载快照(本调度器不得修改)
    fn make_schedule(
        &self,
        repo: &dyn RosterRepository,
        week_id: &str,
        cfg: &SchedulerConfig,
        base_load: &RunningLoad,
    ) -> ScheduleResult<RoleScheduleOutput>;
}

/// 单个角色调度器的产出
#[derive(Debug, Clone, Default)]
pub struct RoleScheduleOutput {
    pub assignments: Vec<Assignment>,
    pub gaps: Vec<CoverageGap>,
}

// ==========================================
// 共享槽位填充核心
// ==========================================

/// 待填充槽位描述
pub(crate) struct SlotSpec<'a> {
    pub shift: &'a Shift,
    pub role: Role,
    pub slot_index: usize,
    pub window: TimeWindow,
    pub shift_type: String,
}

/// 填充单个槽位: 两阶段候选扫描
///
/// 阶段1(主池): 通过全部硬约束、且预计工时不超出目标带上限的候选人,
///              按评分降序、employee_id 升序取最优
/// 阶段2(回退): 全部硬约束合格者(含阶段1因超目标带被跳过者),
///              按本周已排天数升序、employee_id 升序取最优
///              —— 只放宽公平性排序,硬约束永不放宽
/// 两阶段均为空 → 返回覆盖缺口
pub(crate) fn fill_slot(
    pool: &[&Employee],
    spec: &SlotSpec<'_>,
    load: &RunningLoad,
    cfg: &SchedulerConfig,
    checker: &ConstraintChecker,
    scorer: &FitnessScorer,
) -> Result<Assignment, CoverageGap> {
    let date = spec.shift.date;
    let slot_hours = spec.window.duration_hours();

    // 硬约束过滤
    let mut eligible: Vec<&Employee> = Vec::new();
    for employee in pool {
        match checker.check(employee, spec.role, date, &spec.window, load, cfg) {
            Ok(()) => eligible.push(employee),
            Err(reason) => {
                debug!(
                    employee_id = employee.employee_id,
                    role = %spec.role,
                    date = %date,
                    reason = %reason,
                    "候选人被硬约束排除"
                );
            }
        }
    }

    if eligible.is_empty() {
        return Err(CoverageGap {
            date,
            role: spec.role,
            slot_index: spec.slot_index,
            reason: format!("NO_ELIGIBLE_CANDIDATE: pool_size={}", pool.len()),
        });
    }

    // 同组工时(公平性分母): 以整个候选池为同组
    let cohort_hours: Vec<f64> = pool.iter().map(|e| load.hours(e.employee_id)).collect();
    let target_max = cfg.hours_policy_for(spec.role).target_max;

    // 阶段1: 主池 = 预计工时仍在目标带上限内的合格者
    let mut primary: Vec<(f64, &Employee)> = eligible
        .iter()
        .filter(|e| load.hours(e.employee_id) + slot_hours <= target_max + HOURS_EPS)
        .map(|e| {
            let current = load.hours(e.employee_id);
            let score = scorer.score(e, spec.role, current, current + slot_hours, &cohort_hours, cfg);
            (score, *e)
        })
        .collect();

    if !primary.is_empty() {
        primary.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.employee_id.cmp(&b.1.employee_id))
        });
        return Ok(make_assignment(spec, primary[0].1));
    }

    // 阶段2: 回退池 = 全部硬约束合格者,按已排天数与 id 排序
    let mut fallback: Vec<&Employee> = eligible;
    fallback.sort_by(|a, b| {
        load.distinct_days(a.employee_id)
            .cmp(&load.distinct_days(b.employee_id))
            .then(a.employee_id.cmp(&b.employee_id))
    });
    debug!(
        role = %spec.role,
        date = %date,
        slot_index = spec.slot_index,
        "主池为空,启用回退扫描"
    );
    Ok(make_assignment(spec, fallback[0]))
}

/// 由槽位描述与选中员工构造排班条目
fn make_assignment(spec: &SlotSpec<'_>, employee: &Employee) -> Assignment {
    let date = spec.shift.date;
    Assignment {
        shift_id: spec.shift.shift_id,
        employee_id: employee.employee_id,
        date,
        start_time: date.and_time(spec.window.start),
        end_time: date.and_time(spec.window.end),
        role: spec.role,
        shift_type: spec.shift_type.clone(),
        day_type: DayType::from_date(date),
    }
}
