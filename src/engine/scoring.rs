// ==========================================
// 咖啡馆周排班系统 - 适配度评分引擎
// ==========================================
// 职责: 对已通过硬约束的候选人计算软性多目标评分
// 组成: 加权技能适配 − 公平性罚分 − 目标工时偏离罚分
// 红线: 评分只用于排序合格候选人,永不推翻硬约束判定
// ==========================================

use crate::config::{HoursPenalties, HoursPolicy, SchedulerConfig, Weights};
use crate::domain::types::Role;
use crate::domain::Employee;

// ==========================================
// FitnessScorer - 适配度评分引擎
// ==========================================
pub struct FitnessScorer {
    // 无状态引擎,不需要注入依赖
}

impl FitnessScorer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 候选人综合评分,分值越高越优
    ///
    /// score = 技能适配 − 公平性罚分 − 目标工时偏离罚分
    ///
    /// # 参数
    /// - `employee`: 候选员工
    /// - `role`: 被调度角色
    /// - `current_hours`: 员工当前累计工时(公平性基准)
    /// - `projected_hours`: 提交候选窗后的累计工时(工时偏离基准)
    /// - `cohort_hours`: 角色同组全体员工的当前工时
    /// - `cfg`: 排班配置
    pub fn score(
        &self,
        employee: &Employee,
        role: Role,
        current_hours: f64,
        projected_hours: f64,
        cohort_hours: &[f64],
        cfg: &SchedulerConfig,
    ) -> f64 {
        let fitness = self.role_fitness(employee, role, &cfg.weights);
        let fairness = fairness_penalty(
            current_hours,
            cohort_hours,
            cfg.weights.fairness_penalty_per_std_above_median,
        );
        let hours_dev = hours_deviation_penalty(
            projected_hours,
            &cfg.hours_policy_for(role),
            &cfg.hours_penalties,
        );
        fitness - fairness - hours_dev
    }

    /// 按角色加权的技能适配分
    ///
    /// - MANAGER: 固定 manager_weight(经理间技能视为同质)
    /// - BARISTA: coffee + speed + customer_service
    /// - WAITER: customer_service + speed
    /// - SANDWICH: sandwich + speed
    pub fn role_fitness(&self, employee: &Employee, role: Role, weights: &Weights) -> f64 {
        match role {
            Role::Manager => weights.manager_weight,
            Role::Barista => {
                weights.coffee * employee.skill_coffee
                    + weights.speed * employee.skill_speed
                    + weights.customer_service * employee.customer_service_rating
            }
            Role::Waiter => {
                weights.customer_service * employee.customer_service_rating
                    + weights.speed * employee.skill_speed
            }
            Role::Sandwich => {
                weights.sandwich * employee.skill_sandwich + weights.speed * employee.skill_speed
            }
        }
    }
}

impl Default for FitnessScorer {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 罚分函数
// ==========================================

/// 公平性罚分: 当前工时高于同组中位数的标准差倍数 × 罚分权重
///
/// 同组 ≤1 人、离散为零、或工时不高于中位数时为 0
fn fairness_penalty(current_hours: f64, cohort_hours: &[f64], penalty_per_std: f64) -> f64 {
    if cohort_hours.len() <= 1 {
        return 0.0;
    }
    let med = median(cohort_hours);
    if current_hours <= med {
        return 0.0;
    }
    let std = std_dev(cohort_hours);
    if std <= f64::EPSILON {
        return 0.0;
    }
    penalty_per_std * (current_hours - med) / std
}

/// 目标工时偏离罚分: 预计工时落在 [target_min, target_max] 带内为 0,
/// 低于下限按 per_hour_below_target 计罚,高于上限按 per_hour_above_target 计罚
fn hours_deviation_penalty(
    projected_hours: f64,
    policy: &HoursPolicy,
    penalties: &HoursPenalties,
) -> f64 {
    if projected_hours < policy.target_min {
        (policy.target_min - projected_hours) * penalties.per_hour_below_target
    } else if projected_hours > policy.target_max {
        (projected_hours - policy.target_max) * penalties.per_hour_above_target
    } else {
        0.0
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// 总体标准差
fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: u32, role: Role, coffee: f64, sandwich: f64, cs: f64, speed: f64) -> Employee {
        Employee {
            employee_id: id,
            first_name: format!("E{}", id),
            last_name: "Test".to_string(),
            primary_role: role,
            skill_coffee: coffee,
            skill_sandwich: sandwich,
            customer_service_rating: cs,
            skill_speed: speed,
        }
    }

    #[test]
    fn test_role_fitness_weighting() {
        let scorer = FitnessScorer::new();
        let weights = Weights::default();
        let emp = employee(1, Role::Barista, 8.0, 6.0, 4.0, 2.0);

        // BARISTA: 1.0*8 + 0.5*2 + 0.5*4 = 11
        assert_eq!(scorer.role_fitness(&emp, Role::Barista, &weights), 11.0);
        // WAITER: 0.5*4 + 0.5*2 = 3
        assert_eq!(scorer.role_fitness(&emp, Role::Waiter, &weights), 3.0);
        // SANDWICH: 1.0*6 + 0.5*2 = 7
        assert_eq!(scorer.role_fitness(&emp, Role::Sandwich, &weights), 7.0);
        // MANAGER: 常量权重
        assert_eq!(scorer.role_fitness(&emp, Role::Manager, &weights), 1.0);
    }

    #[test]
    fn test_fairness_penalty_above_median_only() {
        let cohort = [0.0, 8.0, 16.0];
        // 中位数 8,不高于中位数不罚
        assert_eq!(fairness_penalty(8.0, &cohort, 0.25), 0.0);
        assert_eq!(fairness_penalty(0.0, &cohort, 0.25), 0.0);
        // 高于中位数按标准差倍数计罚
        let penalty = fairness_penalty(16.0, &cohort, 0.25);
        assert!(penalty > 0.0);
        // 同组单人不罚
        assert_eq!(fairness_penalty(40.0, &[40.0], 0.25), 0.0);
        // 离散为零不罚
        assert_eq!(fairness_penalty(9.0, &[8.0, 8.0, 8.0], 0.25), 0.0);
    }

    #[test]
    fn test_hours_deviation_band() {
        let policy = HoursPolicy {
            target_min: 16.0,
            target_max: 32.0,
            hard_cap: 40.0,
        };
        let penalties = HoursPenalties::default();
        // 带内为 0
        assert_eq!(hours_deviation_penalty(24.0, &policy, &penalties), 0.0);
        assert_eq!(hours_deviation_penalty(16.0, &policy, &penalties), 0.0);
        assert_eq!(hours_deviation_penalty(32.0, &policy, &penalties), 0.0);
        // 低于下限: (16-8) * 0.5 = 4
        assert_eq!(hours_deviation_penalty(8.0, &policy, &penalties), 4.0);
        // 高于上限: (36-32) * 0.75 = 3
        assert_eq!(hours_deviation_penalty(36.0, &policy, &penalties), 3.0);
    }

    #[test]
    fn test_score_prefers_less_loaded_equal_skill() {
        let scorer = FitnessScorer::new();
        let cfg = SchedulerConfig::default();
        let a = employee(1, Role::Barista, 7.0, 0.0, 7.0, 7.0);
        let b = employee(2, Role::Barista, 7.0, 0.0, 7.0, 7.0);
        let cohort = [24.0, 8.0];

        // 技能相同,工时少者得分更高
        let score_a = scorer.score(&a, Role::Barista, 24.0, 32.0, &cohort, &cfg);
        let score_b = scorer.score(&b, Role::Barista, 8.0, 16.0, &cohort, &cfg);
        assert!(score_b > score_a);
    }
}
