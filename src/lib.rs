// ==========================================
// 咖啡馆周排班系统 - 核心库
// ==========================================
// 系统定位: 周排班决策引擎(单店、≤数十员工、7天)
// 硬约束: 无重复排班 / 角色匹配 / 营业时间窗 / 周工时上限
// 软目标: 技能适配 + 公平性 + 目标工时 + 周末覆盖
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 排班配置
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DayType, IneligibleReason, Role};

// 领域实体
pub use domain::{Assignment, CoverageGap, Employee, Shift, TimeWindow, WeekSchedule};

// 配置
pub use config::{ConfigError, SchedulerConfig};

// 引擎
pub use engine::{
    CohortScheduler, ConstraintChecker, FitnessScorer, InMemoryRoster, ManagerScheduler,
    RoleScheduler, RosterOrchestrator, RosterRepository, RunningLoad, SandwichScheduler,
    ScheduleError, TimePlanResolver,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "咖啡馆周排班系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
