// ==========================================
// 咖啡馆周排班系统 - 引擎层
// ==========================================
// 职责: 实现排班业务规则引擎
// 红线: 引擎不做 I/O;所有硬约束判定必须输出 reason
// ==========================================

pub mod cohort;
pub mod constraints;
pub mod error;
pub mod manager;
pub mod orchestrator;
pub mod repositories;
pub mod sandwich;
pub mod scheduler;
pub mod scoring;
pub mod timeplan;

// 重导出核心引擎
pub use cohort::CohortScheduler;
pub use constraints::{ConstraintChecker, RunningLoad};
pub use error::{ScheduleError, ScheduleResult};
pub use manager::ManagerScheduler;
pub use orchestrator::RosterOrchestrator;
pub use repositories::{InMemoryRoster, RosterRepository};
pub use sandwich::SandwichScheduler;
pub use scheduler::{RoleScheduleOutput, RoleScheduler};
pub use scoring::FitnessScorer;
pub use timeplan::TimePlanResolver;
