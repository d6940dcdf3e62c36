// ==========================================
// 咖啡馆周排班系统 - 领域层
// ==========================================
// 职责: 实体与值对象定义,不含业务规则引擎
// ==========================================

pub mod assignment;
pub mod employee;
pub mod shift;
pub mod types;

pub use assignment::{Assignment, CoverageGap, WeekSchedule};
pub use employee::Employee;
pub use shift::{Shift, TimeWindow};
pub use types::{DayType, IneligibleReason, Role};
