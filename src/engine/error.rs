// ==========================================
// 咖啡馆周排班系统 - 引擎层错误类型
// ==========================================
// 职责: 定义排班引擎错误分类
// 红线: 覆盖缺口是数据不是错误;引擎内不做重试
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
///
/// 分类依据:
/// - 配置错误: 立刻失败
/// - 输入完整性错误: 目标周无班次等,无法产出有意义结果
/// - 不变量违反: 全局校验发现已提交条目违反硬约束(引擎缺陷)
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("输入完整性错误: week_id={week_id}, {reason}")]
    InputIntegrity { week_id: String, reason: String },

    #[error("内部不变量违反: {reason}")]
    InvariantViolation { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ScheduleResult<T> = Result<T, ScheduleError>;
