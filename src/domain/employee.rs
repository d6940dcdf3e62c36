// ==========================================
// 咖啡馆周排班系统 - 员工实体
// ==========================================
// 职责: 员工主数据(技能 0-10 分制)
// 红线: 排班运行期间员工数据只读
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

/// 员工主数据
///
/// 技能字段为 0-10 分制评分,缺失技能以 0.0 表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub primary_role: Role,

    // 技能评分 (0-10)
    #[serde(default)]
    pub skill_coffee: f64,
    #[serde(default)]
    pub skill_sandwich: f64,
    #[serde(default)]
    pub customer_service_rating: f64,
    #[serde(default)]
    pub skill_speed: f64,
}

impl Employee {
    /// 判断员工是否可承接某角色(共享池规则见 Role::allows_primary)
    pub fn can_work_as(&self, role: Role) -> bool {
        role.allows_primary(self.primary_role)
    }

    /// 显示用全名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
