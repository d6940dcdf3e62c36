// ==========================================
// 咖啡馆周排班系统 - 数据访问边界
// ==========================================
// 职责: 定义引擎消费的只读数据接口(员工/班次)
// 红线: 引擎不定义文件格式,不做持久化;数据一次性读入内存
// ==========================================

use crate::domain::types::Role;
use crate::domain::{Employee, Shift};

// ==========================================
// RosterRepository Trait
// ==========================================
// 实现者: InMemoryRoster(参考实现),或调用方的 CSV/数据库适配层
pub trait RosterRepository {
    /// 全部员工(按 employee_id 升序)
    fn all_employees(&self) -> Vec<&Employee>;

    /// 可承接某角色的员工(共享池语义,按 employee_id 升序)
    fn employees_for_role(&self, role: Role) -> Vec<&Employee>;

    /// 目标周全部班次日槽(按日期升序)
    fn shifts_for_week(&self, week_id: &str) -> Vec<&Shift>;
}

// ==========================================
// InMemoryRoster - 内存参考实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
}

impl InMemoryRoster {
    /// 构造时即做排序,保证确定性迭代顺序
    pub fn new(mut employees: Vec<Employee>, mut shifts: Vec<Shift>) -> Self {
        employees.sort_by_key(|e| e.employee_id);
        shifts.sort_by(|a, b| a.date.cmp(&b.date).then(a.shift_id.cmp(&b.shift_id)));
        Self { employees, shifts }
    }
}

impl RosterRepository for InMemoryRoster {
    fn all_employees(&self) -> Vec<&Employee> {
        self.employees.iter().collect()
    }

    fn employees_for_role(&self, role: Role) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.can_work_as(role))
            .collect()
    }

    fn shifts_for_week(&self, week_id: &str) -> Vec<&Shift> {
        self.shifts
            .iter()
            .filter(|s| s.week_id == week_id)
            .collect()
    }
}
